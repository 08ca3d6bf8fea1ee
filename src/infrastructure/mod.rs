//! Infrastructure layer module
//!
//! - Configuration management (file discovery, TOML, environment overrides)
//! - Logging infrastructure

pub mod config;
pub mod logging;
