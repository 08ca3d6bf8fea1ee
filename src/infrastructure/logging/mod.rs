//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Colorized text output for local development
//! - JSON output for deployed environments
//! - Minimum level chosen per environment

pub mod config;
pub mod logger;

pub use config::{LogFormat, LoggerProfile};
pub use logger::{debug, error, info, instrument, trace, warn, Logger, LoggerError};
