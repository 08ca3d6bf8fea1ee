//! Yani - service bootstrap
//!
//! Loads layered configuration (TOML file, then `YANI_*` environment
//! variables) into a validated [`Config`] and builds an environment-aware
//! structured [`Logger`].
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): configuration records and validation errors
//! - **Infrastructure Layer** (`infrastructure`): config loading and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use yani::{ConfigLoader, EnvSnapshot, Logger};
//!
//! let env = EnvSnapshot::capture()?;
//! let loaded = ConfigLoader::load(None, &env)?;
//! let logger = Logger::new(loaded.config.env);
//! logger.init()?;
//! tracing::info!(env = %loaded.config.env, "starting app");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::errors::ValidationError;
pub use domain::models::{Config, Environment, GrpcConfig, RawConfig, StorageConfig};
pub use infrastructure::config::{
    env_key, resolve_path, ConfigError, ConfigLoader, ConfigPath, ConfigSource, EnvSnapshot,
    Loaded,
};
pub use infrastructure::logging::{LogFormat, Logger, LoggerError, LoggerProfile};
