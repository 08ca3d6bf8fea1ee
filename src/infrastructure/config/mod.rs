//! Configuration management infrastructure
//!
//! Layered configuration using figment:
//! - Config file discovery (flag, `YANI_CONFIG_PATH`, default path)
//! - TOML file loading
//! - `YANI_*` environment variable overrides
//! - Configuration validation

pub mod env;
pub mod loader;
pub mod path;

pub use env::{env_key, EnvError, EnvSnapshot, CONFIG_PATH_VAR, ENV_PREFIX};
pub use loader::{ConfigError, ConfigLoader, Loaded, UnmarshalError};
pub use path::{resolve_path, resolve_path_with_default, ConfigPath, ConfigSource, DEFAULT_CONFIG_PATH};
