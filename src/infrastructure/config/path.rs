//! Configuration file discovery.
//!
//! Resolution order: `-config` flag → `YANI_CONFIG_PATH` → `./config/config.toml`.

use std::fmt;
use std::path::{Path, PathBuf};

use super::env::{EnvSnapshot, CONFIG_PATH_VAR};

/// Location used when neither the flag nor the environment names a file
pub const DEFAULT_CONFIG_PATH: &str = "./config/config.toml";

/// Where the configuration file path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `-config` command-line flag
    Flag,

    /// `YANI_CONFIG_PATH` environment variable
    Environment,

    /// Built-in default path
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "command-line flag"),
            Self::Environment => write!(f, "{CONFIG_PATH_VAR}"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Resolved configuration file location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPath {
    pub path: PathBuf,
    pub source: ConfigSource,
}

/// Resolve the configuration file path against [`DEFAULT_CONFIG_PATH`]
pub fn resolve_path(flag: Option<&Path>, env: &EnvSnapshot) -> ConfigPath {
    resolve_path_with_default(flag, env, Path::new(DEFAULT_CONFIG_PATH))
}

/// Resolve the configuration file path
///
/// The first non-empty candidate wins; this never fails because the default
/// is always available.
pub fn resolve_path_with_default(
    flag: Option<&Path>,
    env: &EnvSnapshot,
    default: &Path,
) -> ConfigPath {
    if let Some(path) = flag.filter(|p| !p.as_os_str().is_empty()) {
        return ConfigPath {
            path: path.to_path_buf(),
            source: ConfigSource::Flag,
        };
    }

    if let Some(path) = env.get(CONFIG_PATH_VAR).filter(|p| !p.is_empty()) {
        return ConfigPath {
            path: PathBuf::from(path),
            source: ConfigSource::Environment,
        };
    }

    ConfigPath {
        path: default.to_path_buf(),
        source: ConfigSource::Default,
    }
}
