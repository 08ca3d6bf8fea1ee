use std::fmt;
use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use figment::providers::{Format, Serialized, Toml};
use figment::{Figment, Provider};
use thiserror::Error;

use super::env::{collect_overrides, CoercionError, EnvError, EnvSnapshot};
use super::path::{resolve_path, ConfigPath};
use crate::domain::errors::ValidationError;
use crate::domain::models::config::{Config, Environment, GrpcConfig, RawConfig, StorageConfig};
use crate::domain::models::duration;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load config file {}: {source}", .path.display())]
    FileLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to load env config: {0}")]
    EnvLoad(#[from] EnvError),

    #[error("failed to unmarshal config file {}: {source}", .path.display())]
    Unmarshal {
        path: PathBuf,
        #[source]
        source: UnmarshalError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A value that could not be coerced into its configuration field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmarshalError {
    /// Dotted key of the field
    pub key: String,
    /// Raw value when it is known (environment overrides)
    pub value: Option<String>,
    pub reason: String,
}

impl fmt::Display for UnmarshalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key {}", self.key)?;
        if let Some(value) = &self.value {
            write!(f, " = {value:?}")?;
        }
        write!(f, ": {}", self.reason)
    }
}

impl std::error::Error for UnmarshalError {}

impl From<CoercionError> for UnmarshalError {
    fn from(err: CoercionError) -> Self {
        Self {
            key: err.key,
            value: Some(err.value),
            reason: format!("{} (from {})", err.reason, err.var),
        }
    }
}

impl From<figment::Error> for UnmarshalError {
    fn from(err: figment::Error) -> Self {
        let key = if err.path.is_empty() {
            "<root>".to_string()
        } else {
            err.path.join(".")
        };
        Self {
            key,
            value: None,
            reason: err.kind.to_string(),
        }
    }
}

impl ConfigError {
    /// Key named by an unmarshal or validation failure
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Unmarshal { source, .. } => Some(source.key.as_str()),
            Self::Validation(err) => Some(err.field()),
            Self::FileLoad { .. } | Self::EnvLoad(_) => None,
        }
    }
}

/// A loaded configuration together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub config: Config,

    /// File the configuration was read from
    pub location: ConfigPath,

    /// Keys replaced by `YANI_*` variables, in variable-name order
    pub overridden: Vec<String>,
}

/// Configuration loader with layered merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration using an explicit flag value and environment snapshot
    ///
    /// Precedence (lowest to highest):
    /// 1. TOML file chosen by [`resolve_path`]
    /// 2. `YANI_*` environment variables
    pub fn load(flag: Option<&Path>, env: &EnvSnapshot) -> Result<Loaded, ConfigError> {
        let location = resolve_path(flag, env);
        let path = &location.path;

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileLoad {
            path: path.clone(),
            source: Box::new(e),
        })?;

        // Surface syntax errors here rather than at extraction time.
        let file = Toml::string(&contents);
        file.data().map_err(|e| ConfigError::FileLoad {
            path: path.clone(),
            source: Box::new(e),
        })?;

        let unmarshal = |source: UnmarshalError| ConfigError::Unmarshal {
            path: path.clone(),
            source,
        };

        let overrides = collect_overrides(env).map_err(|e| unmarshal(e.into()))?;

        let raw: RawConfig = overrides
            .iter()
            .fold(Figment::from(file), |figment, o| {
                figment.merge(Serialized::default(&o.key, &o.value))
            })
            .extract()
            .map_err(|e| unmarshal(e.into()))?;

        let config = Self::validate(raw)?;

        Ok(Loaded {
            config,
            overridden: overrides.into_iter().map(|o| o.key).collect(),
            location,
        })
    }

    /// Load using a fresh snapshot of the process environment
    pub fn load_from_process(flag: Option<&Path>) -> Result<Loaded, ConfigError> {
        let env = EnvSnapshot::capture()?;
        Self::load(flag, &env)
    }

    /// Load from the process environment, panicking on any failure
    ///
    /// Intended for the binary entry point only; library callers should use
    /// [`ConfigLoader::load`] and handle the error.
    pub fn must_load(flag: Option<&Path>) -> Loaded {
        match Self::load_from_process(flag) {
            Ok(loaded) => loaded,
            Err(err) => panic!("{err}"),
        }
    }

    /// Validate merged configuration
    ///
    /// Fields are checked in a fixed order and the first failure is returned.
    pub fn validate(raw: RawConfig) -> Result<Config, ValidationError> {
        let env = raw
            .env
            .parse::<Environment>()
            .map_err(|_| ValidationError::InvalidEnv(raw.env.clone()))?;

        if raw.storage.dsn.is_empty() {
            return Err(ValidationError::MissingStorageDsn);
        }

        if raw.grpc.port <= 0 {
            return Err(ValidationError::InvalidGrpcPort(raw.grpc.port));
        }
        let port = u16::try_from(raw.grpc.port)
            .map_err(|_| ValidationError::GrpcPortOutOfRange(raw.grpc.port))?;

        if raw.grpc.timeout <= TimeDelta::zero() {
            return Err(ValidationError::InvalidGrpcTimeout(duration::format(
                raw.grpc.timeout,
            )));
        }
        let timeout = raw
            .grpc
            .timeout
            .to_std()
            .map_err(|_| ValidationError::InvalidGrpcTimeout(duration::format(raw.grpc.timeout)))?;

        Ok(Config {
            env,
            storage: StorageConfig { dsn: raw.storage.dsn },
            grpc: GrpcConfig { port, timeout },
        })
    }
}
