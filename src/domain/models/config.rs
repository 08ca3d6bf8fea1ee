use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::TimeDelta;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use thiserror::Error;

use super::duration;

/// Deployment context the process runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Developer workstation, interactive terminal
    Local,
    /// Shared development deployment
    Dev,
    /// Production deployment
    Prod,
}

impl Environment {
    /// Every recognized environment, in declaration order
    pub const ALL: [Self; 3] = [Self::Local, Self::Dev, Self::Prod];

    /// The tag as written in configuration
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a tag is not one of `local`, `dev`, `prod`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown environment: {0:?}")]
pub struct UnknownEnvironment(pub String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| UnknownEnvironment(s.to_string()))
    }
}

/// Validated process configuration
///
/// Built once at startup by the config loader and treated as read-only
/// for the rest of the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Deployment environment
    pub env: Environment,

    /// Storage backend settings
    pub storage: StorageConfig,

    /// gRPC server settings
    pub grpc: GrpcConfig,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Connection string for the storage backend (never empty)
    pub dsn: String,
}

/// gRPC configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrpcConfig {
    /// Listen port (1..=65535)
    pub port: u16,

    /// Request timeout (non-zero)
    pub timeout: Duration,
}

/// Configuration as merged from the file and environment, before validation
///
/// Every field falls back to its zero value when absent so that a missing
/// field is reported by validation rather than by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RawConfig {
    /// Environment tag, checked against [`Environment`] during validation
    #[serde(default)]
    pub env: String,

    /// Storage section
    #[serde(default)]
    pub storage: RawStorageConfig,

    /// gRPC section
    #[serde(default)]
    pub grpc: RawGrpcConfig,
}

/// Unvalidated `[storage]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RawStorageConfig {
    /// Connection string
    #[serde(default)]
    pub dsn: String,
}

/// Unvalidated `[grpc]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RawGrpcConfig {
    /// Port; signed so that negative values reach validation
    #[serde(default, deserialize_with = "deserialize_port")]
    pub port: i64,

    /// Timeout; signed so that negative durations reach validation
    #[serde(default = "TimeDelta::zero", deserialize_with = "duration::deserialize")]
    pub timeout: TimeDelta,
}

impl Default for RawGrpcConfig {
    fn default() -> Self {
        Self {
            port: 0,
            timeout: TimeDelta::zero(),
        }
    }
}

struct PortVisitor;

impl Visitor<'_> for PortVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string of digits")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
        i64::try_from(value).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<i64, E> {
        parse_port(value).map_err(E::custom)
    }
}

/// Weakly typed port: integers, numeric strings, and `""` as zero
pub fn parse_port(value: &str) -> Result<i64, std::num::ParseIntError> {
    if value.is_empty() {
        return Ok(0);
    }
    value.parse()
}

fn deserialize_port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    deserializer.deserialize_any(PortVisitor)
}
