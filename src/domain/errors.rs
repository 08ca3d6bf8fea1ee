//! Validation errors for merged configuration.

use thiserror::Error;

/// A semantic constraint violated by an otherwise well-typed configuration.
///
/// Validation stops at the first failing field, so exactly one of these is
/// reported per load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid env: {0:?} (allowed: local, dev, prod)")]
    InvalidEnv(String),

    #[error("storage dsn is required")]
    MissingStorageDsn,

    #[error("invalid grpc port: {0} (allowed: > 0)")]
    InvalidGrpcPort(i64),

    #[error("invalid grpc port: {0} (allowed: 1..=65535)")]
    GrpcPortOutOfRange(i64),

    /// Carries the rendered duration, e.g. `0s` or `-5s`
    #[error("invalid grpc timeout: {0} (allowed: > 0)")]
    InvalidGrpcTimeout(String),
}

impl ValidationError {
    /// Dotted configuration key of the offending field
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidEnv(_) => "env",
            Self::MissingStorageDsn => "storage.dsn",
            Self::InvalidGrpcPort(_) | Self::GrpcPortOutOfRange(_) => "grpc.port",
            Self::InvalidGrpcTimeout(_) => "grpc.timeout",
        }
    }
}
