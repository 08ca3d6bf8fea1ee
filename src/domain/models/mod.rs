pub mod config;
pub mod duration;

pub use config::{
    Config, Environment, GrpcConfig, RawConfig, RawGrpcConfig, RawStorageConfig, StorageConfig,
    UnknownEnvironment,
};
pub use duration::DurationError;
