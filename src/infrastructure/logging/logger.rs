use super::config::{LogFormat, LoggerProfile};
use crate::domain::models::config::Environment;
use std::io;
use thiserror::Error;
use tracing::Dispatch;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Wall-clock time of day, e.g. `3:04PM`
const TIME_OF_DAY_FORMAT: &str = "%-I:%M%p";

/// Logger errors
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

/// Logger built from an environment profile
///
/// Construction only builds the subscriber; nothing is installed globally
/// until [`Logger::init`], so any number of loggers can coexist.
pub struct Logger {
    profile: LoggerProfile,
    dispatch: Dispatch,
}

impl Logger {
    /// Stdout logger for a validated environment
    pub fn new(env: Environment) -> Self {
        Self::with_writer(LoggerProfile::for_environment(env), io::stdout)
    }

    /// Stdout logger for a raw tag; unknown tags get the production profile
    pub fn from_tag(tag: &str) -> Self {
        Self::with_writer(LoggerProfile::for_tag(tag), io::stdout)
    }

    /// Logger writing to an arbitrary sink
    pub fn with_writer<W>(profile: LoggerProfile, make_writer: W) -> Self
    where
        W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
    {
        // Level policy is fixed per environment; RUST_LOG is not consulted.
        let env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(profile.level).into())
            .parse_lossy("");

        let dispatch = match profile.format {
            LogFormat::Pretty => Dispatch::new(
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_writer(make_writer)
                    .with_ansi(true)
                    .with_target(false)
                    .with_timer(ChronoLocal::new(TIME_OF_DAY_FORMAT.to_string()))
                    .finish(),
            ),
            LogFormat::Json => Dispatch::new(
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(env_filter)
                    .with_writer(make_writer)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .finish(),
            ),
        };

        Self { profile, dispatch }
    }

    pub const fn profile(&self) -> LoggerProfile {
        self.profile
    }

    /// Run `f` with this logger as the thread-local default
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Install as the process-wide default subscriber
    pub fn init(&self) -> Result<(), LoggerError> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|_| LoggerError::AlreadyInitialized)
    }
}

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, trace, warn};
