use tracing::Level;

use crate::domain::models::config::Environment;

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Colorized single-line text with time-of-day timestamps
    Pretty,
    /// One JSON object per event
    Json,
}

/// Output format and minimum level for one environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerProfile {
    pub format: LogFormat,
    pub level: Level,
}

impl LoggerProfile {
    /// Profile for a validated environment
    pub const fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Local => Self {
                format: LogFormat::Pretty,
                level: Level::DEBUG,
            },
            Environment::Dev => Self {
                format: LogFormat::Json,
                level: Level::DEBUG,
            },
            Environment::Prod => Self::fallback(),
        }
    }

    /// Profile for an unvalidated tag
    ///
    /// Unrecognized tags get the production profile instead of an error, for
    /// callers that construct a logger before or without config validation.
    pub fn for_tag(tag: &str) -> Self {
        tag.parse::<Environment>()
            .map_or_else(|_| Self::fallback(), Self::for_environment)
    }

    const fn fallback() -> Self {
        Self {
            format: LogFormat::Json,
            level: Level::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_per_environment() {
        assert_eq!(
            LoggerProfile::for_environment(Environment::Local),
            LoggerProfile {
                format: LogFormat::Pretty,
                level: Level::DEBUG
            }
        );
        assert_eq!(
            LoggerProfile::for_environment(Environment::Dev),
            LoggerProfile {
                format: LogFormat::Json,
                level: Level::DEBUG
            }
        );
        assert_eq!(
            LoggerProfile::for_environment(Environment::Prod),
            LoggerProfile {
                format: LogFormat::Json,
                level: Level::INFO
            }
        );
    }

    #[test]
    fn test_profiles_are_distinct() {
        let profiles: Vec<_> = Environment::ALL
            .into_iter()
            .map(LoggerProfile::for_environment)
            .collect();
        assert_ne!(profiles[0], profiles[1]);
        assert_ne!(profiles[1], profiles[2]);
        assert_ne!(profiles[0], profiles[2]);
    }

    #[test]
    fn test_unknown_tag_falls_back_to_prod() {
        let prod = LoggerProfile::for_environment(Environment::Prod);
        assert_eq!(LoggerProfile::for_tag("garbage"), prod);
        assert_eq!(LoggerProfile::for_tag(""), prod);
        assert_eq!(LoggerProfile::for_tag("dev").format, LogFormat::Json);
    }
}
