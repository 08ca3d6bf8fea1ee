//! CLI type definitions
//!
//! This module contains the clap structure that defines the command line.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "yani")]
#[command(about = "Yani - service bootstrap", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (also accepted as `-config`)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse an explicit argument list, exiting with usage on error
    pub fn parse_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_args(args))
    }

    /// Parse an explicit argument list
    ///
    /// Holds no global state, so it can be called any number of times.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

/// Rewrite single-dash `-config` into the `--config` form clap expects
///
/// Arguments after a bare `--` are left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut past_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if past_separator {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    past_separator = true;
                    arg
                }
                Some("-config") => OsString::from("--config"),
                Some(s) if s.starts_with("-config=") => OsString::from(format!("-{s}")),
                _ => arg,
            }
        })
        .collect()
}
