//! Command-line interface

pub mod types;

pub use types::{normalize_args, Cli};
