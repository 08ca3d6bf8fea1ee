//! Domain layer for yani
//!
//! Configuration records, the environment tag, and the semantic errors
//! raised when a merged configuration fails validation.

pub mod errors;
pub mod models;

pub use errors::ValidationError;
