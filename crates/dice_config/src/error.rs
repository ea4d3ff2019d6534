//! Error types for build plan loading and validation.

use std::path::PathBuf;

/// Errors that can occur when loading or validating a `dice.toml` build plan.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the build plan.
    #[error("failed to read build plan: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse build plan: {0}")]
    ParseError(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A build plan value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// No `dice.toml` exists in the start directory or any parent.
    #[error("could not find dice.toml in {} or any parent directory", start.display())]
    NotFound {
        /// The directory the search started from.
        start: PathBuf,
    },
}
