//! Error types for build orchestration.

use std::path::PathBuf;

use dice_archive::ArchiveError;

/// Errors that abort a build run.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An external process could not be launched.
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        /// The program that was being launched.
        program: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Waiting on a launched process failed.
    #[error("failed to wait for '{name}': {source}")]
    Wait {
        /// The task being waited on.
        name: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// One or more compile units of a target exited unsuccessfully.
    #[error("{} unit(s) of target '{target}' failed: {}", failed.len(), failed.join(", "))]
    UnitsFailed {
        /// The target being built.
        target: String,
        /// Names of the failed units.
        failed: Vec<String>,
    },

    /// A synchronous step (link) exited unsuccessfully.
    #[error("'{step}' failed: {status}")]
    StepFailed {
        /// The step name.
        step: String,
        /// Human-readable exit status.
        status: String,
    },

    /// A command template uses a placeholder the step cannot provide, or a
    /// list placeholder is not a whole argument.
    #[error("invalid placeholder in '{step}' argument '{arg}'")]
    Placeholder {
        /// The step whose command is invalid.
        step: String,
        /// The offending argument.
        arg: String,
    },

    /// Packing or inspecting the asset archive failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The append transfer stopped making progress before all bytes were copied.
    #[error("short transfer into {}: copied {copied} of {expected} bytes", path.display())]
    ShortTransfer {
        /// The file being appended to.
        path: PathBuf,
        /// Bytes copied before the transfer stalled.
        copied: u64,
        /// Bytes that should have been copied.
        expected: u64,
    },
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_failed_display_lists_units() {
        let err = BuildError::UnitsFailed {
            target: "raylib".to_string(),
            failed: vec!["rcore".to_string(), "rtext".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "2 unit(s) of target 'raylib' failed: rcore, rtext"
        );
    }

    #[test]
    fn short_transfer_display() {
        let err = BuildError::ShortTransfer {
            path: PathBuf::from("dice"),
            copied: 10,
            expected: 40,
        };
        assert_eq!(err.to_string(), "short transfer into dice: copied 10 of 40 bytes");
    }

    #[test]
    fn archive_error_is_transparent() {
        let err = BuildError::from(ArchiveError::MissingEntry {
            name: "x".to_string(),
        });
        assert_eq!(err.to_string(), "archive has no entry named 'x'");
    }
}
