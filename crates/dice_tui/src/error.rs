//! Error types for the interactive shell.

use std::path::PathBuf;

use dice_archive::ArchiveError;

/// Fatal errors from asset loading or the terminal.
#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    /// Terminal setup, drawing or event polling failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The running executable's path could not be determined.
    #[error("could not locate the running executable: {source}")]
    ExecutablePath {
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The asset archive could not be opened or read.
    #[error("failed to load assets: {0}")]
    Assets(#[from] ArchiveError),

    /// A die face entry is not valid UTF-8 text.
    #[error("asset '{name}' in {} is not valid UTF-8", path.display())]
    InvalidFace {
        /// The archive the entry came from.
        path: PathBuf,
        /// The entry name.
        name: String,
    },
}
