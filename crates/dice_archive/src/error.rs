//! Error types for archive operations.

use std::path::PathBuf;

/// Errors that can occur while reading or writing an archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// An I/O error occurred on the archive or a packed file.
    #[error("archive I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is too small for an archive, or the trailer's sizes do not fit.
    #[error("archive {path} is of incorrect size: {reason}")]
    InvalidSize {
        /// The archive file path.
        path: PathBuf,
        /// Description of the size problem.
        reason: String,
    },

    /// The trailer does not start with the archive magic bytes.
    #[error("no archive found in {path}: missing magic bytes")]
    BadMagic {
        /// The file that was checked.
        path: PathBuf,
    },

    /// The archive format version does not match the current version.
    #[error("version mismatch in {path}: expected {expected}, got {actual}")]
    VersionMismatch {
        /// The archive file path.
        path: PathBuf,
        /// The expected format version.
        expected: u32,
        /// The version found in the trailer.
        actual: u32,
    },

    /// The index could not be decoded or describes entries outside the archive.
    #[error("archive index in {path} is invalid: {reason}")]
    InvalidIndex {
        /// The archive file path.
        path: PathBuf,
        /// Description of the index problem.
        reason: String,
    },

    /// No entry with this exact name exists in the index.
    #[error("archive has no entry named '{name}'")]
    MissingEntry {
        /// The requested name.
        name: String,
    },

    /// An entry with this name was already added to the writer.
    #[error("duplicate archive entry '{name}'")]
    DuplicateEntry {
        /// The duplicated name.
        name: String,
    },

    /// The caller-provided buffer does not match the entry length.
    #[error("buffer for '{name}' holds {actual} bytes, entry has {expected}")]
    BufferSize {
        /// The entry name.
        name: String,
        /// The entry length.
        expected: u64,
        /// The buffer length.
        actual: usize,
    },

    /// The entry bytes do not hash to the checksum stored in the index.
    #[error("checksum mismatch in '{name}': expected {expected:032x}, got {actual:032x}")]
    ChecksumMismatch {
        /// The entry name.
        name: String,
        /// The checksum recorded in the index.
        expected: u128,
        /// The checksum of the bytes read.
        actual: u128,
    },

    /// The index could not be encoded.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}

impl ArchiveError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
