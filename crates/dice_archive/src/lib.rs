//! Asset archive reading and writing.
//!
//! An archive is a run of concatenated entry bytes followed by an index and a
//! fixed-size trailer. Because everything is located by seeking from the end
//! of the file, an archive can stand alone or be appended to an executable
//! and opened through the executable's own path.
//!
//! ```text
//! ┌──────────────┬───────────────┬───────────────────────────────────────┐
//! │ entry bytes  │ index         │ trailer (24 bytes)                    │
//! │ ...          │ bincode       │ magic | version | index_len | size    │
//! └──────────────┴───────────────┴───────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod reader;
pub mod writer;

pub use error::ArchiveError;
pub use format::{
    appended_archive_len, checksum_of, strip_appended, ArchiveEntry, Trailer, TRAILER_LEN,
};
pub use reader::Archive;
pub use writer::{collect_files, pack_dir, ArchiveWriter, PackSummary};
