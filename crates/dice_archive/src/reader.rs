//! Reading entries out of an archive.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ArchiveError;
use crate::format::{checksum_of, ArchiveEntry, Trailer};

/// An open archive.
///
/// [`Archive::open`] only validates the trailer; call
/// [`Archive::read_index`] before looking entries up.
pub struct Archive {
    path: PathBuf,
    file: File,
    /// Absolute file offset where the archive begins.
    base: u64,
    trailer: Trailer,
    entries: Vec<ArchiveEntry>,
    by_name: HashMap<String, usize>,
}

impl Archive {
    /// Opens the archive at the end of the file at `path`.
    ///
    /// Fails if the file is too small or the trailer's sizes are invalid.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let mut file = File::open(path).map_err(|e| ArchiveError::io(path, e))?;
        let (trailer, file_len) = Trailer::read_from(&mut file, path)?;
        let base = file_len - trailer.archive_size;

        debug!(
            path = %path.display(),
            archive_size = trailer.archive_size,
            base,
            "opened archive"
        );

        Ok(Self {
            path: path.to_path_buf(),
            file,
            base,
            trailer,
            entries: Vec::new(),
            by_name: HashMap::new(),
        })
    }

    /// Opens the archive and loads its index in one step.
    pub fn load(path: &Path) -> Result<Self, ArchiveError> {
        let mut archive = Self::open(path)?;
        archive.read_index()?;
        Ok(archive)
    }

    /// Total archive size in bytes, as recorded in the trailer.
    pub fn archive_size(&self) -> u64 {
        self.trailer.archive_size
    }

    /// Path the archive was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the name → (offset, length) index into memory and returns the
    /// number of entries.
    pub fn read_index(&mut self) -> Result<usize, ArchiveError> {
        let index_len = usize::try_from(self.trailer.index_len).map_err(|_| self.invalid_index(
            format!("index of {} bytes does not fit in memory", self.trailer.index_len),
        ))?;
        let data_len = self.trailer.data_len();

        let mut raw = vec![0u8; index_len];
        (&self.file)
            .seek(SeekFrom::Start(self.base + data_len))
            .and_then(|_| (&self.file).read_exact(&mut raw))
            .map_err(|e| ArchiveError::io(&self.path, e))?;

        let (entries, consumed): (Vec<ArchiveEntry>, usize) =
            bincode::serde::decode_from_slice(&raw, bincode::config::standard())
                .map_err(|e| self.invalid_index(e.to_string()))?;
        if consumed != index_len {
            return Err(self.invalid_index(format!(
                "decoded {consumed} of {index_len} index bytes"
            )));
        }

        let mut by_name = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let end = entry.offset.checked_add(entry.len);
            if end.is_none_or(|end| end > data_len) {
                return Err(self.invalid_index(format!(
                    "entry '{}' lies outside the {data_len} byte data region",
                    entry.name
                )));
            }
            if by_name.insert(entry.name.clone(), i).is_some() {
                return Err(self.invalid_index(format!("duplicate entry '{}'", entry.name)));
            }
        }

        debug!(count = entries.len(), "loaded archive index");
        self.entries = entries;
        self.by_name = by_name;
        Ok(self.entries.len())
    }

    /// Looks up an entry by exact name.
    pub fn find(&self, name: &str) -> Option<&ArchiveEntry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    /// All entries in stored order.
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Copies the bytes of `entry` into `buf`, which must be exactly
    /// `entry.len` bytes long.
    pub fn read(&self, entry: &ArchiveEntry, buf: &mut [u8]) -> Result<(), ArchiveError> {
        if buf.len() as u64 != entry.len {
            return Err(ArchiveError::BufferSize {
                name: entry.name.clone(),
                expected: entry.len,
                actual: buf.len(),
            });
        }

        (&self.file)
            .seek(SeekFrom::Start(self.base + entry.offset))
            .and_then(|_| (&self.file).read_exact(buf))
            .map_err(|e| ArchiveError::io(&self.path, e))?;

        let actual = checksum_of(buf);
        if actual != entry.checksum {
            return Err(ArchiveError::ChecksumMismatch {
                name: entry.name.clone(),
                expected: entry.checksum,
                actual,
            });
        }
        Ok(())
    }

    /// Reads `entry` into a freshly allocated buffer.
    pub fn read_to_vec(&self, entry: &ArchiveEntry) -> Result<Vec<u8>, ArchiveError> {
        let len = usize::try_from(entry.len).map_err(|_| ArchiveError::BufferSize {
            name: entry.name.clone(),
            expected: entry.len,
            actual: usize::MAX,
        })?;
        let mut buf = vec![0u8; len];
        self.read(entry, &mut buf)?;
        Ok(buf)
    }

    /// Finds and reads the entry called `name`.
    pub fn read_named(&self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        let entry = self.find(name).ok_or_else(|| ArchiveError::MissingEntry {
            name: name.to_string(),
        })?;
        self.read_to_vec(entry)
    }

    fn invalid_index(&self, reason: String) -> ArchiveError {
        ArchiveError::InvalidIndex {
            path: self.path.clone(),
            reason,
        }
    }
}
