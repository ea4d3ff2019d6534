//! Building archives from in-memory bytes or a directory tree.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::ArchiveError;
use crate::format::{checksum_of, ArchiveEntry, Trailer, TRAILER_LEN};

/// Accumulates entries and serializes them as one archive.
#[derive(Default)]
pub struct ArchiveWriter {
    entries: Vec<ArchiveEntry>,
    names: HashSet<String>,
    data: Vec<u8>,
}

/// What [`pack_dir`] wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackSummary {
    /// Number of entries packed.
    pub entries: usize,
    /// Size of the archive file in bytes.
    pub archive_size: u64,
}

impl ArchiveWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Names must be unique.
    pub fn add(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<(), ArchiveError> {
        let name = name.into();
        if !self.names.insert(name.clone()) {
            return Err(ArchiveError::DuplicateEntry { name });
        }
        self.entries.push(ArchiveEntry {
            name,
            offset: self.data.len() as u64,
            len: bytes.len() as u64,
            checksum: checksum_of(bytes),
        });
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Reads `path` from disk and appends it as `name`.
    pub fn add_file(&mut self, name: impl Into<String>, path: &Path) -> Result<(), ArchiveError> {
        let bytes = std::fs::read(path).map_err(|e| ArchiveError::io(path, e))?;
        self.add(name, &bytes)
    }

    /// Number of entries added so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the archive: entry bytes, then index, then trailer.
    pub fn finish(self) -> Result<Vec<u8>, ArchiveError> {
        let index = bincode::serde::encode_to_vec(&self.entries, bincode::config::standard())
            .map_err(|e| ArchiveError::Serialization {
                reason: e.to_string(),
            })?;

        let trailer = Trailer {
            index_len: index.len() as u64,
            archive_size: self.data.len() as u64 + index.len() as u64 + TRAILER_LEN,
        };

        let mut out = self.data;
        out.reserve(index.len() + TRAILER_LEN as usize);
        out.extend_from_slice(&index);
        out.extend_from_slice(&trailer.encode());
        Ok(out)
    }

    /// Writes the archive to `path`, replacing any existing file, and
    /// returns its size.
    pub fn write_to(self, path: &Path) -> Result<u64, ArchiveError> {
        let bytes = self.finish()?;
        std::fs::write(path, &bytes).map_err(|e| ArchiveError::io(path, e))?;
        Ok(bytes.len() as u64)
    }
}

/// Lists every regular file below `dir`, sorted by path.
pub fn collect_files(dir: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ArchiveError::io(path, e.into())
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Entry name for `file` found under `dir`: the directory's own name
/// followed by the relative path, `/`-separated.
fn entry_name(dir: &Path, file: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(root) = dir.file_name() {
        parts.push(root.to_string_lossy().into_owned());
    }
    if let Ok(rel) = file.strip_prefix(dir) {
        parts.extend(rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()));
    }
    parts.join("/")
}

/// Packs every file below `dir` into a new archive at `out`.
///
/// Entries are named `<dir name>/<relative path>`, so packing `assets`
/// yields names like `assets/dots_1.txt`.
pub fn pack_dir(dir: &Path, out: &Path) -> Result<PackSummary, ArchiveError> {
    let mut writer = ArchiveWriter::new();
    for file in collect_files(dir)? {
        let name = entry_name(dir, &file);
        debug!(name = %name, "packing file");
        writer.add_file(name, &file)?;
    }
    let entries = writer.len();
    let archive_size = writer.write_to(out)?;
    info!(entries, archive_size, out = %out.display(), "packed archive");
    Ok(PackSummary {
        entries,
        archive_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Archive;

    #[test]
    fn duplicate_names_are_rejected() {
        let mut w = ArchiveWriter::new();
        w.add("a", b"1").unwrap();
        assert!(matches!(
            w.add("a", b"2"),
            Err(ArchiveError::DuplicateEntry { .. })
        ));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn empty_archive_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.dpk");
        ArchiveWriter::new().write_to(&path).unwrap();
        let mut archive = Archive::open(&path).unwrap();
        assert_eq!(archive.read_index().unwrap(), 0);
    }

    #[test]
    fn finish_size_matches_trailer() {
        let mut w = ArchiveWriter::new();
        w.add("x", &[9u8; 100]).unwrap();
        let bytes = w.finish().unwrap();
        let mut tail = [0u8; TRAILER_LEN as usize];
        tail.copy_from_slice(&bytes[bytes.len() - TRAILER_LEN as usize..]);
        let trailer = Trailer::decode(&tail, bytes.len() as u64, Path::new("mem")).unwrap();
        assert_eq!(trailer.archive_size, bytes.len() as u64);
        assert_eq!(trailer.data_len(), 100);
    }

    #[test]
    fn pack_dir_names_entries_by_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        std::fs::create_dir_all(assets.join("sounds")).unwrap();
        std::fs::write(assets.join("dots_2.txt"), b"two").unwrap();
        std::fs::write(assets.join("dots_1.txt"), b"one").unwrap();
        std::fs::write(assets.join("sounds").join("click.wav"), b"RIFF").unwrap();

        let out = dir.path().join("pkg.dpk");
        let summary = pack_dir(&assets, &out).unwrap();
        assert_eq!(summary.entries, 3);
        assert_eq!(summary.archive_size, std::fs::metadata(&out).unwrap().len());

        let archive = Archive::load(&out).unwrap();
        let names: Vec<_> = archive.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            ["assets/dots_1.txt", "assets/dots_2.txt", "assets/sounds/click.wav"]
        );
        assert_eq!(archive.read_named("assets/sounds/click.wav").unwrap(), b"RIFF");
    }

    #[test]
    fn pack_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = pack_dir(&dir.path().join("nope"), &dir.path().join("out.dpk")).unwrap_err();
        assert!(matches!(err, ArchiveError::Io { .. }));
    }

    #[test]
    fn collect_files_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a/b")).unwrap();
        std::fs::write(dir.path().join("a/b/c.txt"), b"c").unwrap();
        let files = collect_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("a/b/c.txt")]);
    }
}
