//! Die face sprites loaded from the asset archive.
//!
//! Each face is a small block of text art stored as
//! `assets/dots_<n>.txt`. By default the archive is the one appended to
//! the running executable.

use std::path::{Path, PathBuf};

use dice_archive::Archive;
use dice_core::DIE_SIDES;
use tracing::{debug, info};

use crate::error::TuiError;

/// Archive entry names of the six faces, in face order.
pub const FACE_ENTRIES: [&str; DIE_SIDES as usize] = [
    "assets/dots_1.txt",
    "assets/dots_2.txt",
    "assets/dots_3.txt",
    "assets/dots_4.txt",
    "assets/dots_5.txt",
    "assets/dots_6.txt",
];

/// Text art for faces 1 through 6.
#[derive(Clone, Debug)]
pub struct DiceFaces {
    faces: Vec<Vec<String>>,
    width: u16,
    height: u16,
}

impl DiceFaces {
    /// Builds faces from their text, one string per face in face order.
    pub fn from_texts<S: AsRef<str>>(texts: [S; DIE_SIDES as usize]) -> Self {
        let faces: Vec<Vec<String>> = texts
            .iter()
            .map(|t| t.as_ref().lines().map(str::to_string).collect())
            .collect();
        let width = faces
            .iter()
            .flatten()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let height = faces.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            faces,
            width: u16::try_from(width).unwrap_or(u16::MAX),
            height: u16::try_from(height).unwrap_or(u16::MAX),
        }
    }

    /// Reads every face from an archive whose index is loaded.
    pub fn from_archive(archive: &Archive) -> Result<Self, TuiError> {
        let mut texts: [String; DIE_SIDES as usize] = Default::default();
        for (text, name) in texts.iter_mut().zip(FACE_ENTRIES) {
            let bytes = archive.read_named(name)?;
            *text = String::from_utf8(bytes).map_err(|_| TuiError::InvalidFace {
                path: archive.path().to_path_buf(),
                name: name.to_string(),
            })?;
            debug!(name, "loaded face");
        }
        Ok(Self::from_texts(texts))
    }

    /// Opens the archive at `path` and reads every face.
    pub fn load(path: &Path) -> Result<Self, TuiError> {
        info!(path = %path.display(), "loading assets");
        let archive = Archive::load(path)?;
        Self::from_archive(&archive)
    }

    /// Lines of the face showing `value`. Out-of-range values have no art.
    pub fn face(&self, value: u8) -> &[String] {
        usize::from(value)
            .checked_sub(1)
            .and_then(|i| self.faces.get(i))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Widest line across all faces, in cells.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Tallest face, in lines.
    pub fn height(&self) -> u16 {
        self.height
    }
}

/// Picks the archive to load: `explicit` if given, otherwise the running
/// executable.
pub fn locate_archive(explicit: Option<&Path>) -> Result<PathBuf, TuiError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => std::env::current_exe().map_err(|source| TuiError::ExecutablePath { source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_archive::{ArchiveError, ArchiveWriter};

    const ONE: &str = "+---+\n| o |\n+---+";

    fn write_faces(dir: &Path, skip: Option<usize>) -> PathBuf {
        let mut w = ArchiveWriter::new();
        for (i, name) in FACE_ENTRIES.iter().enumerate() {
            if Some(i) != skip {
                w.add(*name, format!("face {}", i + 1).as_bytes()).unwrap();
            }
        }
        let path = dir.join("assets.dpk");
        w.write_to(&path).unwrap();
        path
    }

    #[test]
    fn dimensions_are_maxima() {
        let faces = DiceFaces::from_texts([ONE, "x", "", "wide line here", "a\nb\nc\nd", ONE]);
        assert_eq!(faces.width(), 14);
        assert_eq!(faces.height(), 4);
        assert_eq!(faces.face(1), ["+---+", "| o |", "+---+"]);
        assert!(faces.face(3).is_empty());
    }

    #[test]
    fn out_of_range_face_is_empty() {
        let faces = DiceFaces::from_texts(["1", "2", "3", "4", "5", "6"]);
        assert!(faces.face(0).is_empty());
        assert!(faces.face(7).is_empty());
        assert_eq!(faces.face(6), ["6"]);
    }

    #[test]
    fn load_reads_all_faces() {
        let dir = tempfile::tempdir().unwrap();
        let faces = DiceFaces::load(&write_faces(dir.path(), None)).unwrap();
        assert_eq!(faces.face(4), ["face 4"]);
    }

    #[test]
    fn missing_face_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = DiceFaces::load(&write_faces(dir.path(), Some(2))).unwrap_err();
        assert!(matches!(
            err,
            TuiError::Assets(ArchiveError::MissingEntry { ref name }) if name == "assets/dots_3.txt"
        ));
    }

    #[test]
    fn missing_archive_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain");
        std::fs::write(&plain, b"no archive here, just bytes").unwrap();
        assert!(matches!(
            DiceFaces::load(&plain),
            Err(TuiError::Assets(ArchiveError::BadMagic { .. }))
        ));
    }

    #[test]
    fn explicit_archive_wins() {
        let p = locate_archive(Some(Path::new("x.dpk"))).unwrap();
        assert_eq!(p, PathBuf::from("x.dpk"));
        assert!(locate_archive(None).is_ok());
    }
}
