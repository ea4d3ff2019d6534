//! On-disk layout: index records and the fixed-size trailer.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ArchiveError;

/// Magic bytes identifying an archive trailer.
pub const ARCHIVE_MAGIC: [u8; 4] = *b"DPAK";

/// Current archive format version. Increment on breaking changes to the
/// trailer or index layout.
pub const ARCHIVE_FORMAT_VERSION: u32 = 1;

/// Size of the trailer in bytes.
pub const TRAILER_LEN: u64 = 24;

/// One index record: where an entry's bytes live inside the archive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Relative path, `/`-separated (e.g. `assets/dots_1.txt`).
    pub name: String,
    /// Byte offset from the start of the archive.
    pub offset: u64,
    /// Length in bytes.
    pub len: u64,
    /// [`checksum_of`] the entry bytes.
    pub checksum: u128,
}

/// XXH3-128 of an entry's bytes, recorded in the index and checked on read.
pub fn checksum_of(bytes: &[u8]) -> u128 {
    xxhash_rust::xxh3::xxh3_128(bytes)
}

/// The last [`TRAILER_LEN`] bytes of an archive.
///
/// Layout (little-endian): magic `[u8; 4]`, format version `u32`,
/// index length `u64`, total archive size `u64`. The archive size covers
/// entry bytes, index and trailer, so the archive starts at
/// `file_len - archive_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trailer {
    /// Length of the encoded index in bytes.
    pub index_len: u64,
    /// Total archive length including the trailer.
    pub archive_size: u64,
}

impl Trailer {
    /// Encodes the trailer.
    pub fn encode(&self) -> [u8; TRAILER_LEN as usize] {
        let mut out = [0u8; TRAILER_LEN as usize];
        out[..4].copy_from_slice(&ARCHIVE_MAGIC);
        out[4..8].copy_from_slice(&ARCHIVE_FORMAT_VERSION.to_le_bytes());
        out[8..16].copy_from_slice(&self.index_len.to_le_bytes());
        out[16..24].copy_from_slice(&self.archive_size.to_le_bytes());
        out
    }

    /// Decodes and validates a trailer read from `path` whose total length
    /// is `file_len`.
    pub fn decode(
        bytes: &[u8; TRAILER_LEN as usize],
        file_len: u64,
        path: &Path,
    ) -> Result<Self, ArchiveError> {
        if bytes[..4] != ARCHIVE_MAGIC {
            return Err(ArchiveError::BadMagic {
                path: path.to_path_buf(),
            });
        }

        let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if version != ARCHIVE_FORMAT_VERSION {
            return Err(ArchiveError::VersionMismatch {
                path: path.to_path_buf(),
                expected: ARCHIVE_FORMAT_VERSION,
                actual: version,
            });
        }

        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[8..16]);
        let index_len = u64::from_le_bytes(word);
        word.copy_from_slice(&bytes[16..24]);
        let archive_size = u64::from_le_bytes(word);

        let invalid = |reason: String| ArchiveError::InvalidSize {
            path: path.to_path_buf(),
            reason,
        };

        if archive_size > file_len {
            return Err(invalid(format!(
                "archive claims {archive_size} bytes but the file has {file_len}"
            )));
        }
        let minimum = index_len
            .checked_add(TRAILER_LEN)
            .ok_or_else(|| invalid(format!("index length {index_len} overflows")))?;
        if archive_size < minimum {
            return Err(invalid(format!(
                "archive of {archive_size} bytes cannot hold a {index_len} byte index"
            )));
        }

        Ok(Self {
            index_len,
            archive_size,
        })
    }

    /// Length of the entry data region.
    pub fn data_len(&self) -> u64 {
        self.archive_size - self.index_len - TRAILER_LEN
    }

    /// Reads the trailer at the end of an open file.
    pub(crate) fn read_from(file: &mut File, path: &Path) -> Result<(Self, u64), ArchiveError> {
        let file_len = file
            .metadata()
            .map_err(|e| ArchiveError::io(path, e))?
            .len();
        if file_len < TRAILER_LEN {
            return Err(ArchiveError::InvalidSize {
                path: path.to_path_buf(),
                reason: format!("{file_len} bytes is shorter than the {TRAILER_LEN} byte trailer"),
            });
        }

        let mut bytes = [0u8; TRAILER_LEN as usize];
        file.seek(SeekFrom::Start(file_len - TRAILER_LEN))
            .and_then(|_| file.read_exact(&mut bytes))
            .map_err(|e| ArchiveError::io(path, e))?;

        Ok((Self::decode(&bytes, file_len, path)?, file_len))
    }
}

/// Returns the size of an archive appended to (or forming) the file at
/// `path`, or `None` if the file does not end with a valid trailer.
pub fn appended_archive_len(path: &Path) -> Result<Option<u64>, ArchiveError> {
    let mut file = File::open(path).map_err(|e| ArchiveError::io(path, e))?;
    match Trailer::read_from(&mut file, path) {
        Ok((trailer, _)) => Ok(Some(trailer.archive_size)),
        Err(ArchiveError::Io { path, source }) => Err(ArchiveError::Io { path, source }),
        Err(_) => Ok(None),
    }
}

/// Truncates an archive previously appended to the file at `path`.
///
/// Returns the number of bytes removed (zero if there was no archive).
pub fn strip_appended(path: &Path) -> Result<u64, ArchiveError> {
    let Some(size) = appended_archive_len(path)? else {
        return Ok(0);
    };
    let file = OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|e| ArchiveError::io(path, e))?;
    let len = file.metadata().map_err(|e| ArchiveError::io(path, e))?.len();
    file.set_len(len - size)
        .map_err(|e| ArchiveError::io(path, e))?;
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("test.dpk")
    }

    #[test]
    fn checksum_catches_single_bit_flip() {
        let face = b"+---+\n| o |\n+---+\n";
        let mut flipped = face.to_vec();
        flipped[7] ^= 0x01;
        assert_eq!(checksum_of(face), checksum_of(face));
        assert_ne!(checksum_of(face), checksum_of(&flipped));
        assert_ne!(checksum_of(b""), checksum_of(b"\0"));
    }

    #[test]
    fn index_record_keeps_checksum_through_bincode() {
        let entry = ArchiveEntry {
            name: "assets/dots_6.txt".into(),
            offset: 40,
            len: 3,
            checksum: checksum_of(b"ooo"),
        };
        let config = bincode::config::standard();
        let bytes = bincode::serde::encode_to_vec(&entry, config).unwrap();
        let (back, _): (ArchiveEntry, usize) =
            bincode::serde::decode_from_slice(&bytes, config).unwrap();
        assert_eq!(back.checksum, checksum_of(b"ooo"));
    }

    #[test]
    fn trailer_roundtrip() {
        let t = Trailer {
            index_len: 40,
            archive_size: 1000,
        };
        let decoded = Trailer::decode(&t.encode(), 5000, &path()).unwrap();
        assert_eq!(decoded, t);
        assert_eq!(decoded.data_len(), 1000 - 40 - TRAILER_LEN);
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let mut bytes = Trailer {
            index_len: 1,
            archive_size: 25,
        }
        .encode();
        bytes[0] = b'X';
        assert!(matches!(
            Trailer::decode(&bytes, 100, &path()),
            Err(ArchiveError::BadMagic { .. })
        ));
    }

    #[test]
    fn wrong_version_is_rejected() {
        let mut bytes = Trailer {
            index_len: 1,
            archive_size: 25,
        }
        .encode();
        bytes[4..8].copy_from_slice(&99u32.to_le_bytes());
        assert!(matches!(
            Trailer::decode(&bytes, 100, &path()),
            Err(ArchiveError::VersionMismatch { actual: 99, .. })
        ));
    }

    #[test]
    fn archive_larger_than_file_is_rejected() {
        let bytes = Trailer {
            index_len: 1,
            archive_size: 500,
        }
        .encode();
        assert!(matches!(
            Trailer::decode(&bytes, 100, &path()),
            Err(ArchiveError::InvalidSize { .. })
        ));
    }

    #[test]
    fn index_larger_than_archive_is_rejected() {
        let bytes = Trailer {
            index_len: 90,
            archive_size: 100,
        }
        .encode();
        assert!(matches!(
            Trailer::decode(&bytes, 100, &path()),
            Err(ArchiveError::InvalidSize { .. })
        ));
    }

    #[test]
    fn overflowing_index_len_is_rejected() {
        let bytes = Trailer {
            index_len: u64::MAX,
            archive_size: 100,
        }
        .encode();
        assert!(matches!(
            Trailer::decode(&bytes, 100, &path()),
            Err(ArchiveError::InvalidSize { .. })
        ));
    }

    #[test]
    fn plain_file_has_no_appended_archive() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("plain.bin");
        std::fs::write(&p, vec![0u8; 64]).unwrap();
        assert_eq!(appended_archive_len(&p).unwrap(), None);
        assert_eq!(strip_appended(&p).unwrap(), 0);
        assert_eq!(std::fs::metadata(&p).unwrap().len(), 64);
    }

    #[test]
    fn tiny_file_has_no_appended_archive() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("tiny.bin");
        std::fs::write(&p, b"abc").unwrap();
        assert_eq!(appended_archive_len(&p).unwrap(), None);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = appended_archive_len(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ArchiveError::Io { .. }));
    }
}
