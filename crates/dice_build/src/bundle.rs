//! Appending the asset archive to an executable.
//!
//! The archive is located by seeking from the end of a file, so the bundled
//! executable can open its own path as a loose archive.

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom};
use std::path::Path;

use dice_archive::{appended_archive_len, strip_appended};
use tracing::{debug, info};

use crate::error::BuildError;

/// What [`bundle_executable`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BundleOutcome {
    /// The executable already carried an archive and nothing forced a refresh.
    UpToDate,
    /// The archive was appended.
    Appended {
        /// Bytes appended.
        bytes: u64,
        /// Bytes of a previous archive stripped first.
        replaced: u64,
    },
}

/// Appends `package` to `executable` unless it already carries an archive
/// and `force` is false.
///
/// A previously appended archive is stripped first so archives never stack.
pub fn bundle_executable(
    executable: &Path,
    package: &Path,
    force: bool,
) -> Result<BundleOutcome, BuildError> {
    let existing = appended_archive_len(executable)?;
    if existing.is_some() && !force {
        debug!(executable = %executable.display(), "executable already bundled");
        return Ok(BundleOutcome::UpToDate);
    }
    let replaced = if existing.is_some() {
        strip_appended(executable)?
    } else {
        0
    };
    let bytes = append_to(executable, package)?;
    Ok(BundleOutcome::Appended { bytes, replaced })
}

/// Appends the raw bytes of `archive` to the end of `target` and returns
/// the number of bytes copied.
pub fn append_to(target: &Path, archive: &Path) -> Result<u64, BuildError> {
    let source = File::open(archive).map_err(|e| BuildError::io(archive, e))?;
    let len = source
        .metadata()
        .map_err(|e| BuildError::io(archive, e))?
        .len();

    // sendfile(2) rejects O_APPEND destinations, so seek instead.
    let mut dest = OpenOptions::new()
        .write(true)
        .open(target)
        .map_err(|e| BuildError::io(target, e))?;
    dest.seek(SeekFrom::End(0))
        .map_err(|e| BuildError::io(target, e))?;

    info!(
        bytes = len,
        from = %archive.display(),
        to = %target.display(),
        "appending archive"
    );
    let sent = transfer(&source, &mut dest, len, target)?;
    info!(bytes = sent, "appended archive");
    Ok(sent)
}

/// Zero-copy transfer. A single call may move fewer bytes than requested,
/// so loop on the remaining length until everything is sent.
#[cfg(target_os = "linux")]
fn transfer(source: &File, dest: &mut File, len: u64, target: &Path) -> Result<u64, BuildError> {
    let mut total: u64 = 0;
    while total < len {
        let remaining = usize::try_from(len - total).unwrap_or(usize::MAX);
        let sent = rustix::fs::sendfile(&*dest, source, None, remaining)
            .map_err(|e| BuildError::io(target, e.into()))?;
        debug!(sent, total, "sendfile iteration");
        if sent == 0 {
            return Err(BuildError::ShortTransfer {
                path: target.to_path_buf(),
                copied: total,
                expected: len,
            });
        }
        total += sent as u64;
    }
    Ok(total)
}

#[cfg(not(target_os = "linux"))]
fn transfer(source: &File, dest: &mut File, len: u64, target: &Path) -> Result<u64, BuildError> {
    use std::io::Read;

    let copied = std::io::copy(&mut source.take(len), dest)
        .map_err(|e| BuildError::io(target, e))?;
    if copied != len {
        return Err(BuildError::ShortTransfer {
            path: target.to_path_buf(),
            copied,
            expected: len,
        });
    }
    Ok(copied)
}
