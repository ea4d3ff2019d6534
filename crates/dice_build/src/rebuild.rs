//! Timestamp-based staleness checks.

use std::io;
use std::path::Path;

use tracing::trace;

/// Returns `true` if `output` must be rebuilt from `inputs`.
///
/// That is the case when the output does not exist, when any input does not
/// exist, or when any input was modified strictly after the output. Errors
/// other than "not found" are propagated.
pub fn needs_rebuild<P: AsRef<Path>>(output: &Path, inputs: &[P]) -> io::Result<bool> {
    let output_mtime = match std::fs::metadata(output) {
        Ok(meta) => meta.modified()?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            trace!(output = %output.display(), "output missing");
            return Ok(true);
        }
        Err(e) => return Err(e),
    };

    for input in inputs {
        let input = input.as_ref();
        let input_mtime = match std::fs::metadata(input) {
            Ok(meta) => meta.modified()?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(input = %input.display(), "input missing, forcing rebuild");
                return Ok(true);
            }
            Err(e) => return Err(e),
        };
        if input_mtime > output_mtime {
            trace!(
                output = %output.display(),
                input = %input.display(),
                "input is newer than output"
            );
            return Ok(true);
        }
    }

    Ok(false)
}
