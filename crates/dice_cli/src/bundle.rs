//! `dice bundle`: appends an archive to an executable.

use std::path::Path;

use dice_build::{bundle_executable, BundleOutcome};

use crate::project::status;
use crate::GlobalArgs;

/// Runs the `dice bundle` command.
pub fn run(
    executable: &Path,
    archive: &Path,
    force: bool,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    match bundle_executable(executable, archive, force)? {
        BundleOutcome::UpToDate => status(
            global,
            "Fresh",
            format_args!("{} already carries an archive", executable.display()),
        ),
        BundleOutcome::Appended { bytes, replaced } => {
            if replaced > 0 {
                status(global, "Stripped", format_args!("{replaced} bytes"));
            }
            status(
                global,
                "Bundled",
                format_args!("{bytes} bytes into {}", executable.display()),
            );
        }
    }
    Ok(0)
}
