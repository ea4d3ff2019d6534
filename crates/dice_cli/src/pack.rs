//! `dice pack`: writes a directory into an asset archive.

use std::path::Path;

use dice_archive::pack_dir;

use crate::project::status;
use crate::GlobalArgs;

/// Runs the `dice pack` command.
pub fn run(dir: &Path, out: &Path, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    status(global, "Packing", dir.display());
    let summary = pack_dir(dir, out)?;
    status(
        global,
        "Packed",
        format_args!(
            "{} entries ({} bytes) into {}",
            summary.entries,
            summary.archive_size,
            out.display()
        ),
    );
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_archive::Archive;
    use std::fs;

    #[test]
    fn packs_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("assets");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("dots_1.txt"), "o").unwrap();
        let out = tmp.path().join("a.dpk");

        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
        };
        assert_eq!(run(&dir, &out, &global).unwrap(), 0);
        let archive = Archive::load(&out).unwrap();
        assert_eq!(archive.read_named("assets/dots_1.txt").unwrap(), b"o");
    }
}
