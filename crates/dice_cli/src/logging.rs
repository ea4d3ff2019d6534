//! `tracing` subscriber setup.
//!
//! Events go to stderr without timestamps. `--verbose` selects `debug`,
//! `--quiet` selects `error` and `RUST_LOG` overrides both.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::GlobalArgs;

/// Default filter for the global flags.
pub fn default_level(global: &GlobalArgs) -> &'static str {
    if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "info"
    }
}

fn filter(global: &GlobalArgs) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(global)))
}

/// Installs the stderr subscriber.
pub fn init_stderr(global: &GlobalArgs) {
    // A subscriber may already be set in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(global))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Installs a subscriber writing to `path`, truncating it.
pub fn init_file(global: &GlobalArgs, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(global))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(quiet: bool, verbose: bool) -> GlobalArgs {
        GlobalArgs {
            quiet,
            verbose,
            config: None,
        }
    }

    #[test]
    fn levels_follow_flags() {
        assert_eq!(default_level(&global(false, false)), "info");
        assert_eq!(default_level(&global(true, false)), "error");
        assert_eq!(default_level(&global(false, true)), "debug");
        assert_eq!(default_level(&global(true, true)), "debug");
    }

    #[test]
    fn file_logging_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dice.log");
        init_file(&global(false, false), &path).unwrap();
        assert!(path.exists());
    }
}
