//! Locating and loading the build plan, plus the cargo-style status line.

use std::path::PathBuf;

use dice_config::{find_project_root, BuildPlan};

use crate::GlobalArgs;

/// Resolves the project root.
///
/// With `--config`, a file path means its parent directory and anything
/// else is taken as the root itself. Without it, walks up from the current
/// directory to the nearest `dice.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        Ok(find_project_root(&std::env::current_dir()?)?)
    }
}

/// Loads the build plan honouring `--config`. Returns the root with it.
pub fn load_plan(global: &GlobalArgs) -> Result<(PathBuf, BuildPlan), Box<dyn std::error::Error>> {
    let root = resolve_project_root(global)?;
    let plan = match global.config.as_deref().map(PathBuf::from) {
        Some(file) if file.is_file() => dice_config::load_plan_file(&file)?,
        _ => dice_config::load_plan(&root)?,
    };
    Ok((root, plan))
}

/// Prints `verb` right-aligned in twelve columns, then `message`, to
/// stderr. Silent with `--quiet`.
pub fn status(global: &GlobalArgs, verb: &str, message: impl std::fmt::Display) {
    if !global.quiet {
        eprintln!("{verb:>12} {message}");
    }
}
