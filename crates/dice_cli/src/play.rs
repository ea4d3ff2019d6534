//! `dice play`: the interactive shell.

use dice_core::{DiceState, Tray};
use dice_tui::assets::{locate_archive, DiceFaces};
use dice_tui::{run_tui, DiceApp};
use tracing::{error, info};

use crate::logging;
use crate::{GlobalArgs, PlayArgs};

/// Runs the `dice play` command.
///
/// Assets come from `--assets` or from the archive appended to this
/// executable. Failing to load them is fatal.
pub fn run(args: &PlayArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    if let Some(path) = &args.log_file {
        logging::init_file(global, path)?;
    }

    let mut app = build_app(args).map_err(|e| {
        error!("{e}");
        e
    })?;

    run_tui(&mut app)?;
    Ok(0)
}

fn build_app(args: &PlayArgs) -> Result<DiceApp, dice_tui::TuiError> {
    let archive = locate_archive(args.assets.as_deref())?;
    info!(archive = %archive.display(), "loading dice faces");
    let faces = DiceFaces::load(&archive)?;

    let mut tray = match args.seed {
        Some(seed) => Tray::with_seed(seed),
        None => Tray::new(),
    };
    tray.set_sorted(args.sorted);
    Ok(DiceApp::new(DiceState::with_tray(tray), faces))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_archive::ArchiveWriter;
    use dice_tui::assets::FACE_ENTRIES;
    use dice_tui::TuiError;

    #[test]
    fn builds_app_from_explicit_assets() {
        let tmp = tempfile::tempdir().unwrap();
        let mut w = ArchiveWriter::new();
        for (i, name) in FACE_ENTRIES.iter().enumerate() {
            w.add(*name, format!("[{}]", i + 1).as_bytes()).unwrap();
        }
        let path = tmp.path().join("a.dpk");
        w.write_to(&path).unwrap();

        let args = PlayArgs {
            assets: Some(path),
            seed: Some(9),
            sorted: true,
            log_file: None,
        };
        let app = build_app(&args).unwrap();
        assert!(app.dice.tray.is_sorted());
        assert!(app.dice.tray.is_empty());
        assert_eq!(app.faces.face(2), ["[2]"]);
    }

    #[test]
    fn missing_assets_are_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let args = PlayArgs {
            assets: Some(tmp.path().join("nope.dpk")),
            ..PlayArgs::default()
        };
        assert!(matches!(build_app(&args), Err(TuiError::Assets(_))));
    }
}
