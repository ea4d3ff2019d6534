//! Terminal dice tray.
//!
//! A ratatui shell around [`dice_core::DiceState`]: add and roll six-sided
//! dice, keep named roll macros and count the dice that meet a success
//! threshold. Die faces are text art read from the asset archive appended
//! to the running executable.
//!
//! # Usage
//!
//! ```ignore
//! use dice_tui::{assets, run_tui, DiceApp};
//!
//! let faces = assets::DiceFaces::load(&assets::locate_archive(None)?)?;
//! let mut app = DiceApp::new(dice_core::DiceState::default(), faces);
//! run_tui(&mut app)?;
//! ```
//!
//! # Layout
//!
//! - **Tray** (left): dice count, sum, sorting, threshold, successes, macros
//! - **Dice** (right): one face per die, wrapping into rows
//! - **Status Bar**: mode, summary and the last message
//! - **Input Line**: key hints or the field being typed

#![warn(missing_docs)]

pub mod app;
pub mod assets;
pub mod error;
pub mod event;
pub mod render;
pub mod state;
pub mod terminal;
pub mod widgets;

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers};
use tracing::info;

pub use app::DiceApp;
pub use error::TuiError;

use event::{poll_event, TuiEvent};
use terminal::{init_terminal, install_panic_hook, restore_terminal, Tui};

/// Interval between frames when no input arrives.
pub const TICK_RATE: Duration = Duration::from_millis(50);

/// Runs the shell until the user quits.
///
/// The terminal is restored on exit, on error and on panic.
///
/// # Errors
///
/// Returns [`TuiError::Terminal`] if the terminal cannot be set up, drawn
/// to or polled.
pub fn run_tui(app: &mut DiceApp) -> Result<(), TuiError> {
    install_panic_hook();
    let mut terminal = init_terminal()?;
    info!("shell started");

    let result = run_tui_loop(app, &mut terminal);
    let restored = restore_terminal();

    info!(dice = app.dice.tray.len(), "shell exited");
    first_error(result, restored)
}

/// A loop failure wins over a failed restore.
fn first_error(
    result: Result<(), TuiError>,
    restored: std::io::Result<()>,
) -> Result<(), TuiError> {
    result.and(restored.map_err(TuiError::from))
}

/// Draw, poll, mutate. Frame time is measured, so the wiggle decays at the
/// same rate whether input is arriving or not.
fn run_tui_loop(app: &mut DiceApp, terminal: &mut Tui) -> Result<(), TuiError> {
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| render::render(app, frame))?;

        match poll_event(TICK_RATE)? {
            TuiEvent::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    app.should_quit = true;
                } else {
                    app.handle_key(key.code);
                }
            }
            TuiEvent::Tick | TuiEvent::Resize(_, _) => {}
        }

        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
