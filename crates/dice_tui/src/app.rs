//! Shell application core.
//!
//! [`DiceApp`] owns the dice model, the UI state and the loaded face art,
//! and maps key presses onto model operations.

use std::time::Duration;

use crossterm::event::KeyCode;
use dice_core::{DiceState, MAX_DICE};
use tracing::{debug, warn};

use crate::assets::DiceFaces;
use crate::state::{InputMode, UiState};

/// Roll text offered when defining a macro.
pub const DEFAULT_MACRO_ROLL: &str = "12d6";

/// The interactive application.
pub struct DiceApp {
    /// Dice, macros, threshold and wiggle.
    pub dice: DiceState,
    /// Input mode, buffers, status and popups.
    pub ui: UiState,
    /// Face art for drawing dice.
    pub faces: DiceFaces,
    /// Seconds since start, advanced by [`DiceApp::tick`]. Drives the wiggle.
    pub clock_s: f32,
    /// Whether the application should quit.
    pub should_quit: bool,
}

impl DiceApp {
    /// Creates an application around an existing model.
    pub fn new(dice: DiceState, faces: DiceFaces) -> Self {
        Self {
            dice,
            ui: UiState::new(),
            faces,
            clock_s: 0.0,
            should_quit: false,
        }
    }

    /// Dispatches a key press according to the current mode.
    ///
    /// An open error popup swallows the key that dismisses it.
    pub fn handle_key(&mut self, code: KeyCode) {
        if self.ui.error_popup.take().is_some() {
            return;
        }
        match self.ui.mode {
            InputMode::Normal => self.handle_normal_key(code),
            InputMode::ApplyMacro | InputMode::DeleteMacro => self.handle_number_key(code),
            InputMode::Threshold | InputMode::MacroName | InputMode::MacroRoll => {
                self.handle_text_key(code)
            }
        }
    }

    /// Handles a key in normal mode.
    pub fn handle_normal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => {
                if !self.dice.add_die() {
                    self.ui.error(format!(
                        "Dice count has reached the maximum amount of {MAX_DICE}"
                    ));
                }
            }
            KeyCode::Char('r') | KeyCode::Enter => self.roll(),
            KeyCode::Char('d') | KeyCode::Backspace => {
                self.dice.remove_die();
            }
            KeyCode::Char('s') => {
                let sorted = self.dice.tray.toggle_sorted();
                self.ui
                    .info(if sorted { "Sorting dice" } else { "Not sorting dice" });
            }
            KeyCode::Char('t') => {
                let text = self.dice.threshold.text().to_string();
                self.ui.begin_input(InputMode::Threshold, &text);
            }
            KeyCode::Char('m') => self.ui.begin_input(InputMode::MacroName, ""),
            KeyCode::Char('x') => {
                if self.dice.macros.is_empty() {
                    self.ui.error("No macros to delete");
                } else {
                    self.ui.begin_input(InputMode::DeleteMacro, "");
                }
            }
            KeyCode::Char('#') => {
                if self.dice.macros.is_empty() {
                    self.ui.error("No macros to apply");
                } else {
                    self.ui.begin_input(InputMode::ApplyMacro, "");
                }
            }
            KeyCode::Char(c @ '1'..='9') => self.apply_macro(digit_index(c)),
            KeyCode::Char('?') => self.ui.show_help = !self.ui.show_help,
            _ => {}
        }
    }

    /// Handles a key while a text field is being edited. Only editing keys
    /// are active; everything else is ignored.
    pub fn handle_text_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.ui.input.push(c),
            KeyCode::Backspace => {
                self.ui.input.pop();
            }
            KeyCode::Esc => {
                self.ui.finish_input();
                self.ui.pending_macro_name.clear();
            }
            KeyCode::Enter => self.commit_input(),
            _ => {}
        }
    }

    /// Handles a key while a macro number is being typed after `#` or `x`.
    /// Only digits are accepted.
    pub fn handle_number_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => self.ui.input.push(c),
            KeyCode::Backspace => {
                self.ui.input.pop();
            }
            KeyCode::Esc => {
                self.ui.finish_input();
            }
            KeyCode::Enter => self.commit_macro_number(),
            _ => {}
        }
    }

    /// Advances the clock and frame-driven effects.
    pub fn tick(&mut self, frame: Duration) {
        self.clock_s += frame.as_secs_f32();
        self.dice.tick(frame);
    }

    /// Current horizontal shake in cells.
    pub fn wiggle_offset(&self, amplitude: f32) -> i32 {
        self.dice.wiggle.offset(self.clock_s, amplitude)
    }

    fn roll(&mut self) {
        self.dice.roll();
        self.report_roll();
    }

    fn apply_macro(&mut self, index: usize) {
        if self.dice.apply_macro(index) {
            self.report_roll();
        } else {
            self.ui.error(format!("No macro #{}", index + 1));
        }
    }

    fn commit_macro_number(&mut self) {
        let mode = self.ui.mode;
        let text = self.ui.finish_input();
        let Some(index) = text.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
            self.ui.error(format!("No macro #{text}"));
            return;
        };
        if mode == InputMode::DeleteMacro {
            match self.dice.macros.remove(index) {
                Some(removed) => self.ui.info(format!("Deleted macro {}", removed.label())),
                None => self.ui.error(format!("No macro #{}", index + 1)),
            }
        } else {
            self.apply_macro(index);
        }
    }

    fn report_roll(&mut self) {
        let tray = &self.dice.tray;
        let text = format!(
            "Rolled {} dice: sum {}, {} at or above {}",
            tray.len(),
            tray.sum(),
            self.dice.successes(),
            self.dice.threshold.value()
        );
        self.ui.info(text);
    }

    fn commit_input(&mut self) {
        let mode = self.ui.mode;
        let text = self.ui.finish_input();
        match mode {
            InputMode::Threshold => match self.dice.threshold.update_from_text(&text) {
                Ok(value) => self.ui.info(format!("Threshold: {value}")),
                Err(e) => self.ui.error(e.to_string()),
            },
            InputMode::MacroName => {
                self.ui.pending_macro_name = text;
                self.ui.begin_input(InputMode::MacroRoll, DEFAULT_MACRO_ROLL);
            }
            InputMode::MacroRoll => {
                let name = std::mem::take(&mut self.ui.pending_macro_name);
                match self.dice.macros.create_from_text(&name, &text) {
                    Ok(()) => {
                        let n = self.dice.macros.len();
                        let label = self
                            .dice
                            .macros
                            .get(n - 1)
                            .map(|m| m.label())
                            .unwrap_or_default();
                        self.ui.info(format!("Macro #{n}: {label}"));
                    }
                    Err(e) => {
                        debug!(name = %name, roll = %text, "rejected macro: {e}");
                        self.ui.error_popup = Some(e.to_string());
                    }
                }
            }
            InputMode::Normal | InputMode::ApplyMacro | InputMode::DeleteMacro => {
                warn!(?mode, "commit outside a text field");
            }
        }
    }
}

/// `'1'` → 0, ..., `'9'` → 8.
fn digit_index(c: char) -> usize {
    c.to_digit(10).map_or(0, |d| d as usize - 1)
}

/// A seeded app with one-character faces, for widget and render tests.
#[cfg(test)]
pub(crate) fn test_app() -> DiceApp {
    let faces = DiceFaces::from_texts(["1", "2", "3", "4", "5", "6"]);
    DiceApp::new(DiceState::with_tray(dice_core::Tray::with_seed(7)), faces)
}
