//! Application state owned by the presentation loop.

use std::time::Duration;

use crate::macros::MacroList;
use crate::threshold::Threshold;
use crate::tray::Tray;
use crate::wiggle::Wiggle;

/// Everything the user can change during a session.
///
/// Constructed at startup and dropped at shutdown; nothing is persisted.
#[derive(Clone, Debug, Default)]
pub struct DiceState {
    /// The dice.
    pub tray: Tray,
    /// Named roll presets.
    pub macros: MacroList,
    /// Success threshold.
    pub threshold: Threshold,
    /// Post-roll shake.
    pub wiggle: Wiggle,
}

impl DiceState {
    /// Creates a state around the given tray.
    pub fn with_tray(tray: Tray) -> Self {
        Self {
            tray,
            ..Self::default()
        }
    }

    /// Re-rolls every die and restarts the shake.
    pub fn roll(&mut self) {
        self.tray.roll_all();
        self.wiggle.start();
    }

    /// Adds one die. Returns `false` when the tray is full.
    pub fn add_die(&mut self) -> bool {
        self.tray.add_die()
    }

    /// Removes the most recent die. Returns `false` when the tray is empty.
    pub fn remove_die(&mut self) -> bool {
        self.tray.remove_die().is_some()
    }

    /// Applies the macro at `index`: the tray is set to the macro's amount
    /// and rolled.
    ///
    /// Faces stay six-sided; the macro's side count is informational.
    /// Returns `false` if there is no macro at `index`.
    pub fn apply_macro(&mut self, index: usize) -> bool {
        let Some(amount) = self.macros.get(index).map(|m| m.roll.amount) else {
            return false;
        };
        self.tray.roll(amount as usize);
        self.wiggle.start();
        true
    }

    /// Number of dice at or above the threshold.
    pub fn successes(&self) -> usize {
        self.tray.count_at_least(self.threshold.value())
    }

    /// Advances frame-driven effects.
    pub fn tick(&mut self, frame: Duration) {
        self.wiggle.advance(frame);
    }
}
