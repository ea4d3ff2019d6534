//! In-memory dice state for the dice tray application.
//!
//! Everything here is pure data manipulation with no I/O: the [`Tray`] of
//! six-sided dice, the `NdS` roll expression parser, named roll [`Macro`]s,
//! the success [`Threshold`] and the decaying [`Wiggle`] effect timer. The
//! [`DiceState`] struct owns all of it and is passed by reference through
//! the presentation loop.

#![warn(missing_docs)]

pub mod macros;
pub mod roll;
pub mod state;
pub mod threshold;
pub mod tray;
pub mod wiggle;

pub use macros::{Macro, MacroError, MacroList};
pub use roll::{parse_roll_expression, DiceRoll, ParseRollError};
pub use state::DiceState;
pub use threshold::{Threshold, ThresholdError};
pub use tray::{Die, Tray, DIE_SIDES, MAX_DICE};
pub use wiggle::{Wiggle, MAX_WIGGLE_MS};
