//! Panel widgets.
//!
//! Each module holds a stateless function drawing one panel of the shell
//! into a buffer area.

pub mod control_panel;
pub mod dice_area;
pub mod input_line;
pub mod status_bar;
