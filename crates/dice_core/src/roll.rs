//! Roll expressions of the form `<amount>d<sides>`.
//!
//! The grammar is strict: a run of ASCII digits, a single lowercase `d`,
//! and another run of ASCII digits, with nothing before, between or after.

use std::fmt;

/// A parsed roll request: how many dice, and how many sides each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiceRoll {
    /// Number of dice to roll.
    pub amount: u32,
    /// Number of sides per die.
    pub sides: u32,
}

impl DiceRoll {
    /// Creates a roll request.
    pub fn new(amount: u32, sides: u32) -> Self {
        Self { amount, sides }
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.amount, self.sides)
    }
}

/// Reasons a roll expression is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseRollError {
    /// No digits before the `d`.
    #[error("missing dice amount before 'd'")]
    EmptyAmount,
    /// The amount run was terminated by something other than `d`.
    #[error("expected 'd' after the dice amount")]
    MissingSeparator,
    /// No digits after the `d`.
    #[error("missing side count after 'd'")]
    EmptySides,
    /// Characters remain after the side count.
    #[error("unexpected trailing input after the side count")]
    TrailingInput,
    /// A digit run does not fit in a `u32`.
    #[error("number too large")]
    Overflow,
}

/// Parses `text` as `<digits>d<digits>`.
///
/// No whitespace, signs or repeated `d` are accepted.
///
/// ```
/// use dice_core::{parse_roll_expression, DiceRoll};
///
/// assert_eq!(parse_roll_expression("12d6"), Ok(DiceRoll::new(12, 6)));
/// assert!(parse_roll_expression("d6").is_err());
/// ```
pub fn parse_roll_expression(text: &str) -> Result<DiceRoll, ParseRollError> {
    let bytes = text.as_bytes();

    let amount_len = digit_run(bytes);
    if amount_len == 0 {
        return Err(ParseRollError::EmptyAmount);
    }
    if bytes.get(amount_len) != Some(&b'd') {
        return Err(ParseRollError::MissingSeparator);
    }

    let rest = &bytes[amount_len + 1..];
    let sides_len = digit_run(rest);
    if sides_len == 0 {
        return Err(ParseRollError::EmptySides);
    }
    if sides_len != rest.len() {
        return Err(ParseRollError::TrailingInput);
    }

    Ok(DiceRoll {
        amount: parse_digits(&bytes[..amount_len])?,
        sides: parse_digits(rest)?,
    })
}

/// Length of the leading run of ASCII digits.
fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn parse_digits(digits: &[u8]) -> Result<u32, ParseRollError> {
    digits.iter().try_fold(0u32, |acc, &b| {
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(b - b'0')))
            .ok_or(ParseRollError::Overflow)
    })
}
