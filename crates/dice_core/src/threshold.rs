//! Success threshold edited as free text.

use crate::tray::DIE_SIDES;

/// Default threshold value.
pub const DEFAULT_THRESHOLD: u8 = 3;

/// Validation failures for threshold text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ThresholdError {
    /// The text is not a non-zero integer.
    #[error("Please provide a valid number")]
    NotANumber,
    /// The integer is outside `1..=6`.
    #[error("Please provide number between 1 and 6")]
    OutOfRange,
}

/// A face value in `1..=6` along with the text buffer it is edited in.
///
/// The value only changes when the text validates; otherwise the last good
/// value is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Threshold {
    value: u8,
    text: String,
}

impl Threshold {
    /// Current threshold.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Text as last entered.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text and, if valid, the value.
    pub fn update_from_text(&mut self, text: &str) -> Result<u8, ThresholdError> {
        self.text = text.to_string();
        let parsed: i64 = text.trim().parse().map_err(|_| ThresholdError::NotANumber)?;
        match parsed {
            0 => Err(ThresholdError::NotANumber),
            n if !(1..=i64::from(DIE_SIDES)).contains(&n) => Err(ThresholdError::OutOfRange),
            n => {
                self.value = n as u8;
                Ok(self.value)
            }
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            value: DEFAULT_THRESHOLD,
            text: DEFAULT_THRESHOLD.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three() {
        let t = Threshold::default();
        assert_eq!(t.value(), 3);
        assert_eq!(t.text(), "3");
    }

    #[test]
    fn valid_text_updates_value() {
        let mut t = Threshold::default();
        assert_eq!(t.update_from_text("5"), Ok(5));
        assert_eq!(t.value(), 5);
    }

    #[test]
    fn garbage_keeps_previous_value() {
        let mut t = Threshold::default();
        assert_eq!(t.update_from_text("abc"), Err(ThresholdError::NotANumber));
        assert_eq!(t.update_from_text("0"), Err(ThresholdError::NotANumber));
        assert_eq!(t.update_from_text(""), Err(ThresholdError::NotANumber));
        assert_eq!(t.value(), 3);
        assert_eq!(t.text(), "");
    }

    #[test]
    fn out_of_range_keeps_previous_value() {
        let mut t = Threshold::default();
        assert_eq!(t.update_from_text("7"), Err(ThresholdError::OutOfRange));
        assert_eq!(t.update_from_text("-2"), Err(ThresholdError::OutOfRange));
        assert_eq!(t.value(), 3);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ThresholdError::OutOfRange.to_string(),
            "Please provide number between 1 and 6"
        );
        assert_eq!(
            ThresholdError::NotANumber.to_string(),
            "Please provide a valid number"
        );
    }
}
