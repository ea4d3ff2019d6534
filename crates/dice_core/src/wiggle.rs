//! Decaying shake applied to the dice right after a roll.

use std::time::Duration;

/// How long the shake lasts, in milliseconds.
pub const MAX_WIGGLE_MS: f32 = 300.0;

/// Angular speed of the shake, in radians per second.
const WIGGLE_SPEED: f32 = 40.0;

/// Elapsed-time counter driving the shake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wiggle {
    elapsed_ms: f32,
}

impl Wiggle {
    /// Restarts the shake.
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Advances the counter by one frame. Stops counting once expired.
    pub fn advance(&mut self, frame: Duration) {
        if self.is_active() {
            self.elapsed_ms += frame.as_secs_f32() * 1000.0;
        }
    }

    /// Returns `true` while the shake is still decaying.
    pub fn is_active(&self) -> bool {
        self.elapsed_ms < MAX_WIGGLE_MS
    }

    /// Horizontal offset at wall-clock `time_s`, scaled by `amplitude`.
    ///
    /// Amplitude decays linearly to zero over [`MAX_WIGGLE_MS`].
    pub fn offset(&self, time_s: f32, amplitude: f32) -> i32 {
        if !self.is_active() {
            return 0;
        }
        let decay = 1.0 - self.elapsed_ms / MAX_WIGGLE_MS;
        ((time_s * WIGGLE_SPEED).sin() * amplitude * decay) as i32
    }
}

impl Default for Wiggle {
    fn default() -> Self {
        Self {
            elapsed_ms: MAX_WIGGLE_MS + 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_expired() {
        let w = Wiggle::default();
        assert!(!w.is_active());
        assert_eq!(w.offset(0.04, 20.0), 0);
    }

    #[test]
    fn start_then_decay() {
        let mut w = Wiggle::default();
        w.start();
        assert!(w.is_active());
        w.advance(Duration::from_millis(150));
        assert!(w.is_active());
        w.advance(Duration::from_millis(200));
        assert!(!w.is_active());
    }

    #[test]
    fn offset_is_bounded_by_amplitude() {
        let mut w = Wiggle::default();
        w.start();
        for step in 0..100 {
            let off = w.offset(step as f32 * 0.013, 3.0);
            assert!(off.abs() <= 3);
        }
    }

    #[test]
    fn offset_shrinks_as_time_passes() {
        let mut w = Wiggle::default();
        w.start();
        // sin(40 * t) == 1 at t = pi / 80
        let peak = std::f32::consts::PI / 80.0;
        let early = w.offset(peak, 20.0);
        w.advance(Duration::from_millis(240));
        let late = w.offset(peak, 20.0);
        assert!(early > late);
        assert!(late >= 0);
    }
}
