//! The dice tray: a bounded collection of six-sided dice.
//!
//! Face values are drawn uniformly from `1..=6`. When sorted mode is on,
//! every roll or membership change stably reorders the whole tray so that
//! face values are non-increasing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

/// Maximum number of dice the tray can hold.
pub const MAX_DICE: usize = 1024;

/// Number of faces on every die in the tray.
pub const DIE_SIDES: u8 = 6;

/// A single die showing one face value in `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Die {
    /// The face currently showing.
    pub value: u8,
}

/// A collection of dice plus the random source used to roll them.
#[derive(Clone, Debug)]
pub struct Tray {
    dice: Vec<Die>,
    sorted: bool,
    rng: StdRng,
}

impl Tray {
    /// Creates an empty tray seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates an empty tray with a deterministic seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Creates an empty tray around an existing random source.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            dice: Vec::new(),
            sorted: false,
            rng,
        }
    }

    /// The dice in display order.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Number of dice on the tray.
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    /// Returns `true` if the tray holds no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Returns `true` if sorted mode is on.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Turns sorted mode on or off. Turning it on sorts immediately.
    pub fn set_sorted(&mut self, sorted: bool) {
        self.sorted = sorted;
        self.sort_if_needed();
    }

    /// Flips sorted mode and returns the new setting.
    pub fn toggle_sorted(&mut self) -> bool {
        self.set_sorted(!self.sorted);
        self.sorted
    }

    /// Sum of all face values.
    pub fn sum(&self) -> u32 {
        self.dice.iter().map(|d| u32::from(d.value)).sum()
    }

    /// Number of dice showing `threshold` or more.
    pub fn count_at_least(&self, threshold: u8) -> usize {
        self.dice.iter().filter(|d| d.value >= threshold).count()
    }

    /// Re-rolls every die currently on the tray.
    pub fn roll_all(&mut self) {
        let rng = &mut self.rng;
        for die in &mut self.dice {
            die.value = rng.gen_range(1..=DIE_SIDES);
        }
        self.sort_if_needed();
    }

    /// Replaces the tray contents with `n` freshly rolled dice.
    ///
    /// `n` is clamped to [`MAX_DICE`].
    pub fn roll(&mut self, n: usize) {
        let n = if n > MAX_DICE {
            warn!(requested = n, max = MAX_DICE, "dice count clamped to the tray capacity");
            MAX_DICE
        } else {
            n
        };
        self.dice.clear();
        for _ in 0..n {
            let value = self.draw();
            self.dice.push(Die { value });
        }
        self.sort_if_needed();
    }

    /// Appends one freshly rolled die.
    ///
    /// Returns `false` and leaves the tray untouched when it is full.
    pub fn add_die(&mut self) -> bool {
        if self.dice.len() >= MAX_DICE {
            warn!(max = MAX_DICE, "dice count has reached the maximum amount");
            return false;
        }
        let value = self.draw();
        self.dice.push(Die { value });
        self.sort_if_needed();
        true
    }

    /// Drops the most recently added die, if any.
    pub fn remove_die(&mut self) -> Option<Die> {
        let removed = self.dice.pop();
        if removed.is_some() {
            self.sort_if_needed();
        }
        removed
    }

    fn draw(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_SIDES)
    }

    fn sort_if_needed(&mut self) {
        if self.sorted {
            self.dice.sort_by(|a, b| b.value.cmp(&a.value));
        }
    }
}

impl Default for Tray {
    fn default() -> Self {
        Self::new()
    }
}
