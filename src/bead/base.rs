//! Numeric base (radix) of the abacus.
//!
//! The base is always kept inside `[2, 16]`. Every constructor clamps rather
//! than rejects, so a `Base` value is valid by construction.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A radix in the range `[Base::MIN, Base::MAX]`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Base(u8);

impl Base {
    /// Smallest supported base (binary).
    pub const MIN: u8 = 2;

    /// Largest supported base (hexadecimal).
    pub const MAX: u8 = 16;

    /// Base ten.
    pub const DECIMAL: Base = Base(10);

    /// Create a base, clamping `radix` into `[2, 16]`.
    #[inline]
    pub fn new(radix: u8) -> Self {
        Self(radix.clamp(Self::MIN, Self::MAX))
    }

    /// The radix as a plain integer.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Beads on every row: `base - 1`.
    #[inline]
    pub const fn beads_per_row(self) -> u8 {
        self.0 - 1
    }

    /// The next base up, saturating at 16.
    pub fn incremented(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    /// The next base down, saturating at 2.
    pub fn decremented(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    /// Is this the largest supported base?
    #[inline]
    pub const fn is_max(self) -> bool {
        self.0 >= Self::MAX
    }

    /// Is this the smallest supported base?
    #[inline]
    pub const fn is_min(self) -> bool {
        self.0 <= Self::MIN
    }

    /// Render a single digit (`0..base`) as a character: `0-9`, then `a-f`.
    ///
    /// Digits at or above the base render as `?`.
    pub fn digit_char(self, digit: u8) -> char {
        if digit >= self.0 {
            return '?';
        }
        char::from_digit(digit as u32, self.0 as u32).unwrap_or('?')
    }

    /// Format a value in this base, most significant digit first.
    pub fn format_value(self, mut value: u64) -> String {
        if value == 0 {
            return "0".to_string();
        }

        let radix = self.0 as u64;
        let mut digits = Vec::new();
        while value > 0 {
            digits.push(self.digit_char((value % radix) as u8));
            value /= radix;
        }
        digits.iter().rev().collect()
    }
}

impl Default for Base {
    fn default() -> Self {
        Self::DECIMAL
    }
}

impl From<u8> for Base {
    fn from(radix: u8) -> Self {
        Self::new(radix)
    }
}

impl From<Base> for u8 {
    fn from(base: Base) -> Self {
        base.0
    }
}

impl fmt::Debug for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Base({})", self.0)
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
