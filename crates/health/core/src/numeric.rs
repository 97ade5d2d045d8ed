//! Integer rounding and percentage helpers shared by every step.
//!
//! HP and damage are integers while multipliers are floating point. All
//! conversions back to integers go through [`round_amount`], which rounds half
//! away from zero.

use core::fmt;

/// Rounds to the nearest integer, halves away from zero, saturating at the `i64` range.
///
/// Non-finite input rounds to zero.
#[inline]
pub fn round_amount(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    // `as` saturates for out-of-range floats.
    value.round() as i64
}

/// Scales `amount` by `factor` and rounds once.
#[inline]
pub fn scale_amount(amount: i64, factor: f64) -> i64 {
    round_amount(amount as f64 * factor)
}

/// Percentage expressed in percent points (`25` means 25%).
///
/// Values are not clamped: `-100` and below denote immunity for damage
/// modifiers, and values above `100` are legal for max-HP bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Percentage(pub i64);

impl Percentage {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(100);

    #[inline]
    pub const fn new(points: i64) -> Self {
        Self(points)
    }

    #[inline]
    pub const fn points(self) -> i64 {
        self.0
    }

    /// Returns the percentage as a fraction (`25%` becomes `0.25`).
    #[inline]
    pub fn fraction(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Applies the percentage to `amount`, rounding once.
    #[inline]
    pub fn of(self, amount: i64) -> i64 {
        scale_amount(amount, self.fraction())
    }
}

impl From<i64> for Percentage {
    fn from(points: i64) -> Self {
        Self(points)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
