//! Defense arithmetic attached to damage types.
//!
//! A damage type may carry two functions. The defense reduction turns the
//! target's defensive stat and the dealer's piercing stat into an effective
//! defense value; the damage reduction turns the running amount and that
//! effective defense into the post-defense amount.

use std::fmt::Debug;

use crate::numeric::round_amount;

/// Maps `(amount, effective defense)` to the reduced amount.
///
/// Implementations clamp their result to `>= 0`; the defense step clamps again.
pub trait DamageReduction: Debug + Send + Sync {
    fn reduce_damage(&self, amount: i64, effective_defense: f64) -> i64;
}

/// Maps `(piercing, defense)` to the effective defense value.
pub trait DefenseReduction: Debug + Send + Sync {
    fn reduce_defense(&self, piercing: i64, defense: i64) -> f64;
}

/// `amount - defense`, floored at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlatDamageReduction;

impl DamageReduction for FlatDamageReduction {
    fn reduce_damage(&self, amount: i64, effective_defense: f64) -> i64 {
        amount.saturating_sub(round_amount(effective_defense)).max(0)
    }
}

/// Defense is a percentage of damage blocked, limited to `0..=100`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PercentageDamageReduction;

impl DamageReduction for PercentageDamageReduction {
    fn reduce_damage(&self, amount: i64, effective_defense: f64) -> i64 {
        let blocked = effective_defense.clamp(0.0, 100.0) / 100.0;
        round_amount(amount as f64 * (1.0 - blocked)).max(0)
    }
}

/// Piercing subtracts flat points of defense.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlatDefenseReduction {
    /// Keep negative effective defense instead of flooring at zero.
    pub allow_negative: bool,
}

impl DefenseReduction for FlatDefenseReduction {
    fn reduce_defense(&self, piercing: i64, defense: i64) -> f64 {
        let effective = defense.saturating_sub(piercing) as f64;
        if self.allow_negative {
            effective
        } else {
            effective.max(0.0)
        }
    }
}

/// Piercing ignores a percentage of defense; 100% or more ignores all of it.
///
/// Negative piercing increases defense.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PercentageDefenseReduction {
    pub allow_negative: bool,
}

impl DefenseReduction for PercentageDefenseReduction {
    fn reduce_defense(&self, piercing: i64, defense: i64) -> f64 {
        let pierced = (piercing as f64 / 100.0).min(1.0);
        let effective = defense as f64 * (1.0 - pierced);
        if self.allow_negative {
            effective
        } else {
            effective.max(0.0)
        }
    }
}
