//! Built-in damage steps.

mod barrier;
mod critical;
mod defense;
mod modifiers;

pub use barrier::ApplyBarrierStep;
pub use critical::ApplyCriticalMultiplierStep;
pub use defense::ApplyDefenseStep;
pub use modifiers::{ApplyDmgModifiersStep, DamageModifiersConfig};

use std::sync::Arc;

use strum::{AsRefStr, Display, EnumString};

use super::ledger::StepId;
use super::step::DamageStep;

/// Names of the built-in steps, in canonical pipeline order.
///
/// Parses case-insensitively from snake_case, e.g. `"critical_multiplier"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BuiltinStep {
    CriticalMultiplier,
    Barrier,
    Defense,
    DamageModifiers,
}

impl BuiltinStep {
    /// Canonical ordering: critical, barrier, defense, modifiers.
    pub const CANONICAL: [Self; 4] = [
        Self::CriticalMultiplier,
        Self::Barrier,
        Self::Defense,
        Self::DamageModifiers,
    ];

    /// Ledger identity of the step instance.
    pub fn step_id(self) -> StepId {
        match self {
            Self::CriticalMultiplier => ApplyCriticalMultiplierStep::ID,
            Self::Barrier => ApplyBarrierStep::ID,
            Self::Defense => ApplyDefenseStep::ID,
            Self::DamageModifiers => ApplyDmgModifiersStep::ID,
        }
    }

    pub fn instantiate(self) -> Arc<dyn DamageStep> {
        match self {
            Self::CriticalMultiplier => Arc::new(ApplyCriticalMultiplierStep),
            Self::Barrier => Arc::new(ApplyBarrierStep),
            Self::Defense => Arc::new(ApplyDefenseStep),
            Self::DamageModifiers => Arc::new(ApplyDmgModifiersStep),
        }
    }
}
