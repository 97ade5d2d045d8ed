//! Lifesteal basis selection and per-damage-type mappings.

use std::collections::HashMap;

use strum::{AsRefStr, Display, EnumString};

use super::request::HealSource;
use crate::damage::{AmountLedger, DamageType, StepId};
use crate::stats::StatKey;

/// Which side of a step record to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepPoint {
    Pre,
    #[default]
    Post,
}

/// Picks the ledger amount a lifesteal heal is computed from.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LifestealAmountSelector {
    /// Raw amount the instance started with.
    Initial,
    /// Amount after the whole pipeline.
    #[default]
    Final,
    /// Pre or post value of a named step; falls back to `Final` when the step never ran.
    Step { step: StepId, point: StepPoint },
}

impl LifestealAmountSelector {
    pub fn step(step: StepId, point: StepPoint) -> Self {
        Self::Step { step, point }
    }

    pub fn evaluate(&self, ledger: &AmountLedger) -> i64 {
        match self {
            Self::Initial => ledger.initial(),
            Self::Final => ledger.current(),
            Self::Step { step, point } => match ledger.step_amount(step) {
                Some(amount) => match point {
                    StepPoint::Pre => amount.pre,
                    StepPoint::Post => amount.post,
                },
                None => ledger.current(),
            },
        }
    }
}

/// Lifesteal behaviour for one damage type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LifestealStatConfig {
    /// Dealer stat holding the lifesteal percentage.
    pub stat: StatKey,
    pub heal_source: HealSource,
    pub selector: LifestealAmountSelector,
}

/// Lifesteal mappings keyed by damage type name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LifestealConfig {
    mappings: HashMap<String, LifestealStatConfig>,
}

impl LifestealConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the mapping for `damage_type`.
    pub fn insert(
        &mut self,
        damage_type: &DamageType,
        config: LifestealStatConfig,
    ) -> Option<LifestealStatConfig> {
        self.mappings.insert(damage_type.name().to_owned(), config)
    }

    #[must_use]
    pub fn with(mut self, damage_type: &DamageType, config: LifestealStatConfig) -> Self {
        self.insert(damage_type, config);
        self
    }

    pub fn mapping_for(&self, damage_type: &DamageType) -> Option<&LifestealStatConfig> {
        self.mappings.get(damage_type.name())
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
