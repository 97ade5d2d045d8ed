use std::fmt;

use crate::entity::EntityId;
use crate::error::HealthError;

/// Origin of a heal (potion, lifesteal, regeneration ...). Compared by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HealSource {
    name: String,
}

impl HealSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for HealSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Heal aimed at one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct HealRequest {
    pub amount: i64,
    pub source: HealSource,
    pub healer: Option<EntityId>,
    pub is_critical: bool,
    pub critical_multiplier: f64,
    pub ignore: bool,
}

impl HealRequest {
    pub fn builder() -> HealRequestBuilder {
        HealRequestBuilder::default()
    }
}

/// Builder for [`HealRequest`]; `amount` and `source` are required.
#[derive(Debug, Default)]
pub struct HealRequestBuilder {
    amount: Option<i64>,
    source: Option<HealSource>,
    healer: Option<EntityId>,
    critical_multiplier: Option<f64>,
    ignore: bool,
}

impl HealRequestBuilder {
    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn source(mut self, source: HealSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn healer(mut self, healer: EntityId) -> Self {
        self.healer = Some(healer);
        self
    }

    pub fn critical(mut self, multiplier: f64) -> Self {
        self.critical_multiplier = Some(multiplier);
        self
    }

    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn build(self) -> Result<HealRequest, HealthError> {
        Ok(HealRequest {
            amount: self.amount.ok_or(HealthError::MissingArgument("amount"))?,
            source: self.source.ok_or(HealthError::MissingArgument("source"))?,
            healer: self.healer,
            is_critical: self.critical_multiplier.is_some(),
            critical_multiplier: self.critical_multiplier.unwrap_or(1.0),
            ignore: self.ignore,
        })
    }
}
