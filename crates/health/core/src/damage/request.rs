use super::kind::{DamageSource, DamageType};
use crate::entity::EntityId;
use crate::error::HealthError;

/// Raw damage aimed at one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageRequest {
    pub amount: i64,
    pub damage_type: DamageType,
    pub source: DamageSource,
    pub dealer: EntityId,
    pub target: EntityId,
    pub is_critical: bool,
    pub critical_multiplier: f64,
    /// Skip the instance entirely; resolved as prevented in the pre-phase.
    pub ignore: bool,
}

impl DamageRequest {
    pub fn builder() -> DamageRequestBuilder {
        DamageRequestBuilder::default()
    }
}

/// Builder for [`DamageRequest`].
///
/// `amount`, `damage_type`, `source`, `dealer` and `target` are required.
#[derive(Debug, Default)]
pub struct DamageRequestBuilder {
    amount: Option<i64>,
    damage_type: Option<DamageType>,
    source: Option<DamageSource>,
    dealer: Option<EntityId>,
    target: Option<EntityId>,
    critical_multiplier: Option<f64>,
    ignore: bool,
}

impl DamageRequestBuilder {
    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }

    pub fn source(mut self, source: DamageSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn dealer(mut self, dealer: EntityId) -> Self {
        self.dealer = Some(dealer);
        self
    }

    pub fn target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// Marks the hit critical with the given multiplier.
    pub fn critical(mut self, multiplier: f64) -> Self {
        self.critical_multiplier = Some(multiplier);
        self
    }

    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn build(self) -> Result<DamageRequest, HealthError> {
        Ok(DamageRequest {
            amount: self.amount.ok_or(HealthError::MissingArgument("amount"))?,
            damage_type: self
                .damage_type
                .ok_or(HealthError::MissingArgument("damage_type"))?,
            source: self.source.ok_or(HealthError::MissingArgument("source"))?,
            dealer: self.dealer.ok_or(HealthError::MissingArgument("dealer"))?,
            target: self.target.ok_or(HealthError::MissingArgument("target"))?,
            is_critical: self.critical_multiplier.is_some(),
            critical_multiplier: self.critical_multiplier.unwrap_or(1.0),
            ignore: self.ignore,
        })
    }
}
