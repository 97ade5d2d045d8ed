//! Per-entity vitality: HP, max HP, barrier and the alive/dead state machine.
//!
//! All HP mutations go through the operations in this module so that the
//! death transition is evaluated after every change and fires exactly once.
//!
//! ```text
//! Alive --hp <= death_threshold--> Dead      (OnDeathStrategy::die, once)
//! Dead  --resurrect-------------> Alive
//! Dead  --take_damage-----------> Dead       (prevented, ENTITY_DEAD)
//! Dead  --heal / set_hp_to_max--> error      (DeadEntityError)
//! ```

mod damage;
mod heal;
mod life;
mod max_hp;

pub use max_hp::{MaxHpIncreaseBehaviour, MaxHpModifierId};

use std::sync::Arc;
use std::time::Duration;

use crate::damage::DamageCalculationStrategy;
use crate::entity::EntityId;
use crate::error::{DeadEntityError, HealthError};
use crate::lifecycle::{OnDeathStrategy, OnResurrectionStrategy};
use crate::numeric::Percentage;
use crate::stats::MaxHpScaling;

/// Vitality of one entity.
#[derive(Clone, Debug)]
pub struct VitalityState {
    entity: EntityId,
    name: String,
    hp: i64,
    base_max_hp: i64,
    total_max_hp: i64,
    barrier: i64,
    death_threshold: i64,
    allow_negative_hp: bool,
    is_dead: bool,
    is_immune: bool,
    flat_modifiers: Vec<(MaxHpModifierId, i64)>,
    percentage_modifiers: Vec<(MaxHpModifierId, Percentage)>,
    next_modifier_id: u32,
    scalings: Vec<Arc<dyn MaxHpScaling>>,
    strategy: Option<DamageCalculationStrategy>,
    on_death: Option<Arc<dyn OnDeathStrategy>>,
    on_resurrection: Option<Arc<dyn OnResurrectionStrategy>>,
    regen_elapsed: Duration,
}

impl VitalityState {
    pub fn builder(entity: EntityId, name: impl Into<String>) -> VitalityStateBuilder {
        VitalityStateBuilder::new(entity, name.into())
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> i64 {
        self.hp
    }

    pub fn base_max_hp(&self) -> i64 {
        self.base_max_hp
    }

    pub fn total_max_hp(&self) -> i64 {
        self.total_max_hp
    }

    pub fn missing_hp(&self) -> i64 {
        (self.total_max_hp - self.hp).max(0)
    }

    pub fn barrier(&self) -> i64 {
        self.barrier
    }

    pub fn death_threshold(&self) -> i64 {
        self.death_threshold
    }

    pub fn allows_negative_hp(&self) -> bool {
        self.allow_negative_hp
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    pub fn is_immune(&self) -> bool {
        self.is_immune
    }

    pub fn set_immune(&mut self, immune: bool) {
        self.is_immune = immune;
    }

    /// Adds to the barrier pool, which never drops below zero. Returns the new barrier.
    pub fn add_barrier(&mut self, amount: i64) -> i64 {
        self.barrier = self.barrier.saturating_add(amount).max(0);
        self.barrier
    }

    pub fn damage_strategy(&self) -> Option<&DamageCalculationStrategy> {
        self.strategy.as_ref()
    }

    /// Overrides the configured default strategy; `None` restores the default.
    pub fn set_damage_strategy(&mut self, strategy: Option<DamageCalculationStrategy>) {
        self.strategy = strategy;
    }

    pub fn set_on_death(&mut self, strategy: Option<Arc<dyn OnDeathStrategy>>) {
        self.on_death = strategy;
    }

    pub fn set_on_resurrection(&mut self, strategy: Option<Arc<dyn OnResurrectionStrategy>>) {
        self.on_resurrection = strategy;
    }

    fn ensure_alive(&self, attempted_operation: &'static str) -> Result<(), HealthError> {
        if self.is_dead {
            return Err(DeadEntityError {
                attempted_operation,
                current_hp: self.hp,
                entity_name: self.name.clone(),
            }
            .into());
        }
        Ok(())
    }
}

/// Builder for [`VitalityState`]. `max_hp` is required.
///
/// The built state has `total_max_hp == max_hp`; call
/// [`VitalityState::setup_max_hp`] once stats are available to apply scalings.
#[derive(Debug)]
pub struct VitalityStateBuilder {
    entity: EntityId,
    name: String,
    max_hp: Option<i64>,
    hp: Option<i64>,
    barrier: i64,
    death_threshold: i64,
    allow_negative_hp: bool,
    immune: bool,
    scalings: Vec<Arc<dyn MaxHpScaling>>,
    strategy: Option<DamageCalculationStrategy>,
    on_death: Option<Arc<dyn OnDeathStrategy>>,
    on_resurrection: Option<Arc<dyn OnResurrectionStrategy>>,
}

impl VitalityStateBuilder {
    fn new(entity: EntityId, name: String) -> Self {
        Self {
            entity,
            name,
            max_hp: None,
            hp: None,
            barrier: 0,
            death_threshold: 0,
            allow_negative_hp: false,
            immune: false,
            scalings: Vec::new(),
            strategy: None,
            on_death: None,
            on_resurrection: None,
        }
    }

    pub fn max_hp(mut self, max_hp: i64) -> Self {
        self.max_hp = Some(max_hp);
        self
    }

    /// Starting HP; defaults to `max_hp`.
    pub fn hp(mut self, hp: i64) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn barrier(mut self, barrier: i64) -> Self {
        self.barrier = barrier;
        self
    }

    pub fn death_threshold(mut self, threshold: i64) -> Self {
        self.death_threshold = threshold;
        self
    }

    pub fn allow_negative_hp(mut self, allow: bool) -> Self {
        self.allow_negative_hp = allow;
        self
    }

    pub fn immune(mut self, immune: bool) -> Self {
        self.immune = immune;
        self
    }

    pub fn scaling(mut self, scaling: Arc<dyn MaxHpScaling>) -> Self {
        self.scalings.push(scaling);
        self
    }

    pub fn strategy(mut self, strategy: DamageCalculationStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn on_death(mut self, strategy: Arc<dyn OnDeathStrategy>) -> Self {
        self.on_death = Some(strategy);
        self
    }

    pub fn on_resurrection(mut self, strategy: Arc<dyn OnResurrectionStrategy>) -> Self {
        self.on_resurrection = Some(strategy);
        self
    }

    pub fn build(self) -> Result<VitalityState, HealthError> {
        let max_hp = self.max_hp.ok_or(HealthError::MissingArgument("max_hp"))?;
        if max_hp <= 0 {
            return Err(HealthError::InvalidArgument(format!(
                "max hp must be positive, got {max_hp}"
            )));
        }
        if self.barrier < 0 {
            return Err(HealthError::InvalidArgument(format!(
                "barrier must not be negative, got {}",
                self.barrier
            )));
        }

        let mut hp = self.hp.unwrap_or(max_hp).min(max_hp);
        if !self.allow_negative_hp {
            hp = hp.max(self.death_threshold);
        }

        Ok(VitalityState {
            entity: self.entity,
            name: self.name,
            hp,
            base_max_hp: max_hp,
            total_max_hp: max_hp,
            barrier: self.barrier,
            death_threshold: self.death_threshold,
            allow_negative_hp: self.allow_negative_hp,
            is_dead: hp <= self.death_threshold,
            is_immune: self.immune,
            flat_modifiers: Vec::new(),
            percentage_modifiers: Vec::new(),
            next_modifier_id: 0,
            scalings: self.scalings,
            strategy: self.strategy,
            on_death: self.on_death,
            on_resurrection: self.on_resurrection,
            regen_elapsed: Duration::ZERO,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_full_hp() {
        let state = VitalityState::builder(EntityId(1), "hero")
            .max_hp(100)
            .build()
            .unwrap();

        assert_eq!(state.hp(), 100);
        assert_eq!(state.total_max_hp(), 100);
        assert!(state.is_alive());
        assert_eq!(state.missing_hp(), 0);
    }

    #[test]
    fn zero_hp_starts_dead() {
        let state = VitalityState::builder(EntityId(1), "corpse")
            .max_hp(100)
            .hp(0)
            .build()
            .unwrap();
        assert!(state.is_dead());
    }

    #[test]
    fn rejects_invalid_construction() {
        let err = VitalityState::builder(EntityId(1), "x").build().unwrap_err();
        assert_eq!(err, HealthError::MissingArgument("max_hp"));

        let err = VitalityState::builder(EntityId(1), "x")
            .max_hp(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, HealthError::InvalidArgument(_)));

        let err = VitalityState::builder(EntityId(1), "x")
            .max_hp(10)
            .barrier(-1)
            .build()
            .unwrap_err();
        assert!(matches!(err, HealthError::InvalidArgument(_)));
    }

    #[test]
    fn barrier_never_negative() {
        let mut state = VitalityState::builder(EntityId(1), "hero")
            .max_hp(100)
            .barrier(10)
            .build()
            .unwrap();

        assert_eq!(state.add_barrier(15), 25);
        assert_eq!(state.add_barrier(-40), 0);
    }
}
