use std::time::Duration;

use super::VitalityState;
use crate::entity::EntityId;
use crate::env::HealthEnv;
use crate::error::HealthError;
use crate::events::HealthEvent;
use crate::lifecycle::{DeathContext, ResurrectAmount, ResurrectionContext};

impl VitalityState {
    /// Brings a dead entity back with the requested HP, clamped to total max HP.
    ///
    /// Returns the HP after resurrection. Fails with `InvalidOperation` when the
    /// entity is alive and with `InvalidArgument` when the resolved HP would not
    /// lift the entity above its death threshold.
    pub fn resurrect(
        &mut self,
        amount: ResurrectAmount,
        env: &mut HealthEnv<'_>,
    ) -> Result<i64, HealthError> {
        if !self.is_dead {
            return Err(HealthError::InvalidOperation {
                entity_name: self.name.clone(),
                message: "entity is already alive",
            });
        }

        let hp = amount.resolve(self.total_max_hp).min(self.total_max_hp);
        if hp <= self.death_threshold {
            return Err(HealthError::InvalidArgument(format!(
                "resurrection hp {hp} does not exceed death threshold {}",
                self.death_threshold
            )));
        }

        let before = self.hp;
        self.hp = hp;
        self.is_dead = false;
        self.regen_elapsed = Duration::ZERO;
        tracing::info!(entity = %self.entity, name = %self.name, hp, "entity resurrected");

        let config = env.config;
        env.sink.emit(HealthEvent::Resurrected {
            entity: self.entity,
            hp,
            source: config.resurrection_source.clone(),
        });
        if hp > before {
            env.sink.emit(HealthEvent::HealthGained {
                entity: self.entity,
                amount: hp - before,
                hp,
            });
        }

        let strategy = self.on_resurrection.as_ref().unwrap_or(&config.on_resurrection);
        strategy.on_resurrect(&ResurrectionContext {
            entity: self.entity,
            entity_name: &self.name,
            hp,
        })?;
        Ok(hp)
    }

    /// Fires the death transition if HP is at or below the threshold.
    ///
    /// Returns `true` only on the transition itself; an already dead entity
    /// never fires again.
    pub(super) fn check_death(
        &mut self,
        killer: Option<EntityId>,
        env: &mut HealthEnv<'_>,
    ) -> Result<bool, HealthError> {
        if self.is_dead || self.hp > self.death_threshold {
            return Ok(false);
        }

        self.is_dead = true;
        self.regen_elapsed = Duration::ZERO;
        tracing::info!(
            entity = %self.entity,
            name = %self.name,
            hp = self.hp,
            killer = ?killer,
            "entity died"
        );
        env.sink.emit(HealthEvent::Died {
            entity: self.entity,
            killer,
        });

        let config = env.config;
        let strategy = self.on_death.as_ref().unwrap_or(&config.on_death);
        strategy.die(&DeathContext {
            entity: self.entity,
            entity_name: &self.name,
            killer,
            hp: self.hp,
        })?;
        Ok(true)
    }
}
