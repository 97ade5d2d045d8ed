use std::fmt;
use std::sync::Arc;

use strum::{AsRefStr, Display, EnumString};

use super::VitalityState;
use crate::env::HealthEnv;
use crate::error::HealthError;
use crate::events::HealthEvent;
use crate::numeric::{Percentage, round_amount};
use crate::stats::MaxHpScaling;

/// What happens to current HP when max HP grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MaxHpIncreaseBehaviour {
    /// Current HP stays where it is.
    #[default]
    KeepHp,
    /// Current HP grows by the max-HP increase. Skipped while dead.
    AddHealthUpToMaxHp,
}

/// Handle returned when adding a flat or percentage max-HP modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaxHpModifierId(pub u32);

impl fmt::Display for MaxHpModifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "max_hp_mod#{}", self.0)
    }
}

impl VitalityState {
    // ========================================================================
    // Modifiers
    // ========================================================================

    pub fn add_max_hp_flat_modifier(
        &mut self,
        amount: i64,
        behaviour: MaxHpIncreaseBehaviour,
        env: &mut HealthEnv<'_>,
    ) -> Result<MaxHpModifierId, HealthError> {
        let id = self.allocate_modifier_id();
        self.flat_modifiers.push((id, amount));
        self.recompute_max_hp(behaviour, env)?;
        Ok(id)
    }

    pub fn add_max_hp_percentage_modifier(
        &mut self,
        percentage: Percentage,
        behaviour: MaxHpIncreaseBehaviour,
        env: &mut HealthEnv<'_>,
    ) -> Result<MaxHpModifierId, HealthError> {
        let id = self.allocate_modifier_id();
        self.percentage_modifiers.push((id, percentage));
        self.recompute_max_hp(behaviour, env)?;
        Ok(id)
    }

    /// Removes a flat or percentage modifier. Returns `false` for unknown handles.
    pub fn remove_max_hp_modifier(
        &mut self,
        id: MaxHpModifierId,
        env: &mut HealthEnv<'_>,
    ) -> Result<bool, HealthError> {
        let before = self.flat_modifiers.len() + self.percentage_modifiers.len();
        self.flat_modifiers.retain(|(existing, _)| *existing != id);
        self.percentage_modifiers.retain(|(existing, _)| *existing != id);
        let removed = before != self.flat_modifiers.len() + self.percentage_modifiers.len();
        if removed {
            self.recompute_max_hp(MaxHpIncreaseBehaviour::KeepHp, env)?;
        }
        Ok(removed)
    }

    /// Replaces the base max HP.
    pub fn set_base_max_hp(
        &mut self,
        base: i64,
        behaviour: MaxHpIncreaseBehaviour,
        env: &mut HealthEnv<'_>,
    ) -> Result<(), HealthError> {
        if base <= 0 {
            return Err(HealthError::InvalidArgument(format!(
                "max hp must be positive, got {base}"
            )));
        }
        self.base_max_hp = base;
        self.recompute_max_hp(behaviour, env)?;
        Ok(())
    }

    // ========================================================================
    // Scalings
    // ========================================================================

    pub fn add_max_hp_scaling(
        &mut self,
        scaling: Arc<dyn MaxHpScaling>,
        behaviour: MaxHpIncreaseBehaviour,
        env: &mut HealthEnv<'_>,
    ) -> Result<(), HealthError> {
        self.scalings.push(scaling);
        self.recompute_max_hp(behaviour, env)?;
        Ok(())
    }

    /// Removes a scaling previously added, matched by identity.
    pub fn remove_max_hp_scaling(
        &mut self,
        scaling: &Arc<dyn MaxHpScaling>,
        env: &mut HealthEnv<'_>,
    ) -> Result<bool, HealthError> {
        let Some(index) = self
            .scalings
            .iter()
            .position(|existing| std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(scaling)))
        else {
            return Ok(false);
        };
        self.scalings.remove(index);
        self.recompute_max_hp(MaxHpIncreaseBehaviour::KeepHp, env)?;
        Ok(true)
    }

    pub fn clear_max_hp_scalings(&mut self, env: &mut HealthEnv<'_>) -> Result<(), HealthError> {
        if self.scalings.is_empty() {
            return Ok(());
        }
        self.scalings.clear();
        self.recompute_max_hp(MaxHpIncreaseBehaviour::KeepHp, env)?;
        Ok(())
    }

    pub fn max_hp_scalings(&self) -> &[Arc<dyn MaxHpScaling>] {
        &self.scalings
    }

    // ========================================================================
    // Recomputation
    // ========================================================================

    /// Computes max HP from every contribution, including the configured
    /// attribute scaling. An entity at full health stays at full health.
    pub fn setup_max_hp(&mut self, env: &mut HealthEnv<'_>) -> Result<i64, HealthError> {
        let was_full = self.is_alive() && self.hp >= self.total_max_hp;
        let behaviour = if was_full {
            MaxHpIncreaseBehaviour::AddHealthUpToMaxHp
        } else {
            MaxHpIncreaseBehaviour::KeepHp
        };
        self.recompute_max_hp(behaviour, env)?;
        Ok(self.total_max_hp)
    }

    /// Re-reads stat-dependent contributions after stats changed.
    ///
    /// Returns whether max HP changed. Without any scaling this is a no-op.
    pub fn refresh_max_hp(&mut self, env: &mut HealthEnv<'_>) -> Result<bool, HealthError> {
        if self.scalings.is_empty() && env.config.health_attributes_scaling.is_none() {
            return Ok(false);
        }
        self.recompute_max_hp(MaxHpIncreaseBehaviour::KeepHp, env)
    }

    /// `(base + flat + scaling) * (1 + percent / 100)`, rounded once, at least 1.
    fn compute_total_max_hp(&self, env: &HealthEnv<'_>) -> i64 {
        let flat: i64 = self.flat_modifiers.iter().map(|(_, amount)| amount).sum();
        let percent: i64 = self
            .percentage_modifiers
            .iter()
            .map(|(_, percentage)| percentage.points())
            .sum();
        let scaling: f64 = self
            .scalings
            .iter()
            .chain(env.config.health_attributes_scaling.iter())
            .map(|scaling| scaling.contribution(self.entity, env.stats))
            .sum();

        let raw = (self.base_max_hp + flat) as f64 + scaling;
        round_amount(raw * (1.0 + percent as f64 / 100.0)).max(1)
    }

    /// Applies a new total. Clamping HP to a smaller total can cross the death
    /// threshold, in which case the death transition fires with no killer.
    fn recompute_max_hp(
        &mut self,
        behaviour: MaxHpIncreaseBehaviour,
        env: &mut HealthEnv<'_>,
    ) -> Result<bool, HealthError> {
        let old = self.total_max_hp;
        let new = self.compute_total_max_hp(env);
        if new == old {
            return Ok(false);
        }

        self.total_max_hp = new;
        tracing::debug!(entity = %self.entity, old, new, "max hp changed");
        env.sink.emit(HealthEvent::MaxHealthChanged {
            entity: self.entity,
            old,
            new,
        });

        if self.is_dead {
            return Ok(true);
        }
        if new > old && behaviour == MaxHpIncreaseBehaviour::AddHealthUpToMaxHp {
            self.gain_hp(new - old, env);
        }
        if self.hp > new {
            let lost = self.hp - new;
            self.hp = new;
            env.sink.emit(HealthEvent::HealthLost {
                entity: self.entity,
                amount: lost,
                hp: self.hp,
            });
            self.check_death(None, env)?;
        }
        Ok(true)
    }

    fn allocate_modifier_id(&mut self) -> MaxHpModifierId {
        let id = MaxHpModifierId(self.next_modifier_id);
        self.next_modifier_id = self.next_modifier_id.wrapping_add(1);
        id
    }
}
