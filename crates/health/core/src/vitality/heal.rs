use std::time::Duration;

use super::VitalityState;
use crate::env::HealthEnv;
use crate::error::HealthError;
use crate::events::HealthEvent;
use crate::heal::{HealRequest, HealResolution, resolve_heal_amount};

impl VitalityState {
    /// Heals the entity, capped at total max HP.
    ///
    /// Fails with [`crate::DeadEntityError`] when the entity is dead. Ignored
    /// requests and non-positive amounts resolve with nothing gained.
    pub fn heal(
        &mut self,
        request: &HealRequest,
        env: &mut HealthEnv<'_>,
    ) -> Result<HealResolution, HealthError> {
        self.ensure_alive("Heal")?;
        env.sink.emit(HealthEvent::PreHeal {
            entity: self.entity,
            request: request.clone(),
        });

        let amount = if request.ignore {
            0
        } else {
            let config = env.config;
            resolve_heal_amount(
                request,
                self.entity,
                env.stats,
                config.heal_amount_modifier_stat.as_ref(),
            )
        };
        let gained = self.gain_hp(amount, env);

        let resolution = HealResolution {
            entity: self.entity,
            source: request.source.clone(),
            healer: request.healer,
            requested: request.amount,
            amount,
            gained,
            hp_after: self.hp,
        };
        tracing::debug!(
            entity = %self.entity,
            source = %resolution.source,
            amount,
            gained,
            hp = self.hp,
            "healed"
        );
        env.sink.emit(HealthEvent::Healed(resolution.clone()));
        Ok(resolution)
    }

    /// Restores HP to total max HP. Returns the HP gained.
    pub fn set_hp_to_max(&mut self, env: &mut HealthEnv<'_>) -> Result<i64, HealthError> {
        self.ensure_alive("SetHpToMax")?;
        Ok(self.gain_hp(self.missing_hp(), env))
    }

    /// Advances passive regeneration by `elapsed`.
    ///
    /// Heals `stat * ticks` for every whole interval accumulated. Dead entities
    /// do not regenerate and lose their accumulated time.
    pub fn advance_regeneration(
        &mut self,
        elapsed: Duration,
        env: &mut HealthEnv<'_>,
    ) -> Result<Option<HealResolution>, HealthError> {
        let config = env.config;
        let Some(regeneration) = config.passive_regeneration.as_ref() else {
            return Ok(None);
        };
        if self.is_dead {
            self.regen_elapsed = Duration::ZERO;
            return Ok(None);
        }
        if regeneration.interval.is_zero() {
            tracing::warn!(entity = %self.entity, "passive regeneration interval is zero");
            return Ok(None);
        }

        self.regen_elapsed = self.regen_elapsed.saturating_add(elapsed);
        let ticks = self.regen_elapsed.as_nanos() / regeneration.interval.as_nanos();
        if ticks == 0 {
            return Ok(None);
        }
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        self.regen_elapsed = self
            .regen_elapsed
            .saturating_sub(regeneration.interval.saturating_mul(ticks));

        let per_tick = env.stats.get(self.entity, &regeneration.stat);
        let amount = per_tick.saturating_mul(i64::from(ticks));
        if amount <= 0 {
            return Ok(None);
        }

        let request = HealRequest::builder()
            .amount(amount)
            .source(regeneration.source.clone())
            .healer(self.entity)
            .build()?;
        self.heal(&request, env).map(Some)
    }

    /// Heals by the manual regeneration stat.
    ///
    /// Fails like [`VitalityState::heal`] when dead; `None` when no stat is
    /// configured or the stat is not positive.
    pub fn regenerate(
        &mut self,
        env: &mut HealthEnv<'_>,
    ) -> Result<Option<HealResolution>, HealthError> {
        self.ensure_alive("Regenerate")?;
        let config = env.config;
        let Some(stat) = config.manual_regeneration_stat.as_ref() else {
            return Ok(None);
        };
        let amount = env.stats.get(self.entity, stat);
        if amount <= 0 {
            return Ok(None);
        }

        let request = HealRequest::builder()
            .amount(amount)
            .source(config.manual_regeneration_source.clone())
            .healer(self.entity)
            .build()?;
        self.heal(&request, env).map(Some)
    }

    /// Adds HP up to total max HP and returns the amount gained.
    pub(super) fn gain_hp(&mut self, amount: i64, env: &mut HealthEnv<'_>) -> i64 {
        if amount <= 0 || self.hp >= self.total_max_hp {
            return 0;
        }
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.total_max_hp);

        let gained = self.hp - before;
        env.sink.emit(HealthEvent::HealthGained {
            entity: self.entity,
            amount: gained,
            hp: self.hp,
        });
        gained
    }
}
