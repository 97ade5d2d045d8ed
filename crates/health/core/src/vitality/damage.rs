use super::VitalityState;
use crate::damage::{
    DamageContext, DamageRequest, DamageResolution, LifestealClaim, PreventionReasons, StepEnv,
};
use crate::env::HealthEnv;
use crate::error::HealthError;
use crate::events::HealthEvent;
use crate::heal::HealRequest;
use crate::numeric::Percentage;

impl VitalityState {
    /// Resolves a damage request against this entity.
    ///
    /// Pre-phase checks run in order (dead, ignored, non-positive amount,
    /// immune) and short-circuit without touching the pipeline. Otherwise the
    /// entity's strategy, or the configured default, runs; the final amount is
    /// removed from HP and the death transition is evaluated.
    ///
    /// A lifesteal mapping for the damage type yields a [`LifestealClaim`] on
    /// the resolution. Applying it to the dealer is the caller's job;
    /// [`crate::Roster::take_damage`] does so.
    pub fn take_damage(
        &mut self,
        request: &DamageRequest,
        env: &mut HealthEnv<'_>,
    ) -> Result<DamageResolution, HealthError> {
        if request.target != self.entity {
            return Err(HealthError::InvalidArgument(format!(
                "damage aimed at {} delivered to {}",
                request.target, self.entity
            )));
        }

        env.sink.emit(HealthEvent::PreDamage {
            entity: self.entity,
            request: request.clone(),
        });

        let hp_before = self.hp;
        let barrier_before = self.barrier;
        let mut ctx = DamageContext::new(request);

        if let Some(reason) = self.pre_phase_reason(request) {
            tracing::debug!(
                entity = %self.entity,
                reason = ?reason,
                amount = request.amount,
                "damage prevented before pipeline"
            );
            ctx.prevent_pre_phase(reason);
            return Ok(self.finish_damage(ctx, hp_before, barrier_before, false, None, env));
        }

        let config = env.config;
        let strategy = self.strategy.as_ref().unwrap_or(&config.default_strategy);
        let mut step_env = StepEnv {
            stats: env.stats,
            modifiers: Some(&config.modifiers),
            barrier: &mut self.barrier,
        };
        strategy.calculate(&mut ctx, &mut step_env);

        let dealt = ctx.amounts().current().max(0);
        if dealt > 0 {
            self.lose_hp(dealt, env);
        }
        let killed = self.check_death(Some(request.dealer), env)?;
        let lifesteal = self.lifesteal_claim(&ctx, env);

        Ok(self.finish_damage(ctx, hp_before, barrier_before, killed, lifesteal, env))
    }

    fn pre_phase_reason(&self, request: &DamageRequest) -> Option<PreventionReasons> {
        if self.is_dead {
            Some(PreventionReasons::ENTITY_DEAD)
        } else if request.ignore {
            Some(PreventionReasons::PRE_PHASE_IGNORED)
        } else if request.amount <= 0 {
            Some(PreventionReasons::PRE_PHASE_ZERO_AMOUNT)
        } else if self.is_immune {
            Some(PreventionReasons::ENTITY_IMMUNE)
        } else {
            None
        }
    }

    /// Removes HP, flooring at the death threshold unless negative HP is allowed.
    pub(super) fn lose_hp(&mut self, amount: i64, env: &mut HealthEnv<'_>) {
        let before = self.hp;
        let mut after = self.hp.saturating_sub(amount);
        if !self.allow_negative_hp {
            after = after.max(self.death_threshold.min(before));
        }
        self.hp = after;

        let lost = before - after;
        if lost > 0 {
            env.sink.emit(HealthEvent::HealthLost {
                entity: self.entity,
                amount: lost,
                hp: self.hp,
            });
        }
    }

    fn lifesteal_claim(&self, ctx: &DamageContext, env: &HealthEnv<'_>) -> Option<LifestealClaim> {
        let mapping = env.config.lifesteal.mapping_for(ctx.damage_type())?;
        let basis = mapping.selector.evaluate(ctx.amounts());
        let percentage = Percentage(env.stats.get(ctx.dealer(), &mapping.stat));
        let amount = percentage.of(basis);
        if amount <= 0 {
            tracing::trace!(dealer = %ctx.dealer(), basis, %percentage, "no lifesteal");
            return None;
        }

        Some(LifestealClaim {
            dealer: ctx.dealer(),
            basis,
            percentage,
            request: HealRequest {
                amount,
                source: mapping.heal_source.clone(),
                healer: Some(ctx.dealer()),
                is_critical: false,
                critical_multiplier: 1.0,
                ignore: false,
            },
            applied: None,
        })
    }

    fn finish_damage(
        &self,
        ctx: DamageContext,
        hp_before: i64,
        barrier_before: i64,
        killed: bool,
        lifesteal: Option<LifestealClaim>,
        env: &mut HealthEnv<'_>,
    ) -> DamageResolution {
        let resolution = DamageResolution {
            entity: self.entity,
            outcome: ctx.outcome(),
            reasons: ctx.reasons(),
            context: ctx,
            hp_before,
            hp_after: self.hp,
            barrier_before,
            barrier_after: self.barrier,
            killed,
            lifesteal,
        };
        env.sink
            .emit(HealthEvent::DamageResolved(Box::new(resolution.clone())));
        resolution
    }
}

#[cfg(test)]
mod tests {
    use crate::damage::{DamageOutcome, DamageRequest, DamageSource, DamageType, PreventionReasons};
    use crate::entity::EntityId;
    use crate::env::HealthEnv;
    use crate::error::HealthError;
    use crate::events::EventLog;
    use crate::stats::NoStats;
    use crate::vitality::VitalityState;
    use crate::HealthConfig;

    fn hit(amount: i64, target: EntityId) -> DamageRequest {
        DamageRequest::builder()
            .amount(amount)
            .damage_type(DamageType::new("physical"))
            .source(DamageSource::new("melee"))
            .dealer(EntityId(9))
            .target(target)
            .build()
            .unwrap()
    }

    fn entity() -> VitalityState {
        VitalityState::builder(EntityId(1), "target")
            .max_hp(100)
            .build()
            .unwrap()
    }

    #[test]
    fn pre_phase_order() {
        let config = HealthConfig::default();
        let mut log = EventLog::new();
        let mut env = HealthEnv::new(&NoStats, &config, &mut log);

        let mut state = entity();
        let mut ignored = hit(0, EntityId(1));
        ignored.ignore = true;
        let res = state.take_damage(&ignored, &mut env).unwrap();
        assert_eq!(res.reasons, PreventionReasons::PRE_PHASE_IGNORED);

        let res = state.take_damage(&hit(0, EntityId(1)), &mut env).unwrap();
        assert_eq!(res.reasons, PreventionReasons::PRE_PHASE_ZERO_AMOUNT);

        state.set_immune(true);
        let res = state.take_damage(&hit(10, EntityId(1)), &mut env).unwrap();
        assert_eq!(res.reasons, PreventionReasons::ENTITY_IMMUNE);
        assert_eq!(res.outcome, DamageOutcome::Prevented);
        assert!(res.termination_step().is_none());
        assert!(res.context.amounts().records().is_empty());
        assert_eq!(state.hp(), 100);
    }

    #[test]
    fn rejects_misaddressed_request() {
        let config = HealthConfig::default();
        let mut log = EventLog::new();
        let mut env = HealthEnv::new(&NoStats, &config, &mut log);

        let err = entity().take_damage(&hit(10, EntityId(2)), &mut env).unwrap_err();
        assert!(matches!(err, HealthError::InvalidArgument(_)));
        assert!(log.is_empty());
    }

    #[test]
    fn overkill_clamps_to_threshold() {
        let config = HealthConfig::default();
        let mut log = EventLog::new();
        let mut env = HealthEnv::new(&NoStats, &config, &mut log);

        let mut state = entity();
        let res = state.take_damage(&hit(250, EntityId(1)), &mut env).unwrap();

        assert_eq!(state.hp(), 0);
        assert!(state.is_dead());
        assert!(res.killed);
        assert_eq!(res.hp_lost(), 100);
        assert_eq!(
            log.kinds(),
            vec!["pre_damage", "health_lost", "died", "damage_resolved"]
        );
    }

    #[test]
    fn negative_hp_allowed_is_unbounded() {
        let config = HealthConfig::default();
        let mut log = EventLog::new();
        let mut env = HealthEnv::new(&NoStats, &config, &mut log);

        let mut state = VitalityState::builder(EntityId(1), "target")
            .max_hp(100)
            .death_threshold(-9999)
            .allow_negative_hp(true)
            .build()
            .unwrap();
        state.take_damage(&hit(500, EntityId(1)), &mut env).unwrap();

        assert_eq!(state.hp(), -400);
        assert!(state.is_alive());
    }
}
