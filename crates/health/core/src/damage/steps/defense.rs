use crate::damage::context::DamageContext;
use crate::damage::ledger::StepId;
use crate::damage::prevention::PreventionReasons;
use crate::damage::step::{DamageStep, StepEnv, StepOutput};

/// Applies the damage type's defense functions.
///
/// The defensive stat is read from the target and the piercing stat from the
/// dealer. Without a damage-reduction function the step is a no-op. When the
/// defense drives the amount to zero the reason is `DEFENSE_ABSORBED`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApplyDefenseStep;

impl ApplyDefenseStep {
    pub const ID: StepId = StepId::from_static("apply_defense");
}

impl DamageStep for ApplyDefenseStep {
    fn id(&self) -> StepId {
        Self::ID
    }

    fn compute(&self, ctx: &DamageContext, env: &mut StepEnv<'_>) -> StepOutput {
        let current = ctx.amounts().current();
        let damage_type = ctx.damage_type();
        let Some(damage_reduction) = damage_type.damage_reduction() else {
            return StepOutput::amount(current);
        };

        let defense = damage_type
            .reduced_by()
            .map_or(0, |stat| env.stats.get(ctx.target(), stat));
        let piercing = damage_type
            .pierced_by()
            .map_or(0, |stat| env.stats.get(ctx.dealer(), stat));
        let effective_defense = match damage_type.defense_reduction() {
            Some(reduction) => reduction.reduce_defense(piercing, defense),
            None => defense as f64,
        };

        let post = damage_reduction
            .reduce_damage(current, effective_defense)
            .max(0);
        tracing::debug!(
            damage_type = %damage_type,
            defense,
            piercing,
            effective_defense,
            pre = current,
            post,
            "defense applied"
        );

        let output = StepOutput::amount(post);
        if post == 0 {
            output.with_reason(PreventionReasons::DEFENSE_ABSORBED)
        } else {
            output
        }
    }
}
