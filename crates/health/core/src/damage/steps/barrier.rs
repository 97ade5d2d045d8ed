use crate::damage::context::DamageContext;
use crate::damage::ledger::StepId;
use crate::damage::step::{DamageStep, StepEnv, StepOutput};

/// Consumes the target's barrier before HP.
///
/// `consumed = min(current, barrier)`, so the barrier never drops below zero.
/// Full absorption terminates with the generic pipeline reason.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApplyBarrierStep;

impl ApplyBarrierStep {
    pub const ID: StepId = StepId::from_static("apply_barrier");
}

impl DamageStep for ApplyBarrierStep {
    fn id(&self) -> StepId {
        Self::ID
    }

    fn compute(&self, ctx: &DamageContext, env: &mut StepEnv<'_>) -> StepOutput {
        let current = ctx.amounts().current();
        if ctx.damage_type().ignores_barrier() {
            return StepOutput::amount(current);
        }

        let consumed = current.min(*env.barrier).max(0);
        *env.barrier -= consumed;
        StepOutput::amount(current - consumed)
    }
}
