use crate::damage::context::DamageContext;
use crate::damage::ledger::StepId;
use crate::damage::step::{DamageStep, StepEnv, StepOutput};
use crate::numeric::scale_amount;

/// Multiplies the running amount by the critical multiplier on critical hits.
///
/// A multiplier that is not finite or not positive means no critical is
/// applied; the step still records a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApplyCriticalMultiplierStep;

impl ApplyCriticalMultiplierStep {
    pub const ID: StepId = StepId::from_static("apply_critical_multiplier");
}

impl DamageStep for ApplyCriticalMultiplierStep {
    fn id(&self) -> StepId {
        Self::ID
    }

    fn compute(&self, ctx: &DamageContext, _env: &mut StepEnv<'_>) -> StepOutput {
        let current = ctx.amounts().current();
        let multiplier = ctx.critical_multiplier();
        if ctx.is_critical() && multiplier.is_finite() && multiplier > 0.0 {
            StepOutput::amount(scale_amount(current, multiplier))
        } else {
            StepOutput::amount(current)
        }
    }
}
