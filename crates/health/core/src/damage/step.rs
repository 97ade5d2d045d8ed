use std::fmt::Debug;

use super::context::DamageContext;
use super::ledger::StepId;
use super::prevention::PreventionReasons;
use super::steps::DamageModifiersConfig;
use crate::stats::StatProvider;

/// Collaborators a step may read or mutate while it runs.
pub struct StepEnv<'a> {
    pub stats: &'a dyn StatProvider,
    /// Modifier stat mappings; `None` turns the modifiers step into a no-op.
    pub modifiers: Option<&'a DamageModifiersConfig>,
    /// Target's barrier pool. Only the barrier step consumes it.
    pub barrier: &'a mut i64,
}

impl<'a> StepEnv<'a> {
    pub fn new(stats: &'a dyn StatProvider, barrier: &'a mut i64) -> Self {
        Self {
            stats,
            modifiers: None,
            barrier,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: &'a DamageModifiersConfig) -> Self {
        self.modifiers = Some(modifiers);
        self
    }
}

/// Amount produced by a step, plus the reason to use if it terminates the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutput {
    pub amount: i64,
    pub reason: Option<PreventionReasons>,
}

impl StepOutput {
    pub const fn amount(amount: i64) -> Self {
        Self {
            amount,
            reason: None,
        }
    }

    /// Reason replacing `PIPELINE_REDUCED_TO_ZERO` when this output terminates.
    #[must_use]
    pub const fn with_reason(mut self, reason: PreventionReasons) -> Self {
        self.reason = Some(reason);
        self
    }
}

/// One transformation unit of a [`crate::DamageCalculationStrategy`].
///
/// Implementors provide [`DamageStep::compute`]; [`DamageStep::process`] wraps it
/// with the shared bookkeeping: the termination short-circuit, the ledger
/// record and the termination update.
pub trait DamageStep: Debug + Send + Sync {
    fn id(&self) -> StepId;

    /// Whether the step still runs after an earlier step terminated the pipeline.
    ///
    /// Built-in steps return `false`. A step returning `true` can revive a
    /// terminated instance by producing an amount above zero.
    fn runs_after_termination(&self) -> bool {
        false
    }

    /// Computes the new running amount from `ctx.amounts().current()`.
    fn compute(&self, ctx: &DamageContext, env: &mut StepEnv<'_>) -> StepOutput;

    /// Runs the step against `ctx`. Skipped steps leave no record.
    fn process(&self, ctx: &mut DamageContext, env: &mut StepEnv<'_>) {
        let id = self.id();
        if ctx.is_terminated() && !self.runs_after_termination() {
            tracing::trace!(step = %id, "skipped: pipeline terminated");
            return;
        }

        let pre = ctx.amounts().current();
        let output = self.compute(ctx, env);
        tracing::trace!(step = %id, pre, post = output.amount, "damage step");
        ctx.settle(id, pre, output);
    }
}
