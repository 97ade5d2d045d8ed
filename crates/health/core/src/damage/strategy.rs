use std::sync::Arc;

use super::context::DamageContext;
use super::step::{DamageStep, StepEnv};
use super::steps::BuiltinStep;

/// Ordered list of damage steps.
///
/// Every step is offered the context in list order; each step decides for
/// itself whether to run once the pipeline is terminated.
#[derive(Clone, Debug, Default)]
pub struct DamageCalculationStrategy {
    steps: Vec<Arc<dyn DamageStep>>,
}

impl DamageCalculationStrategy {
    /// Empty strategy: the raw amount is applied unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Critical, barrier, defense, modifiers.
    pub fn standard() -> Self {
        Self::from_builtin(BuiltinStep::CANONICAL)
    }

    pub fn from_builtin(steps: impl IntoIterator<Item = BuiltinStep>) -> Self {
        Self {
            steps: steps.into_iter().map(BuiltinStep::instantiate).collect(),
        }
    }

    #[must_use]
    pub fn with_step(mut self, step: impl DamageStep + 'static) -> Self {
        self.steps.push(Arc::new(step));
        self
    }

    pub fn push(&mut self, step: Arc<dyn DamageStep>) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[Arc<dyn DamageStep>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step over `ctx` in order.
    pub fn calculate(&self, ctx: &mut DamageContext, env: &mut StepEnv<'_>) {
        for step in &self.steps {
            step.process(ctx, env);
        }
    }
}

impl FromIterator<Arc<dyn DamageStep>> for DamageCalculationStrategy {
    fn from_iter<I: IntoIterator<Item = Arc<dyn DamageStep>>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::ledger::StepId;
    use crate::damage::step::StepOutput;
    use crate::damage::test_support::{context, critical_context};
    use crate::damage::{
        ApplyBarrierStep, ApplyCriticalMultiplierStep, DamageOutcome, PreventionReasons,
    };
    use crate::stats::NoStats;

    /// Sets the running amount to a fixed value and keeps running after termination.
    #[derive(Debug)]
    struct SetTo(&'static str, i64);

    impl DamageStep for SetTo {
        fn id(&self) -> StepId {
            StepId::from_static(self.0)
        }

        fn runs_after_termination(&self) -> bool {
            true
        }

        fn compute(&self, _ctx: &DamageContext, _env: &mut StepEnv<'_>) -> StepOutput {
            StepOutput::amount(self.1)
        }
    }

    fn run(strategy: &DamageCalculationStrategy, ctx: &mut DamageContext, barrier: &mut i64) {
        let mut env = StepEnv::new(&NoStats, barrier);
        strategy.calculate(ctx, &mut env);
    }

    #[test]
    fn terminated_builtin_steps_leave_no_record() {
        let strategy = DamageCalculationStrategy::standard();
        let mut ctx = context(40);
        let mut barrier = 40;
        run(&strategy, &mut ctx, &mut barrier);

        let steps: Vec<_> = ctx.amounts().records().iter().map(|r| r.step.clone()).collect();
        assert_eq!(steps, vec![ApplyCriticalMultiplierStep::ID, ApplyBarrierStep::ID]);
        assert_eq!(ctx.termination_step(), Some(&ApplyBarrierStep::ID));
        assert_eq!(ctx.outcome(), DamageOutcome::Prevented);
        assert!(ctx.amounts().is_continuous());
    }

    #[test]
    fn first_zeroing_step_keeps_termination() {
        let strategy = DamageCalculationStrategy::new()
            .with_step(SetTo("first", 0))
            .with_step(SetTo("second", 0));
        let mut ctx = context(40);
        run(&strategy, &mut ctx, &mut 0);

        assert_eq!(ctx.termination_step(), Some(&StepId::from_static("first")));
        assert_eq!(ctx.reasons(), PreventionReasons::PIPELINE_REDUCED_TO_ZERO);
        assert_eq!(ctx.amounts().records().len(), 2);
    }

    #[test]
    fn raising_above_zero_clears_termination() {
        let strategy = DamageCalculationStrategy::new()
            .with_step(SetTo("zero", 0))
            .with_step(SetTo("revive", 15))
            .with_step(ApplyCriticalMultiplierStep);
        let mut ctx = critical_context(40, 2.0);
        run(&strategy, &mut ctx, &mut 0);

        assert_eq!(ctx.termination_step(), None);
        assert_eq!(ctx.outcome(), DamageOutcome::Applied);
        assert!(ctx.reasons().is_empty());
        assert_eq!(ctx.amounts().current(), 30);
        assert!(ctx.amounts().is_continuous());
    }

    #[test]
    fn last_step_to_cross_zero_owns_termination() {
        let strategy = DamageCalculationStrategy::new()
            .with_step(SetTo("zero", 0))
            .with_step(SetTo("revive", 15))
            .with_step(SetTo("zero_again", -5));
        let mut ctx = context(40);
        run(&strategy, &mut ctx, &mut 0);

        assert_eq!(ctx.termination_step(), Some(&StepId::from_static("zero_again")));
        assert_eq!(ctx.outcome(), DamageOutcome::Prevented);
        assert_eq!(ctx.reasons(), PreventionReasons::PIPELINE_REDUCED_TO_ZERO);
    }

    #[test]
    fn partial_reduction_never_terminates() {
        let strategy = DamageCalculationStrategy::new().with_step(SetTo("partial", 10));
        let mut ctx = context(40);
        run(&strategy, &mut ctx, &mut 0);

        assert!(!ctx.is_terminated());
        assert_eq!(ctx.outcome(), DamageOutcome::Applied);
    }

    #[test]
    fn empty_strategy_applies_raw_amount() {
        let mut ctx = context(40);
        run(&DamageCalculationStrategy::new(), &mut ctx, &mut 0);
        assert_eq!(ctx.amounts().current(), 40);
        assert!(ctx.amounts().records().is_empty());
    }
}
