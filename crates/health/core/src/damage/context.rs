use super::kind::{DamageSource, DamageType};
use super::ledger::{AmountLedger, StepId};
use super::prevention::{DamageOutcome, PreventionReasons};
use super::request::DamageRequest;
use super::step::StepOutput;
use crate::entity::EntityId;

/// Mutable state of one damage instance as it moves through the pipeline.
///
/// `termination_step` is set exactly when the outcome is `Prevented` by a
/// pipeline step. Pre-phase preventions set the outcome and reasons but leave
/// `termination_step` empty.
#[derive(Clone, Debug)]
pub struct DamageContext {
    amounts: AmountLedger,
    damage_type: DamageType,
    source: DamageSource,
    dealer: EntityId,
    target: EntityId,
    is_critical: bool,
    critical_multiplier: f64,
    outcome: DamageOutcome,
    reasons: PreventionReasons,
    termination_step: Option<StepId>,
}

impl DamageContext {
    pub fn new(request: &DamageRequest) -> Self {
        Self {
            amounts: AmountLedger::new(request.amount),
            damage_type: request.damage_type.clone(),
            source: request.source.clone(),
            dealer: request.dealer,
            target: request.target,
            is_critical: request.is_critical,
            critical_multiplier: request.critical_multiplier,
            outcome: DamageOutcome::Applied,
            reasons: PreventionReasons::empty(),
            termination_step: None,
        }
    }

    pub fn amounts(&self) -> &AmountLedger {
        &self.amounts
    }

    pub fn damage_type(&self) -> &DamageType {
        &self.damage_type
    }

    pub fn source(&self) -> &DamageSource {
        &self.source
    }

    pub fn dealer(&self) -> EntityId {
        self.dealer
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    pub fn critical_multiplier(&self) -> f64 {
        self.critical_multiplier
    }

    pub fn outcome(&self) -> DamageOutcome {
        self.outcome
    }

    pub fn reasons(&self) -> PreventionReasons {
        self.reasons
    }

    pub fn termination_step(&self) -> Option<&StepId> {
        self.termination_step.as_ref()
    }

    /// True once a pipeline step has driven the amount to zero or declared immunity.
    pub fn is_terminated(&self) -> bool {
        self.termination_step.is_some()
    }

    /// Marks the instance prevented before the pipeline runs.
    pub(crate) fn prevent_pre_phase(&mut self, reason: PreventionReasons) {
        self.outcome = DamageOutcome::Prevented;
        self.reasons |= reason;
    }

    /// Records a step's result and updates the termination state.
    ///
    /// Crossing to `<= 0` terminates only when nothing is terminated yet, with
    /// the step's own reason or `PIPELINE_REDUCED_TO_ZERO`. Raising the amount
    /// back above zero clears the termination and its pipeline reasons.
    pub(crate) fn settle(&mut self, step: StepId, pre: i64, output: StepOutput) {
        let post = output.amount;
        self.amounts.record_step(step.clone(), pre, post);
        self.amounts.set_current(post);

        if post <= 0 {
            if self.termination_step.is_none() {
                self.outcome = DamageOutcome::Prevented;
                self.reasons |= output
                    .reason
                    .unwrap_or(PreventionReasons::PIPELINE_REDUCED_TO_ZERO);
                self.termination_step = Some(step);
            }
        } else if self.termination_step.take().is_some() {
            self.reasons.remove(PreventionReasons::PIPELINE);
            if !self.reasons.intersects(PreventionReasons::PRE_PHASE) {
                self.outcome = DamageOutcome::Applied;
            }
        }
    }
}
