use super::context::DamageContext;
use super::ledger::StepId;
use super::prevention::{DamageOutcome, PreventionReasons};
use crate::entity::EntityId;
use crate::heal::{HealRequest, HealResolution};
use crate::numeric::Percentage;

/// Heal owed to the dealer by a resolved damage instance.
#[derive(Clone, Debug, PartialEq)]
pub struct LifestealClaim {
    pub dealer: EntityId,
    /// Ledger amount selected by the lifesteal mapping.
    pub basis: i64,
    /// Dealer's lifesteal stat at resolution time.
    pub percentage: Percentage,
    pub request: HealRequest,
    /// Set once the claim has been applied to the dealer.
    pub applied: Option<HealResolution>,
}

/// Result of [`crate::VitalityState::take_damage`].
#[derive(Clone, Debug)]
pub struct DamageResolution {
    pub entity: EntityId,
    pub outcome: DamageOutcome,
    pub reasons: PreventionReasons,
    pub context: DamageContext,
    pub hp_before: i64,
    pub hp_after: i64,
    pub barrier_before: i64,
    pub barrier_after: i64,
    /// True when this instance caused the death transition.
    pub killed: bool,
    pub lifesteal: Option<LifestealClaim>,
}

impl DamageResolution {
    /// HP actually removed from the entity.
    pub fn hp_lost(&self) -> i64 {
        self.hp_before - self.hp_after
    }

    pub fn barrier_consumed(&self) -> i64 {
        self.barrier_before - self.barrier_after
    }

    pub fn is_prevented(&self) -> bool {
        self.outcome.is_prevented()
    }

    pub fn termination_step(&self) -> Option<&StepId> {
        self.context.termination_step()
    }

    /// Final pipeline amount.
    pub fn final_amount(&self) -> i64 {
        self.context.amounts().current()
    }
}
