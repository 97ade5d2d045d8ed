//! Damage pipeline: ledger, context, steps and strategy.
//!
//! A [`DamageRequest`] becomes a [`DamageContext`] whose [`AmountLedger`] is
//! transformed by the ordered steps of a [`DamageCalculationStrategy`]. Each
//! executed step appends one ledger record; the step that drives the amount to
//! zero owns the termination.

mod context;
mod kind;
mod ledger;
mod prevention;
mod reduction;
mod request;
mod resolution;
mod step;
mod steps;
mod strategy;

pub use context::DamageContext;
pub use kind::{DamageSource, DamageType, DamageTypeBuilder};
pub use ledger::{AmountLedger, StepAmount, StepId, StepRecord};
pub use prevention::{DamageOutcome, PreventionReasons};
pub use reduction::{
    DamageReduction, DefenseReduction, FlatDamageReduction, FlatDefenseReduction,
    PercentageDamageReduction, PercentageDefenseReduction,
};
pub use request::{DamageRequest, DamageRequestBuilder};
pub use resolution::{DamageResolution, LifestealClaim};
pub use step::{DamageStep, StepEnv, StepOutput};
pub use steps::{
    ApplyBarrierStep, ApplyCriticalMultiplierStep, ApplyDefenseStep, ApplyDmgModifiersStep,
    BuiltinStep, DamageModifiersConfig,
};
pub use strategy::DamageCalculationStrategy;
