//! Damage, healing and life-state resolution for RPG entities.
//!
//! `health-core` turns damage and heal requests into HP changes. Damage runs
//! through an ordered, configurable pipeline of steps (critical multiplier,
//! barrier, defense, modifiers) that records every intermediate amount in an
//! [`AmountLedger`]; lifesteal reads its basis from that ledger. Every HP
//! change goes through [`VitalityState`], which owns the alive/dead state
//! machine. Stats come from a host-supplied [`StatProvider`] and results are
//! published through a [`ResultSink`].
pub mod config;
pub mod damage;
pub mod entity;
pub mod env;
pub mod error;
pub mod events;
pub mod heal;
pub mod lifecycle;
pub mod numeric;
pub mod roster;
pub mod stats;
pub mod vitality;

pub use config::{HealthConfig, PassiveRegeneration};
pub use damage::{
    AmountLedger, ApplyBarrierStep, ApplyCriticalMultiplierStep, ApplyDefenseStep,
    ApplyDmgModifiersStep, BuiltinStep, DamageCalculationStrategy, DamageContext,
    DamageModifiersConfig, DamageOutcome, DamageReduction, DamageRequest, DamageResolution,
    DamageSource, DamageStep, DamageType, DefenseReduction, FlatDamageReduction,
    FlatDefenseReduction, LifestealClaim, PercentageDamageReduction, PercentageDefenseReduction,
    PreventionReasons, StepEnv, StepId, StepOutput,
};
pub use entity::EntityId;
pub use env::HealthEnv;
pub use error::{DeadEntityError, ErrorSeverity, HealthError};
pub use events::{EventLog, HealthEvent, NullSink, ResultSink};
pub use heal::{
    HealRequest, HealResolution, HealSource, LifestealAmountSelector, LifestealConfig,
    LifestealStatConfig, StepPoint,
};
pub use lifecycle::{
    DeathContext, DoNothingOnDeath, DoNothingOnResurrection, OnDeathStrategy,
    OnResurrectionStrategy, ResurrectAmount, ResurrectionContext,
};
pub use numeric::Percentage;
pub use roster::Roster;
pub use stats::{MaxHpScaling, NoStats, StatKey, StatProvider, StatScaling, StatTable};
pub use vitality::{MaxHpIncreaseBehaviour, MaxHpModifierId, VitalityState, VitalityStateBuilder};
