//! Death and resurrection collaborators.

use std::fmt::Debug;

use crate::entity::EntityId;
use crate::error::HealthError;
use crate::numeric::Percentage;

/// Passed to [`OnDeathStrategy::die`] at the death transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeathContext<'a> {
    pub entity: EntityId,
    pub entity_name: &'a str,
    /// Dealer of the lethal damage, if death came from damage.
    pub killer: Option<EntityId>,
    pub hp: i64,
}

/// Passed to [`OnResurrectionStrategy::on_resurrect`] after the entity is alive again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResurrectionContext<'a> {
    pub entity: EntityId,
    pub entity_name: &'a str,
    pub hp: i64,
}

/// Invoked exactly once per alive-to-dead transition.
///
/// Errors are propagated to the caller of the mutating operation; the entity
/// is already marked dead when the strategy runs.
pub trait OnDeathStrategy: Debug + Send + Sync {
    fn die(&self, ctx: &DeathContext<'_>) -> Result<(), HealthError>;
}

/// Invoked once per successful resurrection.
pub trait OnResurrectionStrategy: Debug + Send + Sync {
    fn on_resurrect(&self, ctx: &ResurrectionContext<'_>) -> Result<(), HealthError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DoNothingOnDeath;

impl OnDeathStrategy for DoNothingOnDeath {
    fn die(&self, _ctx: &DeathContext<'_>) -> Result<(), HealthError> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DoNothingOnResurrection;

impl OnResurrectionStrategy for DoNothingOnResurrection {
    fn on_resurrect(&self, _ctx: &ResurrectionContext<'_>) -> Result<(), HealthError> {
        Ok(())
    }
}

/// HP restored by a resurrection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResurrectAmount {
    Hp(i64),
    /// Share of total max HP, rounded.
    Percentage(Percentage),
}

impl ResurrectAmount {
    /// Absolute HP for an entity with `total_max_hp`, before clamping.
    pub fn resolve(self, total_max_hp: i64) -> i64 {
        match self {
            Self::Hp(hp) => hp,
            Self::Percentage(percentage) => percentage.of(total_max_hp),
        }
    }
}

impl From<Percentage> for ResurrectAmount {
    fn from(percentage: Percentage) -> Self {
        Self::Percentage(percentage)
    }
}
