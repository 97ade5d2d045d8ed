use std::sync::Arc;
use std::time::Duration;

use crate::damage::{DamageCalculationStrategy, DamageModifiersConfig};
use crate::heal::{HealSource, LifestealConfig};
use crate::lifecycle::{
    DoNothingOnDeath, DoNothingOnResurrection, OnDeathStrategy, OnResurrectionStrategy,
};
use crate::stats::{MaxHpScaling, StatKey};

/// Periodic heal driven by elapsed time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassiveRegeneration {
    /// Stat holding HP restored per interval.
    pub stat: StatKey,
    pub source: HealSource,
    /// A zero interval disables regeneration.
    pub interval: Duration,
}

/// Health configuration shared by every entity in a simulation.
///
/// Passed by reference through [`crate::HealthEnv`]; absent entries are neutral
/// defaults, never errors.
#[derive(Clone, Debug)]
pub struct HealthConfig {
    pub modifiers: DamageModifiersConfig,
    /// Stat read from the healed entity as a percentage heal bonus.
    pub heal_amount_modifier_stat: Option<StatKey>,
    /// Strategy for entities without their own override.
    pub default_strategy: DamageCalculationStrategy,
    pub lifesteal: LifestealConfig,
    pub on_death: Arc<dyn OnDeathStrategy>,
    pub on_resurrection: Arc<dyn OnResurrectionStrategy>,
    pub resurrection_source: HealSource,
    pub passive_regeneration: Option<PassiveRegeneration>,
    pub manual_regeneration_stat: Option<StatKey>,
    /// Source tagged on heals from [`crate::VitalityState::regenerate`].
    pub manual_regeneration_source: HealSource,
    /// Max-HP scaling applied to every entity by `setup_max_hp`.
    pub health_attributes_scaling: Option<Arc<dyn MaxHpScaling>>,
}

impl HealthConfig {
    pub const DEFAULT_RESURRECTION_SOURCE: &'static str = "resurrection";
    pub const DEFAULT_MANUAL_REGENERATION_SOURCE: &'static str = "manual_regeneration";

    pub fn new() -> Self {
        Self {
            modifiers: DamageModifiersConfig::default(),
            heal_amount_modifier_stat: None,
            default_strategy: DamageCalculationStrategy::standard(),
            lifesteal: LifestealConfig::default(),
            on_death: Arc::new(DoNothingOnDeath),
            on_resurrection: Arc::new(DoNothingOnResurrection),
            resurrection_source: HealSource::new(Self::DEFAULT_RESURRECTION_SOURCE),
            passive_regeneration: None,
            manual_regeneration_stat: None,
            manual_regeneration_source: HealSource::new(Self::DEFAULT_MANUAL_REGENERATION_SOURCE),
            health_attributes_scaling: None,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: DamageModifiersConfig) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: DamageCalculationStrategy) -> Self {
        self.default_strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_lifesteal(mut self, lifesteal: LifestealConfig) -> Self {
        self.lifesteal = lifesteal;
        self
    }

    #[must_use]
    pub fn with_on_death(mut self, strategy: Arc<dyn OnDeathStrategy>) -> Self {
        self.on_death = strategy;
        self
    }

    #[must_use]
    pub fn with_on_resurrection(mut self, strategy: Arc<dyn OnResurrectionStrategy>) -> Self {
        self.on_resurrection = strategy;
        self
    }

    #[must_use]
    pub fn with_heal_modifier(mut self, stat: impl Into<StatKey>) -> Self {
        self.heal_amount_modifier_stat = Some(stat.into());
        self
    }

    #[must_use]
    pub fn with_passive_regeneration(mut self, regeneration: PassiveRegeneration) -> Self {
        self.passive_regeneration = Some(regeneration);
        self
    }

    #[must_use]
    pub fn with_manual_regeneration(mut self, stat: impl Into<StatKey>) -> Self {
        self.manual_regeneration_stat = Some(stat.into());
        self
    }

    #[must_use]
    pub fn with_manual_regeneration_source(mut self, source: HealSource) -> Self {
        self.manual_regeneration_source = source;
        self
    }

    #[must_use]
    pub fn with_attributes_scaling(mut self, scaling: Arc<dyn MaxHpScaling>) -> Self {
        self.health_attributes_scaling = Some(scaling);
        self
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self::new()
    }
}
