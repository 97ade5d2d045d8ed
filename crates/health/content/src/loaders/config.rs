//! Health configuration loader.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use health_core::stats::ScalingTerm;
use health_core::{
    BuiltinStep, DamageModifiersConfig, HealthConfig, LifestealAmountSelector, LifestealConfig,
    LifestealStatConfig, PassiveRegeneration, StatKey, StatScaling, StepPoint,
};
use serde::{Deserialize, Serialize};

use crate::catalog::DamageCatalog;
use crate::loaders::{LoadResult, parse_strategy, read_file};

/// Stat names for the damage modifiers step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiersSpec {
    #[serde(default)]
    pub generic: Option<String>,
    /// Damage type name to stat name.
    #[serde(default)]
    pub damage_types: BTreeMap<String, String>,
    /// Damage source name to stat name.
    #[serde(default)]
    pub damage_sources: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassiveRegenerationSpec {
    pub stat: String,
    pub source: String,
    pub interval_ms: u64,
}

/// Ledger amount a lifesteal mapping reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasisSpec {
    Initial,
    #[default]
    Final,
    Step,
}

/// One `[[lifesteal]]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifestealSpec {
    pub damage_type: String,
    pub stat: String,
    pub heal_source: String,
    #[serde(default)]
    pub basis: BasisSpec,
    /// Built-in step name, required when `basis = "step"`.
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub point: Option<StepPoint>,
}

impl LifestealSpec {
    fn selector(&self) -> LoadResult<LifestealAmountSelector> {
        match self.basis {
            BasisSpec::Initial => Ok(LifestealAmountSelector::Initial),
            BasisSpec::Final => Ok(LifestealAmountSelector::Final),
            BasisSpec::Step => {
                let name = self.step.as_deref().ok_or_else(|| {
                    anyhow::anyhow!(
                        "Lifesteal for '{}' uses a step basis without a step",
                        self.damage_type
                    )
                })?;
                let step = name
                    .parse::<BuiltinStep>()
                    .map_err(|_| anyhow::anyhow!("Unknown damage step '{}'", name))?;
                Ok(LifestealAmountSelector::step(
                    step.step_id(),
                    self.point.unwrap_or_default(),
                ))
            }
        }
    }
}

/// Contents of `health.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthConfigSpec {
    /// Ordered built-in step names; the canonical order when omitted.
    #[serde(default)]
    pub damage_strategy: Option<Vec<String>>,
    #[serde(default)]
    pub heal_amount_modifier_stat: Option<String>,
    #[serde(default)]
    pub manual_regeneration_stat: Option<String>,
    /// Heal source for manual regeneration; `manual_regeneration` when omitted.
    #[serde(default)]
    pub manual_regeneration_source: Option<String>,
    #[serde(default)]
    pub default_resurrection_source: Option<String>,
    #[serde(default)]
    pub modifiers: ModifiersSpec,
    #[serde(default)]
    pub passive_regeneration: Option<PassiveRegenerationSpec>,
    #[serde(default)]
    pub lifesteal: Vec<LifestealSpec>,
    #[serde(default)]
    pub health_attributes_scaling: Vec<ScalingTerm>,
}

impl HealthConfigSpec {
    /// Resolves names against `catalog` into a [`HealthConfig`].
    pub fn resolve(&self, catalog: &DamageCatalog) -> LoadResult<HealthConfig> {
        let mut config = HealthConfig::new();

        if let Some(names) = &self.damage_strategy {
            config = config.with_strategy(parse_strategy(names)?);
        }

        let mut modifiers = DamageModifiersConfig::new();
        if let Some(stat) = &self.modifiers.generic {
            modifiers = modifiers.with_generic(stat.clone());
        }
        for (name, stat) in &self.modifiers.damage_types {
            modifiers = modifiers.with_type(catalog.damage_type(name)?, stat.clone());
        }
        for (name, stat) in &self.modifiers.damage_sources {
            modifiers = modifiers.with_source(catalog.damage_source(name)?, stat.clone());
        }
        config = config.with_modifiers(modifiers);

        let mut lifesteal = LifestealConfig::new();
        for spec in &self.lifesteal {
            let damage_type = catalog.damage_type(&spec.damage_type)?;
            let mapping = LifestealStatConfig {
                stat: StatKey::new(spec.stat.clone()),
                heal_source: catalog.heal_source(&spec.heal_source)?.clone(),
                selector: spec.selector()?,
            };
            if lifesteal.insert(damage_type, mapping).is_some() {
                return Err(anyhow::anyhow!(
                    "Lifesteal for '{}' is defined more than once",
                    spec.damage_type
                ));
            }
        }
        config = config.with_lifesteal(lifesteal);

        if let Some(stat) = &self.heal_amount_modifier_stat {
            config = config.with_heal_modifier(stat.clone());
        }
        if let Some(stat) = &self.manual_regeneration_stat {
            config = config.with_manual_regeneration(stat.clone());
        }
        if let Some(source) = &self.manual_regeneration_source {
            config = config.with_manual_regeneration_source(catalog.heal_source(source)?.clone());
        }
        if let Some(source) = &self.default_resurrection_source {
            config.resurrection_source = catalog.heal_source(source)?.clone();
        }

        if let Some(spec) = &self.passive_regeneration {
            if spec.interval_ms == 0 {
                return Err(anyhow::anyhow!(
                    "Passive regeneration interval must be positive"
                ));
            }
            config = config.with_passive_regeneration(PassiveRegeneration {
                stat: StatKey::new(spec.stat.clone()),
                source: catalog.heal_source(&spec.source)?.clone(),
                interval: Duration::from_millis(spec.interval_ms),
            });
        }

        if !self.health_attributes_scaling.is_empty() {
            let scaling: StatScaling = self.health_attributes_scaling.iter().cloned().collect();
            config = config.with_attributes_scaling(Arc::new(scaling));
        }

        Ok(config)
    }
}

/// Loader for health configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file and resolve it against `catalog`.
    pub fn load(path: &Path, catalog: &DamageCatalog) -> LoadResult<HealthConfig> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    pub fn parse(content: &str, catalog: &DamageCatalog) -> LoadResult<HealthConfig> {
        let spec: HealthConfigSpec = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        spec.resolve(catalog)
    }
}
