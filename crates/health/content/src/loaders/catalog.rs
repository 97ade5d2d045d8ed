//! Damage catalog loader.

use std::path::Path;

use health_core::{
    DamageType, FlatDamageReduction, FlatDefenseReduction, PercentageDamageReduction,
    PercentageDefenseReduction,
};
use serde::{Deserialize, Serialize};

use crate::catalog::DamageCatalog;
use crate::loaders::{LoadResult, read_file};

/// Built-in damage reduction functions a damage type can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageReductionSpec {
    Flat,
    Percentage,
}

/// Built-in defense piercing functions a damage type can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefenseReductionSpec {
    Flat {
        #[serde(default)]
        allow_negative: bool,
    },
    Percentage {
        #[serde(default)]
        allow_negative: bool,
    },
}

/// Damage type as written in `catalog.ron`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageTypeSpec {
    pub name: String,
    #[serde(default)]
    pub ignores_barrier: bool,
    #[serde(default)]
    pub reduced_by: Option<String>,
    #[serde(default)]
    pub pierced_by: Option<String>,
    #[serde(default)]
    pub damage_reduction: Option<DamageReductionSpec>,
    #[serde(default)]
    pub defense_reduction: Option<DefenseReductionSpec>,
}

impl DamageTypeSpec {
    pub fn resolve(&self) -> LoadResult<DamageType> {
        let mut builder = DamageType::builder(self.name.clone()).ignores_barrier(self.ignores_barrier);
        if let Some(stat) = &self.reduced_by {
            builder = builder.reduced_by(stat.clone());
        }
        if let Some(stat) = &self.pierced_by {
            builder = builder.pierced_by(stat.clone());
        }
        builder = match self.damage_reduction {
            Some(DamageReductionSpec::Flat) => builder.damage_reduction(FlatDamageReduction),
            Some(DamageReductionSpec::Percentage) => {
                builder.damage_reduction(PercentageDamageReduction)
            }
            None => builder,
        };
        builder = match self.defense_reduction {
            Some(DefenseReductionSpec::Flat { allow_negative }) => {
                builder.defense_reduction(FlatDefenseReduction { allow_negative })
            }
            Some(DefenseReductionSpec::Percentage { allow_negative }) => {
                builder.defense_reduction(PercentageDefenseReduction { allow_negative })
            }
            None => builder,
        };

        builder
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid damage type '{}': {}", self.name, e))
    }
}

/// Contents of `catalog.ron`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSpec {
    #[serde(default)]
    pub damage_types: Vec<DamageTypeSpec>,
    #[serde(default)]
    pub damage_sources: Vec<String>,
    #[serde(default)]
    pub heal_sources: Vec<String>,
}

impl CatalogSpec {
    pub fn resolve(&self) -> LoadResult<DamageCatalog> {
        let mut catalog = DamageCatalog::new();
        for spec in &self.damage_types {
            catalog.insert_damage_type(spec.resolve()?)?;
        }
        for name in &self.damage_sources {
            catalog.insert_damage_source(name.clone());
        }
        for name in &self.heal_sources {
            catalog.insert_heal_source(name.clone());
        }
        Ok(catalog)
    }
}

/// Loader for the damage catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and resolve a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<DamageCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<DamageCatalog> {
        let spec: CatalogSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        let catalog = spec.resolve()?;
        tracing::debug!(
            damage_types = spec.damage_types.len(),
            damage_sources = spec.damage_sources.len(),
            heal_sources = spec.heal_sources.len(),
            "loaded damage catalog"
        );
        Ok(catalog)
    }
}
