//! Registry of named damage types, damage sources and heal sources.

use std::collections::BTreeMap;

use health_core::{DamageSource, DamageType, HealSource};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("damage type '{0}' is defined more than once")]
    DuplicateDamageType(String),

    #[error("unknown damage type '{0}'")]
    UnknownDamageType(String),

    #[error("unknown damage source '{0}'")]
    UnknownDamageSource(String),

    #[error("unknown heal source '{0}'")]
    UnknownHealSource(String),
}

/// Named content that requests and configuration refer to.
#[derive(Clone, Debug, Default)]
pub struct DamageCatalog {
    damage_types: BTreeMap<String, DamageType>,
    damage_sources: BTreeMap<String, DamageSource>,
    heal_sources: BTreeMap<String, HealSource>,
}

impl DamageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_damage_type(&mut self, damage_type: DamageType) -> Result<(), CatalogError> {
        let name = damage_type.name().to_owned();
        if self.damage_types.contains_key(&name) {
            return Err(CatalogError::DuplicateDamageType(name));
        }
        self.damage_types.insert(name, damage_type);
        Ok(())
    }

    pub fn insert_damage_source(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.damage_sources
            .insert(name.clone(), DamageSource::new(name));
    }

    pub fn insert_heal_source(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.heal_sources.insert(name.clone(), HealSource::new(name));
    }

    pub fn damage_type(&self, name: &str) -> Result<&DamageType, CatalogError> {
        self.damage_types
            .get(name)
            .ok_or_else(|| CatalogError::UnknownDamageType(name.to_owned()))
    }

    pub fn damage_source(&self, name: &str) -> Result<&DamageSource, CatalogError> {
        self.damage_sources
            .get(name)
            .ok_or_else(|| CatalogError::UnknownDamageSource(name.to_owned()))
    }

    pub fn heal_source(&self, name: &str) -> Result<&HealSource, CatalogError> {
        self.heal_sources
            .get(name)
            .ok_or_else(|| CatalogError::UnknownHealSource(name.to_owned()))
    }

    pub fn damage_types(&self) -> impl Iterator<Item = &DamageType> {
        self.damage_types.values()
    }

    pub fn damage_sources(&self) -> impl Iterator<Item = &DamageSource> {
        self.damage_sources.values()
    }

    pub fn heal_sources(&self) -> impl Iterator<Item = &HealSource> {
        self.heal_sources.values()
    }
}
