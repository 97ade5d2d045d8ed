use std::fmt;
use std::sync::Arc;

use super::reduction::{DamageReduction, DefenseReduction};
use crate::error::HealthError;
use crate::stats::StatKey;

/// Category of damage (physical, fire, true damage ...).
///
/// Two damage types are equal when their names are equal; the name is also the
/// key for lifesteal mappings and per-type modifier stats.
#[derive(Clone, Debug)]
pub struct DamageType {
    name: String,
    ignores_barrier: bool,
    reduced_by: Option<StatKey>,
    pierced_by: Option<StatKey>,
    damage_reduction: Option<Arc<dyn DamageReduction>>,
    defense_reduction: Option<Arc<dyn DefenseReduction>>,
}

impl DamageType {
    /// Damage type with no barrier bypass and no defense functions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ignores_barrier: false,
            reduced_by: None,
            pierced_by: None,
            damage_reduction: None,
            defense_reduction: None,
        }
    }

    pub fn builder(name: impl Into<String>) -> DamageTypeBuilder {
        DamageTypeBuilder {
            inner: Self::new(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ignores_barrier(&self) -> bool {
        self.ignores_barrier
    }

    /// Defensive stat read from the target.
    pub fn reduced_by(&self) -> Option<&StatKey> {
        self.reduced_by.as_ref()
    }

    /// Piercing stat read from the dealer.
    pub fn pierced_by(&self) -> Option<&StatKey> {
        self.pierced_by.as_ref()
    }

    pub fn damage_reduction(&self) -> Option<&dyn DamageReduction> {
        self.damage_reduction.as_deref()
    }

    pub fn defense_reduction(&self) -> Option<&dyn DefenseReduction> {
        self.defense_reduction.as_deref()
    }
}

impl PartialEq for DamageType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for DamageType {}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for [`DamageType`].
#[derive(Debug)]
pub struct DamageTypeBuilder {
    inner: DamageType,
}

impl DamageTypeBuilder {
    pub fn ignores_barrier(mut self, ignores: bool) -> Self {
        self.inner.ignores_barrier = ignores;
        self
    }

    pub fn reduced_by(mut self, stat: impl Into<StatKey>) -> Self {
        self.inner.reduced_by = Some(stat.into());
        self
    }

    pub fn pierced_by(mut self, stat: impl Into<StatKey>) -> Self {
        self.inner.pierced_by = Some(stat.into());
        self
    }

    pub fn damage_reduction(mut self, reduction: impl DamageReduction + 'static) -> Self {
        self.inner.damage_reduction = Some(Arc::new(reduction));
        self
    }

    pub fn shared_damage_reduction(mut self, reduction: Arc<dyn DamageReduction>) -> Self {
        self.inner.damage_reduction = Some(reduction);
        self
    }

    pub fn defense_reduction(mut self, reduction: impl DefenseReduction + 'static) -> Self {
        self.inner.defense_reduction = Some(Arc::new(reduction));
        self
    }

    pub fn shared_defense_reduction(mut self, reduction: Arc<dyn DefenseReduction>) -> Self {
        self.inner.defense_reduction = Some(reduction);
        self
    }

    /// Fails when the name is empty.
    pub fn build(self) -> Result<DamageType, HealthError> {
        if self.inner.name.trim().is_empty() {
            return Err(HealthError::MissingArgument("damage_type.name"));
        }
        Ok(self.inner)
    }
}

/// Origin of damage (melee, spell, trap ...). Compared by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DamageSource {
    name: String,
}

impl DamageSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for DamageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
