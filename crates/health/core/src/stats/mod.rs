//! Stat lookup seam.
//!
//! health-core never owns stat values. Every numeric input that depends on an
//! entity's build (armor, piercing, lifesteal percentage, regeneration) is read
//! through [`StatProvider`] at the moment it is needed.

mod scaling;

pub use scaling::{MaxHpScaling, ScalingTerm, StatScaling};

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::entity::EntityId;

/// Name of a stat, e.g. `"armor"` or `"lifesteal_physical"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatKey(Cow<'static, str>);

impl StatKey {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for StatKey {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for StatKey {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only stat source supplied by the host.
///
/// Implementations must be side-effect free. A stat the entity does not have
/// reads as `0`.
pub trait StatProvider {
    fn get(&self, entity: EntityId, stat: &StatKey) -> i64;
}

impl<T: StatProvider + ?Sized> StatProvider for &T {
    fn get(&self, entity: EntityId, stat: &StatKey) -> i64 {
        (**self).get(entity, stat)
    }
}

/// Provider with no stats at all; every lookup returns `0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStats;

impl StatProvider for NoStats {
    fn get(&self, _entity: EntityId, _stat: &StatKey) -> i64 {
        0
    }
}

/// In-memory stat table, one map of stats per entity.
///
/// Lookups borrow the [`StatKey`]; entities left without stats are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatTable {
    values: HashMap<EntityId, HashMap<StatKey, i64>>,
}

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a stat, returning the previous value if one was present.
    pub fn set(&mut self, entity: EntityId, stat: impl Into<StatKey>, value: i64) -> Option<i64> {
        self.values
            .entry(entity)
            .or_default()
            .insert(stat.into(), value)
    }

    /// Builder-style variant of [`StatTable::set`].
    #[must_use]
    pub fn with(mut self, entity: EntityId, stat: impl Into<StatKey>, value: i64) -> Self {
        self.set(entity, stat, value);
        self
    }

    pub fn remove(&mut self, entity: EntityId, stat: &StatKey) -> Option<i64> {
        let stats = self.values.get_mut(&entity)?;
        let removed = stats.remove(stat);
        if stats.is_empty() {
            self.values.remove(&entity);
        }
        removed
    }

    /// Drops every stat recorded for `entity`.
    pub fn clear_entity(&mut self, entity: EntityId) {
        self.values.remove(&entity);
    }

    /// Number of (entity, stat) entries.
    pub fn len(&self) -> usize {
        self.values.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl StatProvider for StatTable {
    fn get(&self, entity: EntityId, stat: &StatKey) -> i64 {
        self.values
            .get(&entity)
            .and_then(|stats| stats.get(stat))
            .copied()
            .unwrap_or(0)
    }
}
