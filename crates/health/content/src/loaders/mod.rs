//! Content loaders for reading health data from files.
//!
//! TOML and RON files are parsed into `*Spec` types and resolved against a
//! [`crate::DamageCatalog`] into `health-core` values.

pub mod catalog;
pub mod config;
pub mod encounter;
pub mod factory;

pub use catalog::{
    CatalogLoader, CatalogSpec, DamageReductionSpec, DamageTypeSpec, DefenseReductionSpec,
};
pub use config::{
    BasisSpec, ConfigLoader, HealthConfigSpec, LifestealSpec, ModifiersSpec,
    PassiveRegenerationSpec,
};
pub use encounter::{
    ActionSpec, CombatantSpec, Encounter, EncounterAction, EncounterLoader, EncounterSpec,
    MaxHpBonus,
};
pub use factory::{Content, ContentFactory};

use std::path::Path;

use health_core::{BuiltinStep, DamageCalculationStrategy};

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses built-in step names into a strategy, in the given order.
pub(crate) fn parse_strategy(names: &[String]) -> LoadResult<DamageCalculationStrategy> {
    let steps = names
        .iter()
        .map(|name| {
            name.parse::<BuiltinStep>()
                .map_err(|_| anyhow::anyhow!("Unknown damage step '{}'", name))
        })
        .collect::<LoadResult<Vec<_>>>()?;
    Ok(DamageCalculationStrategy::from_builtin(steps))
}
