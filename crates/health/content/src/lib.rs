//! Data-driven health content and loaders.
//!
//! This crate houses the named content a simulation resolves requests against
//! and the loaders for its data files:
//! - Damage types, damage sources and heal sources (catalog, RON)
//! - Health configuration: modifiers, strategy, lifesteal, regeneration (TOML)
//! - Encounter scripts for the simulator (RON)
//!
//! Loaders parse into `*Spec` mirror types and resolve them against the
//! catalog into `health-core` values, so unknown names fail at load time.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CatalogError, DamageCatalog};

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, Content, ContentFactory, Encounter, EncounterAction,
    EncounterLoader, LoadResult, MaxHpBonus,
};
