//! Heal requests, heal amount resolution and lifesteal.

mod lifesteal;
mod request;
mod resolution;

pub use lifesteal::{LifestealAmountSelector, LifestealConfig, LifestealStatConfig, StepPoint};
pub use request::{HealRequest, HealRequestBuilder, HealSource};
pub use resolution::{HealResolution, resolve_heal_amount};
