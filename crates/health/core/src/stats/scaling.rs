use std::fmt::Debug;

use super::{StatKey, StatProvider};
use crate::entity::EntityId;

/// Contribution to an entity's max HP derived from its stats.
///
/// Scalings are re-evaluated every time max HP is recomputed, so a scaling
/// reflects the provider's current values.
pub trait MaxHpScaling: Debug + Send + Sync {
    /// Unrounded HP contribution for `entity`.
    fn contribution(&self, entity: EntityId, stats: &dyn StatProvider) -> f64;
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalingTerm {
    pub stat: StatKey,
    pub factor: f64,
}

/// Sum of `stat * factor` terms, e.g. 10 HP per point of constitution.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatScaling {
    terms: Vec<ScalingTerm>,
}

impl StatScaling {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single-term scaling.
    pub fn single(stat: impl Into<StatKey>, factor: f64) -> Self {
        Self::new().term(stat, factor)
    }

    #[must_use]
    pub fn term(mut self, stat: impl Into<StatKey>, factor: f64) -> Self {
        self.terms.push(ScalingTerm {
            stat: stat.into(),
            factor,
        });
        self
    }

    pub fn terms(&self) -> &[ScalingTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromIterator<ScalingTerm> for StatScaling {
    fn from_iter<I: IntoIterator<Item = ScalingTerm>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl MaxHpScaling for StatScaling {
    fn contribution(&self, entity: EntityId, stats: &dyn StatProvider) -> f64 {
        self.terms
            .iter()
            .map(|term| stats.get(entity, &term.stat) as f64 * term.factor)
            .sum()
    }
}
