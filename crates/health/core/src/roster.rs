use std::collections::BTreeMap;

use crate::damage::{DamageRequest, DamageResolution};
use crate::entity::EntityId;
use crate::env::HealthEnv;
use crate::error::HealthError;
use crate::heal::{HealRequest, HealResolution};
use crate::lifecycle::ResurrectAmount;
use crate::vitality::VitalityState;

/// Vitality states of every tracked entity, keyed by id.
///
/// Routes operations to the addressed entity and settles lifesteal claims
/// through the dealer's own heal path.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    entities: BTreeMap<EntityId, VitalityState>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a state under its own id, returning the state it replaced.
    pub fn insert(&mut self, state: VitalityState) -> Option<VitalityState> {
        self.entities.insert(state.entity(), state)
    }

    pub fn remove(&mut self, entity: EntityId) -> Option<VitalityState> {
        self.entities.remove(&entity)
    }

    pub fn get(&self, entity: EntityId) -> Option<&VitalityState> {
        self.entities.get(&entity)
    }

    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut VitalityState> {
        self.entities.get_mut(&entity)
    }

    /// Like [`Roster::get_mut`] but fails with `EntityNotFound`.
    pub fn require_mut(&mut self, entity: EntityId) -> Result<&mut VitalityState, HealthError> {
        self.entities
            .get_mut(&entity)
            .ok_or(HealthError::EntityNotFound(entity))
    }

    pub fn iter(&self) -> impl Iterator<Item = &VitalityState> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Resolves damage on `request.target`, then applies any lifesteal claim
    /// to the dealer before returning.
    ///
    /// A dead or unknown dealer forfeits the claim.
    pub fn take_damage(
        &mut self,
        request: &DamageRequest,
        env: &mut HealthEnv<'_>,
    ) -> Result<DamageResolution, HealthError> {
        let mut resolution = self.require_mut(request.target)?.take_damage(request, env)?;

        let Some(claim) = resolution.lifesteal.as_mut() else {
            return Ok(resolution);
        };
        match self.entities.get_mut(&claim.dealer) {
            Some(dealer) if dealer.is_alive() => {
                claim.applied = Some(dealer.heal(&claim.request, env)?);
            }
            Some(_) => {
                tracing::debug!(dealer = %claim.dealer, "lifesteal skipped: dealer is dead");
            }
            None => {
                tracing::warn!(dealer = %claim.dealer, "lifesteal skipped: dealer not in roster");
            }
        }
        Ok(resolution)
    }

    pub fn heal(
        &mut self,
        target: EntityId,
        request: &HealRequest,
        env: &mut HealthEnv<'_>,
    ) -> Result<HealResolution, HealthError> {
        self.require_mut(target)?.heal(request, env)
    }

    pub fn resurrect(
        &mut self,
        target: EntityId,
        amount: ResurrectAmount,
        env: &mut HealthEnv<'_>,
    ) -> Result<i64, HealthError> {
        self.require_mut(target)?.resurrect(amount, env)
    }

    pub fn add_barrier(&mut self, target: EntityId, amount: i64) -> Result<i64, HealthError> {
        Ok(self.require_mut(target)?.add_barrier(amount))
    }
}

impl FromIterator<VitalityState> for Roster {
    fn from_iter<I: IntoIterator<Item = VitalityState>>(iter: I) -> Self {
        Self {
            entities: iter
                .into_iter()
                .map(|state| (state.entity(), state))
                .collect(),
        }
    }
}
