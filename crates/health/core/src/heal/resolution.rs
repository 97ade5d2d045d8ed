use super::request::{HealRequest, HealSource};
use crate::entity::EntityId;
use crate::numeric::scale_amount;
use crate::stats::{StatKey, StatProvider};

/// Result of a heal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealResolution {
    pub entity: EntityId,
    pub source: HealSource,
    pub healer: Option<EntityId>,
    /// Raw amount on the request.
    pub requested: i64,
    /// Amount after critical and heal modifiers, before the max-HP cap.
    pub amount: i64,
    /// HP actually restored.
    pub gained: i64,
    pub hp_after: i64,
}

impl HealResolution {
    /// Part of the resolved amount lost to the max-HP cap.
    pub fn overheal(&self) -> i64 {
        (self.amount - self.gained).max(0)
    }
}

/// Resolves the heal amount before the max-HP cap.
///
/// `round(amount * crit * (1 + modifier / 100))`, floored at zero. The
/// critical multiplier only applies when it is finite and positive; the
/// modifier stat is read from the healed entity.
pub fn resolve_heal_amount(
    request: &HealRequest,
    entity: EntityId,
    stats: &dyn StatProvider,
    modifier_stat: Option<&StatKey>,
) -> i64 {
    let critical = if request.is_critical
        && request.critical_multiplier.is_finite()
        && request.critical_multiplier > 0.0
    {
        request.critical_multiplier
    } else {
        1.0
    };
    let modifier = modifier_stat.map_or(0, |stat| stats.get(entity, stat));
    scale_amount(request.amount, critical * (1.0 + modifier as f64 / 100.0)).max(0)
}
