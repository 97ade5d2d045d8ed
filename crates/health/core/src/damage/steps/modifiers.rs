use std::collections::HashMap;

use crate::damage::context::DamageContext;
use crate::damage::kind::{DamageSource, DamageType};
use crate::damage::ledger::StepId;
use crate::damage::prevention::PreventionReasons;
use crate::damage::step::{DamageStep, StepEnv, StepOutput};
use crate::entity::EntityId;
use crate::numeric::scale_amount;
use crate::stats::{StatKey, StatProvider};

/// Modifier at or below this many percent points makes the target immune.
pub const IMMUNITY_THRESHOLD: i64 = -100;

/// Stats holding the target's percentage damage modifiers.
///
/// Negative values are resistances, positive values are weaknesses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageModifiersConfig {
    /// Applies to every damage instance.
    pub generic_stat: Option<StatKey>,
    /// Keyed by damage source name.
    pub source_stats: HashMap<String, StatKey>,
    /// Keyed by damage type name.
    pub type_stats: HashMap<String, StatKey>,
}

impl DamageModifiersConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_generic(mut self, stat: impl Into<StatKey>) -> Self {
        self.generic_stat = Some(stat.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: &DamageSource, stat: impl Into<StatKey>) -> Self {
        self.source_stats.insert(source.name().to_owned(), stat.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, damage_type: &DamageType, stat: impl Into<StatKey>) -> Self {
        self.type_stats
            .insert(damage_type.name().to_owned(), stat.into());
        self
    }

    fn read(stats: &dyn StatProvider, target: EntityId, stat: Option<&StatKey>) -> i64 {
        stat.map_or(0, |stat| stats.get(target, stat))
    }
}

/// Applies weakness, resistance and immunity modifiers read from the target.
///
/// Immunity precedence is generic, then source, then type; only the first
/// immunity found is reported. Otherwise the three modifiers are summed and
/// applied in one multiplication.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApplyDmgModifiersStep;

impl ApplyDmgModifiersStep {
    pub const ID: StepId = StepId::from_static("apply_damage_modifiers");
}

impl DamageStep for ApplyDmgModifiersStep {
    fn id(&self) -> StepId {
        Self::ID
    }

    fn compute(&self, ctx: &DamageContext, env: &mut StepEnv<'_>) -> StepOutput {
        let current = ctx.amounts().current();
        let Some(config) = env.modifiers else {
            return StepOutput::amount(current);
        };
        let target = ctx.target();

        let generic = DamageModifiersConfig::read(env.stats, target, config.generic_stat.as_ref());
        if generic <= IMMUNITY_THRESHOLD {
            return StepOutput::amount(0).with_reason(PreventionReasons::ALL_DAMAGE_IMMUNE);
        }

        let source = DamageModifiersConfig::read(
            env.stats,
            target,
            config.source_stats.get(ctx.source().name()),
        );
        if source <= IMMUNITY_THRESHOLD {
            return StepOutput::amount(0).with_reason(PreventionReasons::DAMAGE_SOURCE_IMMUNE);
        }

        let by_type = DamageModifiersConfig::read(
            env.stats,
            target,
            config.type_stats.get(ctx.damage_type().name()),
        );
        if by_type <= IMMUNITY_THRESHOLD {
            return StepOutput::amount(0).with_reason(PreventionReasons::DAMAGE_TYPE_IMMUNE);
        }

        let net = generic + source + by_type;
        let post = scale_amount(current, 1.0 + net as f64 / 100.0).max(0);
        tracing::debug!(generic, source, by_type, pre = current, post, "damage modifiers applied");
        StepOutput::amount(post)
    }
}
