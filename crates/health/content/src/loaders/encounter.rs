//! Encounter script loader.
//!
//! An encounter is a set of combatants with their stats plus a script of
//! actions for the simulator to replay in order.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use health_core::stats::ScalingTerm;
use health_core::{
    DamageRequest, EntityId, HealRequest, MaxHpIncreaseBehaviour, Percentage, ResurrectAmount,
    Roster, StatKey, StatScaling, StatTable, VitalityState,
};
use serde::{Deserialize, Serialize};

use crate::catalog::DamageCatalog;
use crate::loaders::{LoadResult, parse_strategy, read_file};

// ============================================================================
// Specs
// ============================================================================

/// Combatant as written in an encounter file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub id: u32,
    pub name: String,
    pub max_hp: i64,
    /// Starting HP; full health when omitted.
    #[serde(default)]
    pub hp: Option<i64>,
    #[serde(default)]
    pub barrier: i64,
    #[serde(default)]
    pub death_threshold: i64,
    #[serde(default)]
    pub allow_negative_hp: bool,
    #[serde(default)]
    pub immune: bool,
    #[serde(default)]
    pub stats: BTreeMap<String, i64>,
    #[serde(default)]
    pub scalings: Vec<ScalingTerm>,
    /// Per-entity step order overriding the configured default.
    #[serde(default)]
    pub strategy: Option<Vec<String>>,
}

/// One scripted action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActionSpec {
    Damage {
        dealer: u32,
        target: u32,
        amount: i64,
        damage_type: String,
        source: String,
        #[serde(default)]
        critical: Option<f64>,
        #[serde(default)]
        ignore: bool,
    },
    Heal {
        target: u32,
        amount: i64,
        source: String,
        #[serde(default)]
        healer: Option<u32>,
        #[serde(default)]
        critical: Option<f64>,
        #[serde(default)]
        ignore: bool,
    },
    /// Exactly one of `hp` or `percentage` must be given.
    Resurrect {
        target: u32,
        #[serde(default)]
        hp: Option<i64>,
        #[serde(default)]
        percentage: Option<i64>,
    },
    AddBarrier {
        target: u32,
        amount: i64,
    },
    SetStat {
        entity: u32,
        stat: String,
        value: i64,
    },
    Advance {
        millis: u64,
    },
    Regenerate {
        target: u32,
    },
    /// Exactly one of `flat` or `percentage` must be given.
    AddMaxHp {
        target: u32,
        #[serde(default)]
        flat: Option<i64>,
        #[serde(default)]
        percentage: Option<i64>,
        #[serde(default)]
        behaviour: MaxHpIncreaseBehaviour,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterSpec {
    pub name: String,
    pub entities: Vec<CombatantSpec>,
    #[serde(default)]
    pub script: Vec<ActionSpec>,
}

// ============================================================================
// Resolved encounter
// ============================================================================

/// Max-HP modifier added by a scripted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaxHpBonus {
    Flat(i64),
    Percentage(Percentage),
}

/// Scripted action with every name resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum EncounterAction {
    Damage(DamageRequest),
    Heal {
        target: EntityId,
        request: HealRequest,
    },
    Resurrect {
        target: EntityId,
        amount: ResurrectAmount,
    },
    AddBarrier {
        target: EntityId,
        amount: i64,
    },
    SetStat {
        entity: EntityId,
        stat: StatKey,
        value: i64,
    },
    Advance(Duration),
    Regenerate {
        target: EntityId,
    },
    AddMaxHp {
        target: EntityId,
        bonus: MaxHpBonus,
        behaviour: MaxHpIncreaseBehaviour,
    },
}

impl EncounterAction {
    /// Short action name used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Damage(_) => "damage",
            Self::Heal { .. } => "heal",
            Self::Resurrect { .. } => "resurrect",
            Self::AddBarrier { .. } => "add_barrier",
            Self::SetStat { .. } => "set_stat",
            Self::Advance(_) => "advance",
            Self::Regenerate { .. } => "regenerate",
            Self::AddMaxHp { .. } => "add_max_hp",
        }
    }
}

/// A loaded encounter ready to run.
///
/// Max HP has not been set up yet: scalings depend on the health config, so
/// the runner calls `setup_max_hp` on every entity before the script starts.
#[derive(Debug)]
pub struct Encounter {
    pub name: String,
    pub roster: Roster,
    pub stats: StatTable,
    pub script: Vec<EncounterAction>,
}

impl EncounterSpec {
    pub fn resolve(&self, catalog: &DamageCatalog) -> LoadResult<Encounter> {
        let mut ids = BTreeSet::new();
        let mut roster = Roster::new();
        let mut stats = StatTable::new();

        for spec in &self.entities {
            if !ids.insert(spec.id) {
                return Err(anyhow::anyhow!(
                    "Entity id {} is used more than once",
                    spec.id
                ));
            }
            let entity = EntityId(spec.id);
            roster.insert(spec.resolve()?);
            for (stat, value) in &spec.stats {
                stats.set(entity, stat.clone(), *value);
            }
        }

        let entity = |id: u32| -> LoadResult<EntityId> {
            if ids.contains(&id) {
                Ok(EntityId(id))
            } else {
                Err(anyhow::anyhow!("Script references unknown entity {}", id))
            }
        };

        let script = self
            .script
            .iter()
            .map(|action| resolve_action(action, catalog, &entity))
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(Encounter {
            name: self.name.clone(),
            roster,
            stats,
            script,
        })
    }
}

impl CombatantSpec {
    fn resolve(&self) -> LoadResult<VitalityState> {
        let mut builder = VitalityState::builder(EntityId(self.id), self.name.clone())
            .max_hp(self.max_hp)
            .barrier(self.barrier)
            .death_threshold(self.death_threshold)
            .allow_negative_hp(self.allow_negative_hp)
            .immune(self.immune);
        if let Some(hp) = self.hp {
            builder = builder.hp(hp);
        }
        if !self.scalings.is_empty() {
            let scaling: StatScaling = self.scalings.iter().cloned().collect();
            builder = builder.scaling(Arc::new(scaling));
        }
        if let Some(names) = &self.strategy {
            builder = builder.strategy(parse_strategy(names)?);
        }

        builder
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid entity '{}': {}", self.name, e))
    }
}

fn resolve_action(
    action: &ActionSpec,
    catalog: &DamageCatalog,
    entity: &impl Fn(u32) -> LoadResult<EntityId>,
) -> LoadResult<EncounterAction> {
    let resolved = match action {
        ActionSpec::Damage {
            dealer,
            target,
            amount,
            damage_type,
            source,
            critical,
            ignore,
        } => {
            let mut builder = DamageRequest::builder()
                .amount(*amount)
                .damage_type(catalog.damage_type(damage_type)?.clone())
                .source(catalog.damage_source(source)?.clone())
                .dealer(entity(*dealer)?)
                .target(entity(*target)?)
                .ignore(*ignore);
            if let Some(multiplier) = critical {
                builder = builder.critical(*multiplier);
            }
            EncounterAction::Damage(builder.build()?)
        }
        ActionSpec::Heal {
            target,
            amount,
            source,
            healer,
            critical,
            ignore,
        } => {
            let mut builder = HealRequest::builder()
                .amount(*amount)
                .source(catalog.heal_source(source)?.clone())
                .ignore(*ignore);
            if let Some(healer) = healer {
                builder = builder.healer(entity(*healer)?);
            }
            if let Some(multiplier) = critical {
                builder = builder.critical(*multiplier);
            }
            EncounterAction::Heal {
                target: entity(*target)?,
                request: builder.build()?,
            }
        }
        ActionSpec::Resurrect {
            target,
            hp,
            percentage,
        } => {
            let amount = match (hp, percentage) {
                (Some(hp), None) => ResurrectAmount::Hp(*hp),
                (None, Some(points)) => ResurrectAmount::Percentage(Percentage(*points)),
                _ => {
                    return Err(anyhow::anyhow!(
                        "Resurrect needs exactly one of 'hp' or 'percentage'"
                    ));
                }
            };
            EncounterAction::Resurrect {
                target: entity(*target)?,
                amount,
            }
        }
        ActionSpec::AddBarrier { target, amount } => EncounterAction::AddBarrier {
            target: entity(*target)?,
            amount: *amount,
        },
        ActionSpec::SetStat {
            entity: id,
            stat,
            value,
        } => EncounterAction::SetStat {
            entity: entity(*id)?,
            stat: StatKey::new(stat.clone()),
            value: *value,
        },
        ActionSpec::Advance { millis } => EncounterAction::Advance(Duration::from_millis(*millis)),
        ActionSpec::Regenerate { target } => EncounterAction::Regenerate {
            target: entity(*target)?,
        },
        ActionSpec::AddMaxHp {
            target,
            flat,
            percentage,
            behaviour,
        } => {
            let bonus = match (flat, percentage) {
                (Some(amount), None) => MaxHpBonus::Flat(*amount),
                (None, Some(points)) => MaxHpBonus::Percentage(Percentage(*points)),
                _ => {
                    return Err(anyhow::anyhow!(
                        "AddMaxHp needs exactly one of 'flat' or 'percentage'"
                    ));
                }
            };
            EncounterAction::AddMaxHp {
                target: entity(*target)?,
                bonus,
                behaviour: *behaviour,
            }
        }
    };
    Ok(resolved)
}

/// Loader for encounter scripts from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path, catalog: &DamageCatalog) -> LoadResult<Encounter> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    pub fn parse(content: &str, catalog: &DamageCatalog) -> LoadResult<Encounter> {
        let spec: EncounterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        let encounter = spec.resolve(catalog)?;
        tracing::debug!(
            encounter = %encounter.name,
            entities = encounter.roster.len(),
            actions = encounter.script.len(),
            "loaded encounter"
        );
        Ok(encounter)
    }
}
