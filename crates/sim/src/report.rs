//! Per-action reports printed by the simulator.

use std::fmt;

use health_core::{DamageResolution, HealResolution, HealthError, PreventionReasons, VitalityState};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntitySnapshot {
    pub id: u32,
    pub name: String,
    pub hp: i64,
    pub max_hp: i64,
    pub barrier: i64,
    pub dead: bool,
}

impl From<&VitalityState> for EntitySnapshot {
    fn from(state: &VitalityState) -> Self {
        Self {
            id: state.entity().0,
            name: state.name().to_owned(),
            hp: state.hp(),
            max_hp: state.total_max_hp(),
            barrier: state.barrier(),
            dead: state.is_dead(),
        }
    }
}

impl fmt::Display for EntitySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.name, self.hp, self.max_hp)?;
        if self.barrier > 0 {
            write!(f, " +{}", self.barrier)?;
        }
        if self.dead {
            write!(f, " dead")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Damage {
        requested: i64,
        final_amount: i64,
        hp_lost: i64,
        barrier_consumed: i64,
        prevented: bool,
        reasons: Vec<String>,
        terminated_by: Option<String>,
        killed: bool,
        lifesteal: Option<i64>,
    },
    Heal {
        requested: i64,
        amount: i64,
        gained: i64,
        overheal: i64,
    },
    Resurrected {
        hp: i64,
    },
    Barrier {
        barrier: i64,
    },
    StatSet {
        stat: String,
        value: i64,
        max_hp_changed: bool,
    },
    Advanced {
        millis: u64,
        regenerated: Vec<(u32, i64)>,
    },
    Regenerated {
        gained: Option<i64>,
    },
    MaxHp {
        old: i64,
        new: i64,
    },
    /// The engine refused the action, e.g. healing a dead entity.
    Rejected {
        code: &'static str,
        message: String,
    },
}

impl Outcome {
    pub fn damage(resolution: &DamageResolution) -> Self {
        Self::Damage {
            requested: resolution.context.amounts().initial(),
            final_amount: resolution.final_amount(),
            hp_lost: resolution.hp_lost(),
            barrier_consumed: resolution.barrier_consumed(),
            prevented: resolution.is_prevented(),
            reasons: reason_names(resolution.reasons),
            terminated_by: resolution.termination_step().map(ToString::to_string),
            killed: resolution.killed,
            lifesteal: resolution
                .lifesteal
                .as_ref()
                .and_then(|claim| claim.applied.as_ref())
                .map(|heal| heal.gained),
        }
    }

    pub fn heal(resolution: &HealResolution) -> Self {
        Self::Heal {
            requested: resolution.requested,
            amount: resolution.amount,
            gained: resolution.gained,
            overheal: resolution.overheal(),
        }
    }

    pub fn rejected(err: &HealthError) -> Self {
        Self::Rejected {
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

fn reason_names(reasons: PreventionReasons) -> Vec<String> {
    reasons
        .iter_names()
        .map(|(name, _)| name.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Damage {
                requested,
                final_amount,
                hp_lost,
                barrier_consumed,
                prevented,
                reasons,
                terminated_by,
                killed,
                lifesteal,
            } => {
                if *prevented {
                    write!(f, "{requested} prevented [{}]", reasons.join("|"))?;
                    if let Some(step) = terminated_by {
                        write!(f, " by {step}")?;
                    }
                    return Ok(());
                }
                write!(f, "{requested} -> {final_amount}, hp -{hp_lost}")?;
                if *barrier_consumed > 0 {
                    write!(f, ", barrier -{barrier_consumed}")?;
                }
                if let Some(gained) = lifesteal {
                    write!(f, ", lifesteal +{gained}")?;
                }
                if *killed {
                    write!(f, ", killed")?;
                }
                Ok(())
            }
            Self::Heal {
                requested,
                amount,
                gained,
                overheal,
            } => write!(f, "{requested} -> {amount}, hp +{gained} (overheal {overheal})"),
            Self::Resurrected { hp } => write!(f, "resurrected at {hp}"),
            Self::Barrier { barrier } => write!(f, "barrier now {barrier}"),
            Self::StatSet {
                stat,
                value,
                max_hp_changed,
            } => {
                write!(f, "{stat} = {value}")?;
                if *max_hp_changed {
                    write!(f, ", max hp refreshed")?;
                }
                Ok(())
            }
            Self::Advanced {
                millis,
                regenerated,
            } => {
                write!(f, "{millis}ms")?;
                for (id, gained) in regenerated {
                    write!(f, ", #{id} +{gained}")?;
                }
                Ok(())
            }
            Self::Regenerated { gained } => match gained {
                Some(gained) => write!(f, "hp +{gained}"),
                None => write!(f, "nothing to regenerate"),
            },
            Self::MaxHp { old, new } => write!(f, "max hp {old} -> {new}"),
            Self::Rejected { code, message } => write!(f, "rejected {code}: {message}"),
        }
    }
}

/// Result of one scripted action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionReport {
    pub index: usize,
    pub action: &'static str,
    pub outcome: Outcome,
    /// Event kinds emitted while the action ran.
    pub events: Vec<&'static str>,
    pub entities: Vec<EntitySnapshot>,
}

impl fmt::Display for ActionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>2}] {:<12} {}", self.index, self.action, self.outcome)?;
        let entities: Vec<String> = self.entities.iter().map(ToString::to_string).collect();
        write!(f, " | {}", entities.join(", "))
    }
}
