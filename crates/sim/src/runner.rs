//! Replays an encounter script against a roster.

use anyhow::Result;
use health_content::{Encounter, EncounterAction, MaxHpBonus};
use health_core::{EntityId, EventLog, HealthConfig, HealthEnv, HealthError, Roster, StatTable};

use crate::report::{ActionReport, EntitySnapshot, Outcome};

/// Runs every scripted action in order and collects one report per action.
///
/// Actions the engine refuses with a recoverable error, such as healing a dead
/// entity, are reported as rejected. Any other error aborts the run.
pub struct EncounterRunner<'a> {
    config: &'a HealthConfig,
    name: String,
    roster: Roster,
    stats: StatTable,
    script: Vec<EncounterAction>,
    log: EventLog,
}

impl<'a> EncounterRunner<'a> {
    pub fn new(config: &'a HealthConfig, encounter: Encounter) -> Self {
        Self {
            config,
            name: encounter.name,
            roster: encounter.roster,
            stats: encounter.stats,
            script: encounter.script,
            log: EventLog::new(),
        }
    }

    pub fn run(&mut self) -> Result<Vec<ActionReport>> {
        self.setup_max_hp()?;

        let script = std::mem::take(&mut self.script);
        let mut reports = Vec::with_capacity(script.len());
        for (index, action) in script.iter().enumerate() {
            let outcome = match self.apply(action) {
                Ok(outcome) => outcome,
                Err(err) if err.severity().is_recoverable() => {
                    tracing::warn!(
                        index,
                        action = action.label(),
                        code = err.error_code(),
                        "{}",
                        err
                    );
                    Outcome::rejected(&err)
                }
                Err(err) => {
                    return Err(anyhow::Error::new(err).context(format!(
                        "Action {} ({}) of encounter '{}' failed",
                        index,
                        action.label(),
                        self.name
                    )));
                }
            };

            let events = self.log.drain().iter().map(|event| event.kind()).collect();
            reports.push(ActionReport {
                index,
                action: action.label(),
                outcome,
                events,
                entities: self.snapshot(),
            });
        }
        Ok(reports)
    }

    /// Folds scalings and configured attribute scaling into every entity's max HP.
    fn setup_max_hp(&mut self) -> Result<()> {
        let ids: Vec<EntityId> = self.roster.iter().map(|state| state.entity()).collect();
        let mut env = HealthEnv::new(&self.stats, self.config, &mut self.log);
        for id in ids {
            if let Some(state) = self.roster.get_mut(id) {
                let max_hp = state.setup_max_hp(&mut env).map_err(|err| {
                    anyhow::Error::new(err).context(format!(
                        "Failed to set up max HP of entity {} in encounter '{}'",
                        id, self.name
                    ))
                })?;
                tracing::debug!(entity = %id, max_hp, "max hp set up");
            }
        }
        self.log.clear();
        Ok(())
    }

    fn apply(&mut self, action: &EncounterAction) -> Result<Outcome, HealthError> {
        if let EncounterAction::SetStat {
            entity,
            stat,
            value,
        } = action
        {
            self.stats.set(*entity, stat.clone(), *value);
        }

        let ids: Vec<EntityId> = self.roster.iter().map(|state| state.entity()).collect();
        let mut env = HealthEnv::new(&self.stats, self.config, &mut self.log);
        let roster = &mut self.roster;

        let outcome = match action {
            EncounterAction::Damage(request) => {
                Outcome::damage(&roster.take_damage(request, &mut env)?)
            }
            EncounterAction::Heal { target, request } => {
                Outcome::heal(&roster.heal(*target, request, &mut env)?)
            }
            EncounterAction::Resurrect { target, amount } => Outcome::Resurrected {
                hp: roster.resurrect(*target, *amount, &mut env)?,
            },
            EncounterAction::AddBarrier { target, amount } => Outcome::Barrier {
                barrier: roster.add_barrier(*target, *amount)?,
            },
            EncounterAction::SetStat {
                entity,
                stat,
                value,
            } => Outcome::StatSet {
                stat: stat.as_str().to_owned(),
                value: *value,
                max_hp_changed: roster.require_mut(*entity)?.refresh_max_hp(&mut env)?,
            },
            EncounterAction::Advance(elapsed) => {
                let mut regenerated = Vec::new();
                for id in ids {
                    let state = roster.require_mut(id)?;
                    if let Some(heal) = state.advance_regeneration(*elapsed, &mut env)? {
                        regenerated.push((id.0, heal.gained));
                    }
                }
                Outcome::Advanced {
                    millis: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    regenerated,
                }
            }
            EncounterAction::Regenerate { target } => Outcome::Regenerated {
                gained: roster
                    .require_mut(*target)?
                    .regenerate(&mut env)?
                    .map(|heal| heal.gained),
            },
            EncounterAction::AddMaxHp {
                target,
                bonus,
                behaviour,
            } => {
                let state = roster.require_mut(*target)?;
                let old = state.total_max_hp();
                match bonus {
                    MaxHpBonus::Flat(amount) => {
                        state.add_max_hp_flat_modifier(*amount, *behaviour, &mut env)?;
                    }
                    MaxHpBonus::Percentage(percentage) => {
                        state.add_max_hp_percentage_modifier(*percentage, *behaviour, &mut env)?;
                    }
                }
                Outcome::MaxHp {
                    old,
                    new: state.total_max_hp(),
                }
            }
        };
        Ok(outcome)
    }

    fn snapshot(&self) -> Vec<EntitySnapshot> {
        self.roster.iter().map(EntitySnapshot::from).collect()
    }
}
