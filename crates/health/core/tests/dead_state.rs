use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use health_core::{
    DamageOutcome, DamageRequest, DamageSource, DamageType, DeathContext, EntityId, EventLog,
    HealRequest, HealSource, HealthConfig, HealthEnv, HealthError, HealthEvent,
    MaxHpIncreaseBehaviour, NoStats, OnDeathStrategy, Percentage, PreventionReasons,
    ResurrectAmount, VitalityState,
};

#[derive(Debug, Default)]
struct CountingDeath {
    calls: AtomicUsize,
}

impl OnDeathStrategy for CountingDeath {
    fn die(&self, _ctx: &DeathContext<'_>) -> Result<(), HealthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn hit(amount: i64) -> DamageRequest {
    DamageRequest::builder()
        .amount(amount)
        .damage_type(DamageType::new("physical"))
        .source(DamageSource::new("melee"))
        .dealer(EntityId(7))
        .target(EntityId(1))
        .build()
        .unwrap()
}

fn potion(amount: i64) -> HealRequest {
    HealRequest::builder()
        .amount(amount)
        .source(HealSource::new("potion"))
        .build()
        .unwrap()
}

fn hero() -> VitalityState {
    VitalityState::builder(EntityId(1), "hero")
        .max_hp(100)
        .build()
        .unwrap()
}

#[test]
fn death_fires_once() {
    let deaths = Arc::new(CountingDeath::default());
    let config = HealthConfig::default().with_on_death(deaths.clone());
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&NoStats, &config, &mut log);
    let mut state = hero();

    let first = state.take_damage(&hit(150), &mut env).unwrap();
    assert!(first.killed);
    assert!(state.is_dead());

    for _ in 0..3 {
        let again = state.take_damage(&hit(150), &mut env).unwrap();
        assert!(!again.killed);
        assert_eq!(again.outcome, DamageOutcome::Prevented);
        assert_eq!(again.reasons, PreventionReasons::ENTITY_DEAD);
    }

    assert_eq!(deaths.calls.load(Ordering::SeqCst), 1);
    assert_eq!(log.count("died"), 1);
}

#[test]
fn set_hp_to_max_on_dead_entity_fails() {
    let config = HealthConfig::default();
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&NoStats, &config, &mut log);
    let mut state = hero();
    state.take_damage(&hit(100), &mut env).unwrap();

    let err = state.set_hp_to_max(&mut env).unwrap_err();
    let dead = err.as_dead_entity().unwrap();
    assert_eq!(dead.attempted_operation, "SetHpToMax");
    assert_eq!(dead.current_hp, 0);
    assert_eq!(dead.entity_name, "hero");
}

#[test]
fn resurrecting_living_entity_fails() {
    let config = HealthConfig::default();
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&NoStats, &config, &mut log);

    let err = hero()
        .resurrect(ResurrectAmount::Hp(50), &mut env)
        .unwrap_err();
    assert!(matches!(err, HealthError::InvalidOperation { .. }));
    assert!(err.to_string().contains("already alive"));
}

#[test]
fn heal_and_damage_work_after_resurrection() {
    let config = HealthConfig::default();
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&NoStats, &config, &mut log);
    let mut state = hero();

    state.take_damage(&hit(100), &mut env).unwrap();
    assert!(state.heal(&potion(10), &mut env).is_err());

    let hp = state
        .resurrect(ResurrectAmount::Percentage(Percentage(50)), &mut env)
        .unwrap();
    assert_eq!(hp, 50);

    let healed = state.heal(&potion(20), &mut env).unwrap();
    assert_eq!(healed.gained, 20);
    assert_eq!(state.hp(), 70);

    let res = state.take_damage(&hit(30), &mut env).unwrap();
    assert_eq!(res.outcome, DamageOutcome::Applied);
    assert_eq!(state.hp(), 40);
}

#[test]
fn resurrection_allows_a_second_death() {
    let deaths = Arc::new(CountingDeath::default());
    let config = HealthConfig::default().with_on_death(deaths.clone());
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&NoStats, &config, &mut log);
    let mut state = hero();

    state.take_damage(&hit(100), &mut env).unwrap();
    state.resurrect(ResurrectAmount::Hp(20), &mut env).unwrap();
    state.take_damage(&hit(100), &mut env).unwrap();

    assert_eq!(deaths.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn max_hp_growth_while_dead_keeps_hp() {
    let config = HealthConfig::default();
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&NoStats, &config, &mut log);
    let mut state = hero();
    state.take_damage(&hit(100), &mut env).unwrap();

    state
        .add_max_hp_flat_modifier(50, MaxHpIncreaseBehaviour::AddHealthUpToMaxHp, &mut env)
        .unwrap();

    assert_eq!(state.hp(), 0);
    assert_eq!(state.total_max_hp(), 150);
    assert!(state.is_dead());
}

#[test]
fn max_hp_shrink_below_threshold_kills() {
    let deaths = Arc::new(CountingDeath::default());
    let config = HealthConfig::default().with_on_death(deaths.clone());
    let mut log = EventLog::new();
    let mut state = VitalityState::builder(EntityId(1), "hero")
        .max_hp(100)
        .hp(50)
        .death_threshold(10)
        .build()
        .unwrap();

    {
        let mut env = HealthEnv::new(&NoStats, &config, &mut log);
        state
            .add_max_hp_flat_modifier(-95, MaxHpIncreaseBehaviour::KeepHp, &mut env)
            .unwrap();
    }

    assert_eq!(state.total_max_hp(), 5);
    assert_eq!(state.hp(), 5);
    assert!(state.is_dead());
    assert_eq!(state.is_dead(), state.hp() <= state.death_threshold());
    assert_eq!(log.count("died"), 1);
    assert_eq!(deaths.calls.load(Ordering::SeqCst), 1);
    assert!(
        log.events()
            .iter()
            .any(|event| matches!(event, HealthEvent::Died { killer: None, .. }))
    );

    // Growing back while dead leaves HP untouched.
    let mut env = HealthEnv::new(&NoStats, &config, &mut log);
    state
        .add_max_hp_flat_modifier(95, MaxHpIncreaseBehaviour::AddHealthUpToMaxHp, &mut env)
        .unwrap();
    drop(env);
    assert_eq!(state.hp(), 5);
    assert_eq!(log.count("died"), 1);
}

#[test]
fn max_hp_shrink_above_threshold_stays_alive() {
    let config = HealthConfig::default();
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&NoStats, &config, &mut log);
    let mut state = VitalityState::builder(EntityId(1), "hero")
        .max_hp(100)
        .death_threshold(10)
        .build()
        .unwrap();

    state
        .add_max_hp_flat_modifier(-80, MaxHpIncreaseBehaviour::KeepHp, &mut env)
        .unwrap();

    assert_eq!(state.hp(), 20);
    assert!(state.is_alive());
    assert_eq!(log.count("died"), 0);
}

#[test]
fn regeneration_stops_while_dead() {
    use std::time::Duration;

    use health_core::{PassiveRegeneration, StatTable};

    let config = HealthConfig::default().with_passive_regeneration(PassiveRegeneration {
        stat: "hp_regen".into(),
        source: HealSource::new("regeneration"),
        interval: Duration::from_secs(1),
    });
    let stats = StatTable::new().with(EntityId(1), "hp_regen", 5);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut state = hero();
    state.take_damage(&hit(100), &mut env).unwrap();

    let regen = state
        .advance_regeneration(Duration::from_secs(10), &mut env)
        .unwrap();
    assert!(regen.is_none());
    assert_eq!(state.hp(), 0);
    assert!(state.regenerate(&mut env).is_err());
}
