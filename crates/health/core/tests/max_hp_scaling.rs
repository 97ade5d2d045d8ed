use std::sync::Arc;

use health_core::{
    EntityId, EventLog, HealthConfig, HealthEnv, HealthEvent, MaxHpIncreaseBehaviour,
    MaxHpScaling, NoStats, Percentage, StatScaling, StatTable, VitalityState,
};

const HERO: EntityId = EntityId(1);

fn hero() -> VitalityState {
    VitalityState::builder(HERO, "hero")
        .max_hp(100)
        .build()
        .unwrap()
}

#[test]
fn stat_scaling_adds_contribution() {
    let stats = StatTable::new().with(HERO, "vitality", 5);
    let config = HealthConfig::default();
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut state = hero();

    let scaling: Arc<dyn MaxHpScaling> = Arc::new(StatScaling::single("vitality", 2.0));
    state
        .add_max_hp_scaling(scaling, MaxHpIncreaseBehaviour::KeepHp, &mut env)
        .unwrap();

    assert_eq!(state.total_max_hp(), 110);
    assert_eq!(state.hp(), 100);
}

#[test]
fn scaling_participates_in_percentage() {
    let stats = StatTable::new().with(HERO, "vitality", 5);
    let config = HealthConfig::default();
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut state = hero();

    state.add_max_hp_scaling(
        Arc::new(StatScaling::single("vitality", 2.0)),
        MaxHpIncreaseBehaviour::KeepHp,
        &mut env,
    )
    .unwrap();
    state
        .add_max_hp_flat_modifier(40, MaxHpIncreaseBehaviour::KeepHp, &mut env)
        .unwrap();
    state
        .add_max_hp_percentage_modifier(Percentage(50), MaxHpIncreaseBehaviour::KeepHp, &mut env)
        .unwrap();

    assert_eq!(state.total_max_hp(), 225);
}

#[test]
fn refresh_follows_stat_changes_until_scaling_removed() {
    let mut stats = StatTable::new().with(HERO, "vitality", 5);
    let config = HealthConfig::default();
    let mut log = EventLog::new();
    let mut state = hero();
    let scaling: Arc<dyn MaxHpScaling> = Arc::new(StatScaling::single("vitality", 2.0));

    {
        let mut env = HealthEnv::new(&stats, &config, &mut log);
        state
            .add_max_hp_scaling(scaling.clone(), MaxHpIncreaseBehaviour::KeepHp, &mut env)
            .unwrap();
    }
    assert_eq!(state.total_max_hp(), 110);

    stats.set(HERO, "vitality", 10);
    {
        let mut env = HealthEnv::new(&stats, &config, &mut log);
        assert!(state.refresh_max_hp(&mut env).unwrap());
        assert!(!state.refresh_max_hp(&mut env).unwrap());
    }
    assert_eq!(state.total_max_hp(), 120);

    {
        let mut env = HealthEnv::new(&stats, &config, &mut log);
        assert!(state.remove_max_hp_scaling(&scaling, &mut env).unwrap());
        assert!(!state.remove_max_hp_scaling(&scaling, &mut env).unwrap());
    }
    assert_eq!(state.total_max_hp(), 100);

    stats.set(HERO, "vitality", 50);
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    assert!(!state.refresh_max_hp(&mut env).unwrap());
    assert_eq!(state.total_max_hp(), 100);
}

#[test]
fn clear_removes_every_scaling() {
    let stats = StatTable::new().with(HERO, "vitality", 5).with(HERO, "level", 4);
    let config = HealthConfig::default();
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut state = hero();

    state.add_max_hp_scaling(
        Arc::new(StatScaling::single("vitality", 2.0)),
        MaxHpIncreaseBehaviour::KeepHp,
        &mut env,
    )
    .unwrap();
    state.add_max_hp_scaling(
        Arc::new(StatScaling::single("level", 5.0)),
        MaxHpIncreaseBehaviour::KeepHp,
        &mut env,
    )
    .unwrap();
    assert_eq!(state.total_max_hp(), 130);

    state.clear_max_hp_scalings(&mut env).unwrap();
    assert!(state.max_hp_scalings().is_empty());
    assert_eq!(state.total_max_hp(), 100);
}

#[test]
fn setup_applies_configured_attribute_scaling() {
    let stats = StatTable::new().with(HERO, "constitution", 4);
    let config = HealthConfig::default()
        .with_attributes_scaling(Arc::new(StatScaling::single("constitution", 3.0)));
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut state = hero();

    assert_eq!(state.setup_max_hp(&mut env).unwrap(), 112);
    assert_eq!(state.hp(), 112);

    let changes: Vec<(i64, i64)> = log
        .events()
        .iter()
        .filter_map(|event| match event {
            HealthEvent::MaxHealthChanged { old, new, .. } => Some((*old, *new)),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![(100, 112)]);
}

#[test]
fn setup_keeps_wounded_hp() {
    let stats = StatTable::new().with(HERO, "constitution", 4);
    let config = HealthConfig::default()
        .with_attributes_scaling(Arc::new(StatScaling::single("constitution", 3.0)));
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut state = VitalityState::builder(HERO, "hero")
        .max_hp(100)
        .hp(60)
        .build()
        .unwrap();

    state.setup_max_hp(&mut env).unwrap();
    assert_eq!(state.total_max_hp(), 112);
    assert_eq!(state.hp(), 60);
}

#[test]
fn refresh_without_scalings_is_noop() {
    let config = HealthConfig::default();
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&NoStats, &config, &mut log);
    let mut state = hero();

    assert!(!state.refresh_max_hp(&mut env).unwrap());
    assert!(log.is_empty());
}
