use std::time::Duration;

use health_core::{
    DamageRequest, DamageSource, DamageType, EntityId, EventLog, HealSource, HealthConfig,
    HealthEnv, HealthEvent, PassiveRegeneration, StatKey, StatTable, VitalityState,
};

const HERO: EntityId = EntityId(1);

fn hero(hp: i64) -> VitalityState {
    VitalityState::builder(HERO, "hero")
        .max_hp(100)
        .hp(hp)
        .build()
        .unwrap()
}

fn passive(interval: Duration) -> HealthConfig {
    HealthConfig::new().with_passive_regeneration(PassiveRegeneration {
        stat: StatKey::new("hp_regen"),
        source: HealSource::new("regeneration"),
        interval,
    })
}

#[test]
fn passive_regeneration_heals_per_whole_interval() {
    let config = passive(Duration::from_secs(1));
    let stats = StatTable::new().with(HERO, "hp_regen", 4);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut hero = hero(50);

    assert!(
        hero.advance_regeneration(Duration::from_millis(900), &mut env)
            .unwrap()
            .is_none()
    );
    let heal = hero
        .advance_regeneration(Duration::from_millis(2200), &mut env)
        .unwrap()
        .expect("three intervals elapsed");
    assert_eq!(heal.gained, 12);
    assert_eq!(heal.source.name(), "regeneration");
    assert_eq!(heal.healer, Some(HERO));
    assert_eq!(hero.hp(), 62);

    // 100ms carried over from the previous call.
    let heal = hero
        .advance_regeneration(Duration::from_millis(900), &mut env)
        .unwrap();
    assert_eq!(heal.map(|h| h.gained), Some(4));
}

#[test]
fn passive_regeneration_never_overheals() {
    let config = passive(Duration::from_secs(1));
    let stats = StatTable::new().with(HERO, "hp_regen", 50);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut hero = hero(90);

    let heal = hero
        .advance_regeneration(Duration::from_secs(5), &mut env)
        .unwrap()
        .unwrap();
    assert_eq!(heal.amount, 250);
    assert_eq!(heal.gained, 10);
    assert_eq!(hero.hp(), 100);
}

#[test]
fn dead_entities_lose_accumulated_time() {
    let config = passive(Duration::from_secs(1));
    let stats = StatTable::new().with(HERO, "hp_regen", 5);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut hero = hero(10);

    hero.advance_regeneration(Duration::from_millis(800), &mut env)
        .unwrap();
    let lethal = DamageRequest::builder()
        .amount(10)
        .damage_type(DamageType::new("physical"))
        .source(DamageSource::new("melee"))
        .dealer(EntityId(2))
        .target(HERO)
        .build()
        .unwrap();
    hero.take_damage(&lethal, &mut env).unwrap();
    assert!(hero.is_dead());

    assert!(
        hero.advance_regeneration(Duration::from_secs(3), &mut env)
            .unwrap()
            .is_none()
    );
    assert_eq!(hero.hp(), 0);

    hero.resurrect(health_core::ResurrectAmount::Hp(20), &mut env)
        .unwrap();
    // The 800ms banked before death were discarded.
    assert!(
        hero.advance_regeneration(Duration::from_millis(300), &mut env)
            .unwrap()
            .is_none()
    );
}

#[test]
fn zero_interval_disables_passive_regeneration() {
    let config = passive(Duration::ZERO);
    let stats = StatTable::new().with(HERO, "hp_regen", 5);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut hero = hero(10);

    assert!(
        hero.advance_regeneration(Duration::from_secs(10), &mut env)
            .unwrap()
            .is_none()
    );
    assert_eq!(hero.hp(), 10);
}

#[test]
fn manual_regeneration_goes_through_heal() {
    let config = HealthConfig::new()
        .with_manual_regeneration("regeneration")
        .with_heal_modifier("healing_received");
    let stats = StatTable::new()
        .with(HERO, "regeneration", 10)
        .with(HERO, "healing_received", 50);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut hero = hero(40);

    let heal = hero.regenerate(&mut env).unwrap().unwrap();
    assert_eq!(heal.source.name(), HealthConfig::DEFAULT_MANUAL_REGENERATION_SOURCE);
    assert_eq!(heal.gained, 15);
    assert_eq!(hero.hp(), 55);

    assert_eq!(
        log.kinds(),
        vec!["pre_heal", "health_gained", "healed"],
        "manual regeneration emits the normal heal notifications"
    );
    assert!(matches!(log.events()[2], HealthEvent::Healed(_)));
}

#[test]
fn manual_regeneration_uses_configured_source() {
    let config = HealthConfig::new()
        .with_manual_regeneration("regeneration")
        .with_manual_regeneration_source(HealSource::new("second_wind"));
    let stats = StatTable::new().with(HERO, "regeneration", 10);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut hero = hero(40);

    let heal = hero.regenerate(&mut env).unwrap().unwrap();
    assert_eq!(heal.source, HealSource::new("second_wind"));
    assert_eq!(hero.hp(), 50);
}

#[test]
fn manual_regeneration_without_stat_is_a_no_op() {
    let config = HealthConfig::new();
    let stats = StatTable::new().with(HERO, "regeneration", 10);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut hero = hero(40);

    assert!(hero.regenerate(&mut env).unwrap().is_none());
    assert!(log.is_empty());
}
