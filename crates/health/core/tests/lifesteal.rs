use health_core::{
    ApplyDefenseStep, DamageRequest, DamageSource, DamageType, EntityId, EventLog,
    FlatDamageReduction, HealSource, HealthConfig, HealthEnv, LifestealAmountSelector,
    LifestealConfig, LifestealStatConfig, Roster, StatTable, StepPoint, VitalityState,
};

const DEALER: EntityId = EntityId(1);
const TARGET: EntityId = EntityId(2);

fn armored() -> DamageType {
    DamageType::builder("physical")
        .reduced_by("armor")
        .damage_reduction(FlatDamageReduction)
        .build()
        .unwrap()
}

fn config(selector: LifestealAmountSelector) -> HealthConfig {
    HealthConfig::default().with_lifesteal(LifestealConfig::new().with(
        &armored(),
        LifestealStatConfig {
            stat: "lifesteal".into(),
            heal_source: HealSource::new("lifesteal"),
            selector,
        },
    ))
}

fn roster(dealer_hp: i64) -> Roster {
    [
        VitalityState::builder(DEALER, "vampire")
            .max_hp(100)
            .hp(dealer_hp)
            .build()
            .unwrap(),
        VitalityState::builder(TARGET, "victim")
            .max_hp(200)
            .build()
            .unwrap(),
    ]
    .into_iter()
    .collect()
}

fn strike(amount: i64, damage_type: DamageType) -> DamageRequest {
    DamageRequest::builder()
        .amount(amount)
        .damage_type(damage_type)
        .source(DamageSource::new("bite"))
        .dealer(DEALER)
        .target(TARGET)
        .build()
        .unwrap()
}

fn stats() -> StatTable {
    StatTable::new()
        .with(DEALER, "lifesteal", 25)
        .with(TARGET, "armor", 30)
}

/// 100 raw, armor 30: defense pre 100, post 70, final 70.
fn dealer_hp_after(selector: LifestealAmountSelector) -> i64 {
    let stats = stats();
    let config = config(selector);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut roster = roster(10);
    roster.take_damage(&strike(100, armored()), &mut env).unwrap();
    roster.get(DEALER).unwrap().hp()
}

#[test]
fn basis_modes() {
    assert_eq!(dealer_hp_after(LifestealAmountSelector::Initial), 35);
    assert_eq!(dealer_hp_after(LifestealAmountSelector::Final), 28);
    assert_eq!(
        dealer_hp_after(LifestealAmountSelector::step(ApplyDefenseStep::ID, StepPoint::Pre)),
        35
    );
    assert_eq!(
        dealer_hp_after(LifestealAmountSelector::step(ApplyDefenseStep::ID, StepPoint::Post)),
        28
    );
}

#[test]
fn unmapped_damage_type_has_no_lifesteal() {
    let stats = stats();
    let config = config(LifestealAmountSelector::Final);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut roster = roster(10);

    let resolution = roster
        .take_damage(&strike(100, DamageType::new("fire")), &mut env)
        .unwrap();
    assert!(resolution.lifesteal.is_none());
    assert_eq!(roster.get(DEALER).unwrap().hp(), 10);
}

#[test]
fn never_overheals() {
    let stats = stats();
    let config = config(LifestealAmountSelector::Final);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut roster = roster(95);

    roster.take_damage(&strike(100, armored()), &mut env).unwrap();
    let dealer = roster.get(DEALER).unwrap();
    assert_eq!(dealer.hp(), dealer.total_max_hp());
}

#[test]
fn dead_dealer_forfeits_claim() {
    let stats = stats();
    let config = config(LifestealAmountSelector::Final);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut roster = roster(0);

    let resolution = roster.take_damage(&strike(100, armored()), &mut env).unwrap();
    let claim = resolution.lifesteal.unwrap();
    assert!(claim.applied.is_none());
    assert_eq!(roster.get(DEALER).unwrap().hp(), 0);
}

#[test]
fn unknown_dealer_forfeits_claim() {
    let stats = stats();
    let config = config(LifestealAmountSelector::Final);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut roster = roster(10);
    roster.remove(DEALER);

    let resolution = roster.take_damage(&strike(100, armored()), &mut env).unwrap();
    assert!(resolution.lifesteal.unwrap().applied.is_none());
    assert_eq!(roster.get(TARGET).unwrap().hp(), 130);
}

#[test]
fn self_inflicted_lifesteal_heals_the_same_entity() {
    let stats = StatTable::new().with(DEALER, "lifesteal", 50);
    let config = config(LifestealAmountSelector::Final);
    let mut log = EventLog::new();
    let mut env = HealthEnv::new(&stats, &config, &mut log);
    let mut roster = roster(100);

    let request = DamageRequest::builder()
        .amount(40)
        .damage_type(armored())
        .source(DamageSource::new("blood_magic"))
        .dealer(DEALER)
        .target(DEALER)
        .build()
        .unwrap();
    roster.take_damage(&request, &mut env).unwrap();

    assert_eq!(roster.get(DEALER).unwrap().hp(), 80);
}
