use economy_engine::model::ResourceId;
use economy_engine::scenario::Scenario;

fn farm_with_silo(grain_start: f64, silo: f64) -> (economy_engine::EconomyEngine, ResourceId) {
    let mut s = Scenario::new();
    let grain = s.add_resource("grain", grain_start);
    s.add_storage(grain, silo);
    s.building("Farm").produces(grain, 20.0);
    (s.build(), grain)
}

#[test]
fn yield_is_cut_at_capacity() {
    let (mut engine, grain) = farm_with_silo(95.0, 100.0);
    let reports = engine.run_production_cycles();
    assert_eq!(engine.ledger().amount(grain), Some(100.0));
    let farm = &reports.last().unwrap().1;
    assert_eq!(farm.produced_amount(grain), 5.0);
    assert_eq!(farm.partial, vec![grain]);
}

#[test]
fn full_storage_blocks_until_space_frees_up() {
    let (mut engine, grain) = farm_with_silo(100.0, 100.0);
    let check = engine.can_store_production(engine.buildings().last().unwrap().key).unwrap();
    assert!(!check.has_space);

    engine.run_production_cycles();
    assert_eq!(engine.ledger().amount(grain), Some(100.0));

    engine.adjust_resource(grain, -30.0);
    engine.run_production_cycles();
    assert_eq!(engine.ledger().amount(grain), Some(90.0));
}

#[test]
fn balances_never_exceed_capacity_over_many_cycles() {
    let (mut engine, grain) = farm_with_silo(0.0, 150.0);
    for _ in 0..20 {
        engine.run_production_cycles();
        assert!(engine.ledger().amount(grain).unwrap() <= 150.0);
    }
    assert_eq!(engine.ledger().amount(grain), Some(150.0));
}

#[test]
fn disabling_storage_removes_its_capacity() {
    let mut s = Scenario::new();
    let grain = s.add_resource("grain", 0.0);
    let silo_a = s.add_storage(grain, 100.0);
    s.add_storage(grain, 50.0);
    let mut engine = s.build();
    assert_eq!(engine.capacities().limit(grain), Some(150.0));

    engine.set_production_enabled(silo_a, false);
    assert_eq!(engine.capacities().limit(grain), Some(50.0));
}

#[test]
fn perishable_without_storage_decays_to_zero() {
    let mut s = Scenario::new();
    let milk = s.add_perishable("milk", 2.5);
    let mut engine = s.build();

    assert_eq!(engine.capacities().limit(milk), Some(0.0));
    engine.decay_unstored(1.0);
    engine.decay_unstored(1.0);
    assert_eq!(engine.ledger().amount(milk), Some(0.5));
    let lost = engine.decay_unstored(1.0);
    assert_eq!(lost.get(&milk), Some(&0.5));
    assert_eq!(engine.ledger().amount(milk), Some(0.0));
}

#[test]
fn perishable_clamps_when_its_storage_shuts_down() {
    let mut s = Scenario::new();
    let milk = s.add_perishable("milk", 80.0);
    let big = s.add_storage(milk, 100.0);
    s.add_storage(milk, 30.0);
    let mut engine = s.build();

    engine.decay_unstored(1.0);
    assert_eq!(engine.ledger().amount(milk), Some(80.0));

    engine.set_production_enabled(big, false);
    engine.decay_unstored(1.0);
    assert_eq!(engine.ledger().amount(milk), Some(30.0));
    engine.decay_unstored(1.0);
    assert_eq!(engine.ledger().amount(milk), Some(30.0));
}

#[test]
fn perishable_production_is_blocked_without_storage() {
    let mut s = Scenario::new();
    let milk = s.add_perishable("milk", 0.0);
    let dairy = s.building("Dairy").produces(milk, 5.0).key();
    let mut engine = s.build();

    let reports = engine.run_production_cycles();
    assert_eq!(reports[0].1.blocked, vec![milk]);
    assert_eq!(engine.ledger().amount(milk), Some(0.0));
    assert!(!engine.can_store_production(dairy).unwrap().has_space);
}

#[test]
fn usage_totals_span_every_building() {
    let mut s = Scenario::new();
    let coal = s.add_resource("coal", 0.0);
    let steel = s.add_resource("steel", 0.0);
    s.building("Mill").costs(coal, 3.0).produces(steel, 1.0);
    s.building("Mill").costs(coal, 3.0).produces(steel, 1.0).disabled();
    let engine = s.build();

    let usage = engine.resource_usage();
    assert_eq!(usage.used[&coal], 6.0);
    assert_eq!(usage.net(steel), 2.0);
}
