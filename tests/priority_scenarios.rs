use std::collections::BTreeSet;

use economy_engine::model::BuildingKey;
use economy_engine::scenario::Scenario;

#[test]
fn shortage_sheds_only_the_largest_consumer() {
    let mut s = Scenario::new();
    let coal = s.add_resource("coal", 10.0);
    let small = s.add_consumer(coal, 4.0);
    let big = s.add_consumer(coal, 7.0);
    let tiny = s.add_consumer(coal, 3.0);
    let mut engine = s.build();

    let decision = engine.tick();
    assert_eq!(decision.to_stop, BTreeSet::from([big]));
    assert!(decision.to_restart.is_empty());
    assert!(engine.building(small).unwrap().production_enabled);
    assert!(engine.building(tiny).unwrap().production_enabled);
}

#[test]
fn recovered_supply_restarts_the_stopped_consumer() {
    let mut s = Scenario::new();
    let coal = s.add_resource("coal", 10.0);
    s.add_consumer(coal, 4.0);
    let big = s.add_consumer(coal, 7.0);
    s.add_consumer(coal, 3.0);
    let mut engine = s.build();

    engine.tick();
    engine.adjust_resource(coal, 10.0);
    let decision = engine.tick();
    assert_eq!(decision.to_restart, BTreeSet::from([big]));
    assert!(engine.stopped_by_engine().is_empty());
}

#[test]
fn stable_supply_reaches_a_fixed_point() {
    let mut s = Scenario::new();
    let coal = s.add_resource("coal", 10.0);
    for amount in [4.0, 7.0, 3.0] {
        s.add_consumer(coal, amount);
    }
    let mut engine = s.build();

    engine.tick();
    for _ in 0..5 {
        assert!(engine.tick().is_empty());
    }
}

#[test]
fn exempt_infrastructure_is_never_shed() {
    let mut s = Scenario::new();
    let coal = s.add_resource("coal", 1.0);
    let hq = s.building("Command Centre").costs(coal, 50.0).exempt().key();
    let mut engine = s.build();

    assert!(engine.tick().is_empty());
    assert!(engine.building(hq).unwrap().production_enabled);
}

#[test]
fn construction_sites_are_not_evaluated() {
    let mut s = Scenario::new();
    let coal = s.add_resource("coal", 1.0);
    s.building("Site").costs(coal, 50.0).under_construction();
    let mut engine = s.build();
    assert!(engine.tick().is_empty());
}

#[test]
fn manual_stop_is_respected_across_shortage_and_recovery() {
    let mut s = Scenario::new();
    let coal = s.add_resource("coal", 10.0);
    let a = s.add_consumer(coal, 6.0);
    let b = s.add_consumer(coal, 6.0);
    let mut engine = s.build();

    engine.set_production_enabled(b, false);
    let decision = engine.tick();
    assert!(decision.is_empty(), "6 <= 10 once b is off");

    engine.adjust_resource(coal, -8.0);
    let decision = engine.tick();
    assert_eq!(decision.to_stop, BTreeSet::from([a]));

    engine.adjust_resource(coal, 100.0);
    let decision = engine.tick();
    assert_eq!(decision.to_restart, BTreeSet::from([a]));
    assert!(!engine.building(b).unwrap().production_enabled);
}

#[test]
fn removal_clears_engine_stop_flag() {
    let mut s = Scenario::new();
    let coal = s.add_resource("coal", 1.0);
    let hog = s.add_consumer(coal, 5.0);
    let mut engine = s.build();

    engine.tick();
    assert!(engine.stopped_by_engine().contains(&hog));
    engine.on_building_removed(hog);
    assert!(engine.stopped_by_engine().is_empty());
    assert!(engine.consumption_index().consumers(coal).is_empty());
}

#[test]
fn equal_consumers_shed_in_placement_order() {
    let mut s = Scenario::new();
    let coal = s.add_resource("coal", 5.0);
    let first = s.building("Forge").costs(coal, 5.0).at(9, 9).key();
    let second = s.building("Forge").costs(coal, 5.0).at(1, 1).key();
    let mut engine = s.build();

    let decision = engine.tick();
    assert_eq!(decision.to_stop, BTreeSet::from([first]));
    assert!(engine.building(second).unwrap().production_enabled);
    assert_eq!(second, BuildingKey::new(1, 1));
}
