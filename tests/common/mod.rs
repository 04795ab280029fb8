#![allow(dead_code)]

use economy_engine::economy::EconomyEngine;
use economy_engine::model::*;
use economy_engine::scenario::Scenario;

/// Ids of the standard test settlement built by [`build_test_economy`].
pub struct TestEconomy {
    pub engine: EconomyEngine,
    pub wood: ResourceId,
    pub workers: ResourceId,
    pub coal: ResourceId,
    pub grain: ResourceId,
    pub milk: ResourceId,
}

/// A small settlement: 100 wood, 10 workers, 10 coal, no grain, 4 milk.
/// No buildings are placed.
pub fn build_test_economy() -> TestEconomy {
    let mut s = Scenario::new();
    let wood = s.add_resource("wood", 100.0);
    let workers = s.add_labor("workers", 10.0);
    let coal = s.add_resource("coal", 10.0);
    let grain = s.add_resource("grain", 0.0);
    let milk = s.add_perishable("milk", 4.0);
    TestEconomy {
        engine: s.build(),
        wood,
        workers,
        coal,
        grain,
        milk,
    }
}

/// The sawmill from the cancel scenario: 50 wood and 5 workers to build.
pub fn sawmill(wood: ResourceId, workers: ResourceId) -> BuildingDefinition {
    BuildingDefinition::new("Sawmill")
        .with_build_cost([ResourceAmount::new(wood, 50.0), ResourceAmount::new(workers, 5.0)])
}

/// Ledger balance plus labor still held by buildings.
pub fn labor_total(engine: &EconomyEngine, workers: ResourceId) -> f64 {
    engine.ledger().amount(workers).unwrap_or(0.0) + engine.allocations().allocated_total(workers)
}
