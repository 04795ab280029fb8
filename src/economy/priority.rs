//! Admission control: which consumers to shed and which to bring back.
//!
//! Each resource with consumers is evaluated on its own against the
//! enabled state as it was *before* this tick:
//!
//! - **Shedding.** If active demand exceeds the balance, consumers are
//!   stopped largest first until the remaining demand fits.
//! - **Restoration.** Consumers the engine stopped earlier are restarted
//!   smallest first while the projected demand still fits.
//!
//! Labor resources are never throttled. Users' manual stops are left alone
//! by both passes. Resources are not optimised jointly: a building short of
//! two correlated resources is judged per resource, independently.

use std::collections::BTreeSet;

use super::consumption::ConsumptionIndex;
use super::ledger::ResourceLedger;
use crate::model::BuildingKey;

/// Buildings to switch off and back on after one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decision {
    pub to_stop: BTreeSet<BuildingKey>,
    pub to_restart: BTreeSet<BuildingKey>,
}

impl Decision {
    pub fn is_empty(&self) -> bool {
        self.to_stop.is_empty() && self.to_restart.is_empty()
    }
}

/// Cross-tick inputs to [`evaluate`].
#[derive(Debug, Clone, Copy)]
pub struct PriorityState<'a> {
    /// Buildings whose production is currently on.
    pub enabled: &'a BTreeSet<BuildingKey>,
    /// Buildings the engine itself switched off.
    pub stopped_by_engine: &'a BTreeSet<BuildingKey>,
    /// Buildings the user switched off; never touched by the engine.
    pub manually_stopped: &'a BTreeSet<BuildingKey>,
}

pub fn evaluate(
    ledger: &ResourceLedger,
    index: &ConsumptionIndex,
    state: PriorityState<'_>,
) -> Decision {
    let mut decision = Decision::default();
    let active = |key: &BuildingKey| {
        state.enabled.contains(key) && !state.manually_stopped.contains(key)
    };

    for (resource_id, consumers) in index.iter() {
        let Some(resource) = ledger.find(resource_id) else {
            continue;
        };
        if resource.is_labor {
            continue;
        }
        let available = resource.amount;

        let (total_active, active_count) = consumers
            .iter()
            .filter(|c| active(&c.building_key))
            .fold((0.0, 0usize), |(sum, n), c| (sum + c.amount, n + 1));

        if total_active > available && active_count > 0 {
            let mut remaining = total_active;
            for c in consumers {
                if remaining <= available {
                    break;
                }
                if !active(&c.building_key) {
                    continue;
                }
                decision.to_stop.insert(c.building_key);
                remaining -= c.amount;
            }
            tracing::info!(
                "{} short: demand {total_active} > {available}, shedding down to {remaining}",
                resource.name
            );
        }

        let mut projected: f64 = consumers
            .iter()
            .filter(|c| {
                state.enabled.contains(&c.building_key)
                    && !decision.to_stop.contains(&c.building_key)
            })
            .map(|c| c.amount)
            .sum();

        for c in consumers.iter().rev() {
            let key = &c.building_key;
            if state.manually_stopped.contains(key)
                || state.enabled.contains(key)
                || !state.stopped_by_engine.contains(key)
                || decision.to_stop.contains(key)
            {
                continue;
            }
            if projected + c.amount <= available {
                decision.to_restart.insert(*key);
                projected += c.amount;
            }
        }
    }

    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildingDefinition, PlacedBuilding, Resource, ResourceAmount, ResourceId};

    const COAL: ResourceId = ResourceId(1);
    const ORE: ResourceId = ResourceId(2);

    fn key(col: i32) -> BuildingKey {
        BuildingKey::new(0, col)
    }

    fn consumer(col: i32, costs: &[(ResourceId, f64)]) -> PlacedBuilding {
        PlacedBuilding::operating(
            key(col),
            BuildingDefinition::new("Furnace")
                .with_operational_cost(costs.iter().map(|&(id, n)| ResourceAmount::new(id, n))),
        )
    }

    fn ledger(coal: f64, ore: f64) -> ResourceLedger {
        ResourceLedger::from_resources([
            Resource::new(COAL, "coal", coal),
            Resource::new(ORE, "ore", ore),
        ])
    }

    fn keys(cols: &[i32]) -> BTreeSet<BuildingKey> {
        cols.iter().map(|&c| key(c)).collect()
    }

    fn run(
        ledger: &ResourceLedger,
        buildings: &[PlacedBuilding],
        enabled: &[i32],
        engine: &[i32],
        manual: &[i32],
    ) -> Decision {
        let index = ConsumptionIndex::rebuild(buildings, ledger);
        let (enabled, engine, manual) = (keys(enabled), keys(engine), keys(manual));
        evaluate(
            ledger,
            &index,
            PriorityState {
                enabled: &enabled,
                stopped_by_engine: &engine,
                manually_stopped: &manual,
            },
        )
    }

    fn seven_four_three() -> Vec<PlacedBuilding> {
        vec![
            consumer(0, &[(COAL, 4.0)]),
            consumer(1, &[(COAL, 7.0)]),
            consumer(2, &[(COAL, 3.0)]),
        ]
    }

    #[test]
    fn sheds_largest_consumer_first() {
        let d = run(&ledger(10.0, 0.0), &seven_four_three(), &[0, 1, 2], &[], &[]);
        assert_eq!(d.to_stop, keys(&[1]));
        assert!(d.to_restart.is_empty());
    }

    #[test]
    fn sheds_as_many_as_needed() {
        let d = run(&ledger(3.0, 0.0), &seven_four_three(), &[0, 1, 2], &[], &[]);
        assert_eq!(d.to_stop, keys(&[0, 1]));
    }

    #[test]
    fn no_shedding_when_supply_covers_demand() {
        let d = run(&ledger(14.0, 0.0), &seven_four_three(), &[0, 1, 2], &[], &[]);
        assert!(d.is_empty());
    }

    #[test]
    fn equal_demand_stops_first_inserted() {
        let buildings = vec![
            consumer(5, &[(COAL, 6.0)]),
            consumer(3, &[(COAL, 6.0)]),
        ];
        let d = run(&ledger(6.0, 0.0), &buildings, &[3, 5], &[], &[]);
        assert_eq!(d.to_stop, keys(&[5]));
    }

    #[test]
    fn restores_engine_stopped_consumer_when_supply_returns() {
        let d = run(&ledger(20.0, 0.0), &seven_four_three(), &[0, 2], &[1], &[]);
        assert_eq!(d.to_restart, keys(&[1]));
        assert!(d.to_stop.is_empty());
    }

    #[test]
    fn restores_smallest_first_within_supply() {
        // projected 0; 3 fits, then 4 fits (7), then 7 would make 14 > 8.
        let d = run(&ledger(8.0, 0.0), &seven_four_three(), &[], &[0, 1, 2], &[]);
        assert_eq!(d.to_restart, keys(&[0, 2]));
    }

    #[test]
    fn manual_stops_are_never_restarted_or_counted() {
        let d = run(&ledger(20.0, 0.0), &seven_four_three(), &[0, 2], &[], &[1]);
        assert!(d.is_empty());

        // A manually stopped consumer still flagged enabled is ignored when shedding.
        let d = run(&ledger(5.0, 0.0), &seven_four_three(), &[0, 1, 2], &[], &[1]);
        assert_eq!(d.to_stop, keys(&[0]));
    }

    #[test]
    fn never_restarts_user_stopped_building_without_engine_flag() {
        let d = run(&ledger(100.0, 0.0), &seven_four_three(), &[0, 2], &[], &[]);
        assert!(d.to_restart.is_empty());
    }

    #[test]
    fn labor_resources_are_not_throttled() {
        let ledger = ResourceLedger::from_resources([
            Resource::new(COAL, "workers", 0.0).labor(),
        ]);
        let d = run(&ledger, &seven_four_three(), &[0, 1, 2], &[], &[]);
        assert!(d.is_empty());
    }

    #[test]
    fn correlated_scarcity_is_judged_per_resource() {
        // Building 0 uses both coal and ore; building 1 only coal; building 2 only ore.
        let buildings = vec![
            consumer(0, &[(COAL, 5.0), (ORE, 5.0)]),
            consumer(1, &[(COAL, 4.0)]),
            consumer(2, &[(ORE, 4.0)]),
        ];
        // Coal: demand 9 > 5, stopping 0 leaves 4 <= 5.
        // Ore: demand 9 > 5, stopping 0 leaves 4 <= 5 as well; 0 is counted twice.
        let d = run(&ledger(5.0, 5.0), &buildings, &[0, 1, 2], &[], &[]);
        assert_eq!(d.to_stop, keys(&[0]));

        // Coal recovers but ore does not: the coal pass alone restarts 0.
        let d = run(&ledger(10.0, 5.0), &buildings, &[1, 2], &[0], &[]);
        assert_eq!(d.to_restart, keys(&[0]));
    }

    #[test]
    fn stopped_this_tick_is_not_restarted_by_another_resource() {
        let buildings = vec![
            consumer(0, &[(COAL, 5.0), (ORE, 1.0)]),
            consumer(1, &[(ORE, 1.0)]),
        ];
        let d = run(&ledger(1.0, 50.0), &buildings, &[0], &[1], &[]);
        assert_eq!(d.to_stop, keys(&[0]));
        assert_eq!(d.to_restart, keys(&[1]));
        assert!(d.to_stop.is_disjoint(&d.to_restart));
    }
}
