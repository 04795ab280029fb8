//! Aggregated storage capacity and decay of perishable resources.
//!
//! Storage is staffed capacity: only buildings that are complete and have
//! production switched on contribute. A `must_be_stored` resource with no
//! contributing building gets an explicit zero entry (not a missing one),
//! so production into it is blocked and its balance decays.

use std::collections::BTreeMap;

use super::ledger::ResourceLedger;
use crate::model::{PlacedBuilding, ResourceId};

/// Resource → aggregated capacity. Untracked resources are unbounded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Capacities {
    limits: BTreeMap<ResourceId, f64>,
}

impl Capacities {
    /// Capacity for `id`, `f64::INFINITY` when no limit is tracked.
    pub fn get(&self, id: ResourceId) -> f64 {
        self.limits.get(&id).copied().unwrap_or(f64::INFINITY)
    }

    /// Tracked capacity only; `None` means unbounded.
    pub fn limit(&self, id: ResourceId) -> Option<f64> {
        self.limits.get(&id).copied()
    }

    pub fn set(&mut self, id: ResourceId, capacity: f64) {
        self.limits.insert(id, capacity.max(0.0));
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, f64)> + '_ {
        self.limits.iter().map(|(&id, &cap)| (id, cap))
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}

pub fn aggregate_capacities<'a>(
    buildings: impl IntoIterator<Item = &'a PlacedBuilding>,
    ledger: &ResourceLedger,
) -> Capacities {
    let mut caps = Capacities::default();
    for building in buildings {
        if !building.contributes_storage() {
            continue;
        }
        for stored in &building.definition.stored_capacity {
            *caps.limits.entry(stored.resource_id).or_insert(0.0) += stored.amount.max(0.0);
        }
    }
    for id in ledger.must_be_stored_ids() {
        caps.limits.entry(id).or_insert(0.0);
    }
    caps
}

/// Spoil perishables that have nowhere to go.
///
/// A `must_be_stored` resource with zero capacity loses `unit` per call; one
/// whose balance is above a (shrunken) capacity is clamped down at once.
/// Returns the total amount lost per resource.
pub fn decay_unstored(
    ledger: &mut ResourceLedger,
    capacities: &Capacities,
    unit: f64,
) -> BTreeMap<ResourceId, f64> {
    let perishable: Vec<ResourceId> = ledger.must_be_stored_ids().collect();
    let mut lost = BTreeMap::new();
    for id in perishable {
        let Some(current) = ledger.amount(id) else {
            continue;
        };
        let capacity = capacities.get(id);
        let delta = if capacity == 0.0 {
            -unit.min(current)
        } else if current > capacity {
            capacity - current
        } else {
            continue;
        };
        let applied = ledger.adjust(id, delta).applied();
        if applied < 0.0 {
            tracing::debug!("{id} spoiled by {} (capacity {capacity})", -applied);
            lost.insert(id, -applied);
        }
    }
    lost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildingDefinition, BuildingKey, Resource, ResourceAmount};

    const GRAIN: ResourceId = ResourceId(1);
    const MILK: ResourceId = ResourceId(2);
    const WOOD: ResourceId = ResourceId(3);

    fn ledger() -> ResourceLedger {
        ResourceLedger::from_resources([
            Resource::new(GRAIN, "grain", 0.0),
            Resource::new(MILK, "milk", 3.5).perishable(),
            Resource::new(WOOD, "wood", 10.0),
        ])
    }

    fn silo(row: i32, grain: f64) -> PlacedBuilding {
        PlacedBuilding::operating(
            BuildingKey::new(row, 0),
            BuildingDefinition::new("Silo").with_storage([ResourceAmount::new(GRAIN, grain)]),
        )
    }

    #[test]
    fn sums_enabled_buildings_only() {
        let mut idle = silo(2, 500.0);
        idle.production_enabled = false;
        let mut site = silo(3, 700.0);
        site.under_construction = true;
        let buildings = [silo(0, 100.0), silo(1, 50.0), idle, site];

        let caps = aggregate_capacities(&buildings, &ledger());
        assert_eq!(caps.get(GRAIN), 150.0);
    }

    #[test]
    fn perishable_without_storage_gets_explicit_zero() {
        let caps = aggregate_capacities(&[silo(0, 100.0)], &ledger());
        assert_eq!(caps.limit(MILK), Some(0.0));
        assert_eq!(caps.limit(WOOD), None);
        assert_eq!(caps.get(WOOD), f64::INFINITY);
    }

    #[test]
    fn decay_removes_one_unit_per_call() {
        let mut ledger = ledger();
        let caps = aggregate_capacities(std::iter::empty(), &ledger);
        decay_unstored(&mut ledger, &caps, 1.0);
        assert_eq!(ledger.amount(MILK), Some(2.5));
        decay_unstored(&mut ledger, &caps, 1.0);
        decay_unstored(&mut ledger, &caps, 1.0);
        let lost = decay_unstored(&mut ledger, &caps, 1.0);
        assert_eq!(ledger.amount(MILK), Some(0.0));
        assert_eq!(lost.get(&MILK), Some(&0.5));
        assert!(decay_unstored(&mut ledger, &caps, 1.0).is_empty());
    }

    #[test]
    fn zero_capacity_spoils_by_the_configured_unit() {
        let mut ledger = ledger();
        ledger.adjust(MILK, 46.5);
        let caps = aggregate_capacities(std::iter::empty(), &ledger);
        assert!(!caps.is_empty());

        let lost = decay_unstored(&mut ledger, &caps, 0.25);
        assert_eq!(lost.get(&MILK), Some(&0.25));
        assert_eq!(ledger.amount(MILK), Some(49.75));
    }

    #[test]
    fn no_perishables_means_nothing_tracked() {
        let ledger = ResourceLedger::from_resources([Resource::new(WOOD, "wood", 1.0)]);
        let caps = aggregate_capacities(std::iter::empty(), &ledger);
        assert!(caps.is_empty());
    }

    #[test]
    fn shrunken_capacity_clamps_immediately() {
        let mut ledger = ledger();
        ledger.adjust(MILK, 96.5);
        let mut caps = Capacities::default();
        caps.set(MILK, 40.0);
        decay_unstored(&mut ledger, &caps, 1.0);
        assert_eq!(ledger.amount(MILK), Some(40.0));
        decay_unstored(&mut ledger, &caps, 1.0);
        assert_eq!(ledger.amount(MILK), Some(40.0));
    }

    #[test]
    fn non_perishables_never_decay() {
        let mut ledger = ledger();
        let mut caps = Capacities::default();
        caps.set(WOOD, 0.0);
        decay_unstored(&mut ledger, &caps, 1.0);
        assert_eq!(ledger.amount(WOOD), Some(10.0));
    }
}
