//! Cached resource → consumer index.
//!
//! Rebuilt from scratch whenever the building population changes, never
//! patched and never rebuilt per tick. Entries may go stale between rebuilds
//! when a building is switched off by hand; the evaluator checks the live
//! enabled state, so that is harmless.

use std::collections::BTreeMap;

use super::ledger::ResourceLedger;
use crate::model::{BuildingKey, PlacedBuilding, ResourceId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumptionEntry {
    pub building_key: BuildingKey,
    pub resource_id: ResourceId,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsumptionIndex {
    by_resource: BTreeMap<ResourceId, Vec<ConsumptionEntry>>,
}

impl ConsumptionIndex {
    /// Index every completed, non-exempt building by the non-labor resources
    /// it consumes. Each list is sorted by amount, largest first; equal
    /// amounts keep the order in which the buildings were given.
    pub fn rebuild<'a>(
        buildings: impl IntoIterator<Item = &'a PlacedBuilding>,
        ledger: &ResourceLedger,
    ) -> Self {
        let mut by_resource: BTreeMap<ResourceId, Vec<ConsumptionEntry>> = BTreeMap::new();
        for building in buildings {
            let def = &building.definition;
            if !def.is_building || def.exempt_infrastructure || building.under_construction {
                continue;
            }
            for cost in &def.operational_cost {
                if ledger.is_labor(cost.resource_id) {
                    continue;
                }
                by_resource
                    .entry(cost.resource_id)
                    .or_default()
                    .push(ConsumptionEntry {
                        building_key: building.key,
                        resource_id: cost.resource_id,
                        amount: cost.amount.max(0.0),
                    });
            }
        }
        for entries in by_resource.values_mut() {
            // sort_by is stable: ties stay in insertion order.
            entries.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        }
        Self { by_resource }
    }

    /// Consumers of `id`, largest first.
    pub fn consumers(&self, id: ResourceId) -> &[ConsumptionEntry] {
        self.by_resource.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn resources(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.by_resource.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &[ConsumptionEntry])> {
        self.by_resource.iter().map(|(&id, v)| (id, v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.by_resource.is_empty()
    }
}
