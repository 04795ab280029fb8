//! Read-only questions the UI asks before letting the user act.

use std::collections::{BTreeMap, BTreeSet};

use super::ledger::ResourceLedger;
use crate::model::{BuildingDefinition, PlacedBuilding, ResourceId};

/// Whether every non-labor operating cost is covered right now.
/// Labor is skipped: it is allocated on enable, not paid per cycle.
pub fn can_start_production(definition: &BuildingDefinition, ledger: &ResourceLedger) -> bool {
    missing_operational_resources(definition, ledger).is_empty()
}

/// The non-labor operating costs the ledger cannot currently cover.
/// Unknown resources count as missing.
pub fn missing_operational_resources(
    definition: &BuildingDefinition,
    ledger: &ResourceLedger,
) -> BTreeSet<ResourceId> {
    definition
        .operational_cost
        .iter()
        .filter(|cost| match ledger.find(cost.resource_id) {
            Some(resource) => !resource.is_labor && resource.amount < cost.amount,
            None => true,
        })
        .map(|cost| cost.resource_id)
        .collect()
}

/// Aggregate recurring demand and output over a set of buildings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceUsage {
    pub used: BTreeMap<ResourceId, f64>,
    pub produced: BTreeMap<ResourceId, f64>,
}

impl ResourceUsage {
    /// Produced minus used for one resource.
    pub fn net(&self, id: ResourceId) -> f64 {
        self.produced.get(&id).copied().unwrap_or(0.0) - self.used.get(&id).copied().unwrap_or(0.0)
    }
}

/// Sum operating cost and production over every placed building, whether or
/// not its production is currently on.
pub fn resource_usage<'a>(buildings: impl IntoIterator<Item = &'a PlacedBuilding>) -> ResourceUsage {
    let mut usage = ResourceUsage::default();
    for building in buildings {
        let def = &building.definition;
        if !def.is_building {
            continue;
        }
        for cost in &def.operational_cost {
            *usage.used.entry(cost.resource_id).or_insert(0.0) += cost.amount;
        }
        for output in &def.production {
            *usage.produced.entry(output.resource_id).or_insert(0.0) += output.amount;
        }
    }
    usage
}
