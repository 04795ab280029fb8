//! One production cycle of a building.
//!
//! Cost and output are deliberately asymmetric: operating cost is deducted
//! best-effort (clamped at zero, never refused) because affordability was
//! checked when production was switched on, while output is always bounded
//! by aggregated storage capacity.

use super::ledger::{AdjustOutcome, ResourceLedger};
use super::storage::Capacities;
use crate::model::{PlacedBuilding, ResourceAmount, ResourceId};

/// What a single cycle actually did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// Non-labor operating cost actually removed from the ledger.
    pub consumed: Vec<ResourceAmount>,
    /// Output actually added to the ledger.
    pub produced: Vec<ResourceAmount>,
    /// Resources whose output was cut short by capacity.
    pub partial: Vec<ResourceId>,
    /// Resources whose storage was already full, so nothing was added.
    pub blocked: Vec<ResourceId>,
}

impl CycleReport {
    pub fn produced_amount(&self, id: ResourceId) -> f64 {
        self.produced
            .iter()
            .filter(|p| p.resource_id == id)
            .map(|p| p.amount)
            .sum()
    }
}

/// A production entry whose storage is already at or above capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct FullResource {
    pub resource_id: ResourceId,
    pub current: f64,
    pub capacity: f64,
}

/// Outcome of [`can_store_production`].
#[derive(Debug, Clone, PartialEq)]
pub struct StorageCheck {
    pub has_space: bool,
    pub full_resources: Vec<FullResource>,
}

pub fn execute_production_cycle(
    building: &PlacedBuilding,
    ledger: &mut ResourceLedger,
    capacities: &Capacities,
) -> CycleReport {
    let mut report = CycleReport::default();
    let key = building.key;

    // Labor was allocated when production was switched on.
    for cost in &building.definition.operational_cost {
        if ledger.is_labor(cost.resource_id) {
            continue;
        }
        match ledger.adjust(cost.resource_id, -cost.amount) {
            AdjustOutcome::Applied { applied, .. } => report
                .consumed
                .push(ResourceAmount::new(cost.resource_id, -applied)),
            AdjustOutcome::UnknownResource => tracing::warn!(
                "operating cost of {key} names unknown resource {}",
                cost.resource_id
            ),
        }
    }

    for output in &building.definition.production {
        let Some(current) = ledger.amount(output.resource_id) else {
            tracing::warn!(
                "production of {key} names unknown resource {}",
                output.resource_id
            );
            continue;
        };
        let capacity = capacities.get(output.resource_id);
        if current >= capacity {
            tracing::debug!(
                "storage full for {} ({current}/{capacity}), {key} yields nothing",
                output.resource_id
            );
            report.blocked.push(output.resource_id);
            continue;
        }
        let yielded = output.amount.min(capacity - current);
        let applied = ledger.adjust(output.resource_id, yielded).applied();
        if yielded < output.amount {
            tracing::debug!(
                "partial yield at {key}: +{yielded}/{} x {}",
                output.amount,
                output.resource_id
            );
            report.partial.push(output.resource_id);
        }
        report
            .produced
            .push(ResourceAmount::new(output.resource_id, applied));
    }

    report
}

/// Report every production entry whose storage is already full. Pure query.
pub fn can_store_production(
    building: &PlacedBuilding,
    ledger: &ResourceLedger,
    capacities: &Capacities,
) -> StorageCheck {
    let full_resources: Vec<FullResource> = building
        .definition
        .production
        .iter()
        .filter_map(|output| {
            let current = ledger.amount(output.resource_id)?;
            let capacity = capacities.get(output.resource_id);
            (capacity.is_finite() && current >= capacity).then_some(FullResource {
                resource_id: output.resource_id,
                current,
                capacity,
            })
        })
        .collect();
    StorageCheck {
        has_space: full_resources.is_empty(),
        full_resources,
    }
}
