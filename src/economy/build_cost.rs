//! Construction cost bookkeeping and labor allocation tracking.
//!
//! Non-labor build cost is capital: it is deducted when construction starts
//! and refunded when a site is cancelled or demolished. Labor is never
//! refunded; it is *allocated* to the building and comes back only through
//! an explicit return of the handle the deduction produced. There is no
//! timer: whoever drives the construction lifecycle must return the
//! workforce exactly once.

use std::collections::{BTreeMap, HashMap};

use super::ledger::{AdjustOutcome, ResourceLedger};
use crate::id::HandleGenerator;
use crate::model::{
    Allocation, AllocationHandle, AllocationPurpose, BuildingDefinition, BuildingKey,
    ResourceAmount, ResourceId,
};

/// A build-cost entry the ledger cannot currently cover.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingResource {
    pub resource_id: ResourceId,
    pub needed: f64,
    pub available: f64,
    pub is_labor: bool,
}

/// Outcome of [`BuildCostLedger::check_affordability`].
#[derive(Debug, Clone, PartialEq)]
pub struct Affordability {
    pub ok: bool,
    pub missing: Vec<MissingResource>,
}

type AllocationKey = (ResourceId, BuildingKey, AllocationPurpose);

#[derive(Debug, Clone, Default)]
pub struct BuildCostLedger {
    open: BTreeMap<AllocationHandle, Allocation>,
    by_key: HashMap<AllocationKey, AllocationHandle>,
    handles: HandleGenerator,
}

impl BuildCostLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare every build-cost entry with the live balance. Does not mutate.
    pub fn check_affordability(
        definition: &BuildingDefinition,
        ledger: &ResourceLedger,
    ) -> Affordability {
        let mut missing = Vec::new();
        if definition.is_building {
            for cost in &definition.build_cost {
                match ledger.find(cost.resource_id) {
                    None => missing.push(MissingResource {
                        resource_id: cost.resource_id,
                        needed: cost.amount,
                        available: 0.0,
                        is_labor: false,
                    }),
                    Some(resource) if resource.amount < cost.amount => {
                        missing.push(MissingResource {
                            resource_id: cost.resource_id,
                            needed: cost.amount,
                            available: resource.amount,
                            is_labor: resource.is_labor,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Affordability {
            ok: missing.is_empty(),
            missing,
        }
    }

    /// Deduct the full build cost. Labor entries additionally open a `Build`
    /// allocation; the returned handles must later go back through
    /// [`return_build_workforce`](Self::return_build_workforce).
    pub fn deduct_build_cost(
        &mut self,
        definition: &BuildingDefinition,
        key: BuildingKey,
        ledger: &mut ResourceLedger,
    ) -> Vec<AllocationHandle> {
        if !definition.is_building {
            return Vec::new();
        }
        let mut handles = Vec::new();
        for cost in &definition.build_cost {
            let is_labor = ledger.is_labor(cost.resource_id);
            let AdjustOutcome::Applied { applied, balance } =
                ledger.adjust(cost.resource_id, -cost.amount)
            else {
                tracing::warn!(
                    "build cost of {} at {key} names unknown resource {}",
                    definition.name,
                    cost.resource_id
                );
                continue;
            };
            tracing::debug!(
                "deducted {} x {} for {key}, balance {balance}",
                -applied,
                cost.resource_id
            );
            if is_labor {
                let handle =
                    self.open_allocation(cost.resource_id, -applied, key, AllocationPurpose::Build);
                if !handles.contains(&handle) {
                    handles.push(handle);
                }
            }
        }
        handles
    }

    /// Give back the workforce behind each handle. Handles that are already
    /// closed (or were never issued) are ignored. Returns how many were closed.
    pub fn return_build_workforce(
        &mut self,
        handles: &[AllocationHandle],
        ledger: &mut ResourceLedger,
    ) -> usize {
        handles
            .iter()
            .filter(|&&handle| self.close(handle, ledger))
            .count()
    }

    /// Refund the non-labor part of a build cost. Labor is consumed, never refunded.
    pub fn refund_build_cost_on_delete(definition: &BuildingDefinition, ledger: &mut ResourceLedger) {
        if !definition.is_building {
            return;
        }
        for cost in &definition.build_cost {
            if ledger.is_labor(cost.resource_id) {
                continue;
            }
            match ledger.adjust(cost.resource_id, cost.amount) {
                AdjustOutcome::Applied { balance, .. } => tracing::debug!(
                    "refunded {} x {}, balance {balance}",
                    cost.amount,
                    cost.resource_id
                ),
                AdjustOutcome::UnknownResource => tracing::warn!(
                    "refund for {} names unknown resource {}",
                    definition.name,
                    cost.resource_id
                ),
            }
        }
    }

    /// Allocate the labor entries of the operating cost once, when production is
    /// switched on. Production cycles never deduct labor themselves.
    pub fn allocate_operating_workforce(
        &mut self,
        definition: &BuildingDefinition,
        key: BuildingKey,
        ledger: &mut ResourceLedger,
    ) -> Vec<AllocationHandle> {
        if !definition.is_building {
            return Vec::new();
        }
        let labor: Vec<ResourceAmount> = definition
            .operational_cost
            .iter()
            .filter(|c| ledger.is_labor(c.resource_id))
            .copied()
            .collect();
        let mut handles = Vec::new();
        for cost in labor {
            let applied = ledger.adjust(cost.resource_id, -cost.amount).applied();
            let handle =
                self.open_allocation(cost.resource_id, -applied, key, AllocationPurpose::Operate);
            if !handles.contains(&handle) {
                handles.push(handle);
            }
        }
        handles
    }

    /// Close every `Operate` allocation held by `key`.
    pub fn return_operating_workforce(&mut self, key: BuildingKey, ledger: &mut ResourceLedger) -> usize {
        self.return_matching(ledger, |a| {
            a.building_key == key && a.purpose == AllocationPurpose::Operate
        })
    }

    /// Close every allocation held by `key`, whatever its purpose.
    pub fn return_all_for_building(&mut self, key: BuildingKey, ledger: &mut ResourceLedger) -> usize {
        self.return_matching(ledger, |a| a.building_key == key)
    }

    /// Total labor of `resource_id` currently held by buildings.
    pub fn allocated_total(&self, resource_id: ResourceId) -> f64 {
        self.allocations_for(resource_id).map(|a| a.amount).sum()
    }

    /// Outstanding allocations of one resource, oldest first.
    pub fn allocations_for(&self, resource_id: ResourceId) -> impl Iterator<Item = &Allocation> {
        self.open
            .values()
            .filter(move |a| a.resource_id == resource_id)
    }

    /// Outstanding allocations held by one building.
    pub fn outstanding_for(&self, key: BuildingKey) -> impl Iterator<Item = &Allocation> {
        self.open.values().filter(move |a| a.building_key == key)
    }

    pub fn is_open(&self, handle: AllocationHandle) -> bool {
        self.open.contains_key(&handle)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    fn open_allocation(
        &mut self,
        resource_id: ResourceId,
        amount: f64,
        building_key: BuildingKey,
        purpose: AllocationPurpose,
    ) -> AllocationHandle {
        let key = (resource_id, building_key, purpose);
        if let Some(&handle) = self.by_key.get(&key)
            && let Some(existing) = self.open.get_mut(&handle)
        {
            existing.amount += amount;
            tracing::debug!(
                "allocation {} for {building_key} grew to {} x {resource_id}",
                handle.id(),
                existing.amount
            );
            return handle;
        }

        let handle = self.handles.next_handle();
        self.open.insert(
            handle,
            Allocation {
                handle,
                resource_id,
                amount,
                building_key,
                purpose,
            },
        );
        self.by_key.insert(key, handle);
        tracing::debug!(
            "allocated {amount} x {resource_id} to {building_key} ({purpose:?}), total {}",
            self.allocated_total(resource_id)
        );
        handle
    }

    fn close(&mut self, handle: AllocationHandle, ledger: &mut ResourceLedger) -> bool {
        let Some(allocation) = self.open.remove(&handle) else {
            tracing::debug!("allocation {} already returned", handle.id());
            return false;
        };
        self.by_key.remove(&(
            allocation.resource_id,
            allocation.building_key,
            allocation.purpose,
        ));
        ledger.adjust(allocation.resource_id, allocation.amount);
        tracing::debug!(
            "returned {} x {} from {}",
            allocation.amount,
            allocation.resource_id,
            allocation.building_key
        );
        true
    }

    fn return_matching(
        &mut self,
        ledger: &mut ResourceLedger,
        pred: impl Fn(&Allocation) -> bool,
    ) -> usize {
        let handles: Vec<AllocationHandle> = self
            .open
            .values()
            .filter(|&a| pred(a))
            .map(|a| a.handle)
            .collect();
        self.return_build_workforce(&handles, ledger)
    }
}
