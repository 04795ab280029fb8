//! The resource ledger: sole owner of every resource balance.
//!
//! Balances live in an arena (`Vec<Resource>`, registration order) with an
//! id → slot index beside it, so lookups are O(1) and iteration order is
//! deterministic. [`ResourceLedger::adjust`] is the only way a balance ever
//! changes; every deduction, refund and yield elsewhere in the crate is a
//! sequence of `adjust` calls.

use std::collections::{BTreeMap, HashMap};

use crate::model::{Resource, ResourceId};

/// Result of a single [`ResourceLedger::adjust`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdjustOutcome {
    /// The balance moved by `applied`, which differs from the requested delta
    /// only when the result was clamped at zero.
    Applied { applied: f64, balance: f64 },
    /// No resource with this id is registered.
    UnknownResource,
}

impl AdjustOutcome {
    /// Actual change of the balance (zero for unknown resources).
    pub fn applied(self) -> f64 {
        match self {
            AdjustOutcome::Applied { applied, .. } => applied,
            AdjustOutcome::UnknownResource => 0.0,
        }
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, AdjustOutcome::UnknownResource)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    resources: Vec<Resource>,
    index: HashMap<ResourceId, usize>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        let mut ledger = Self::new();
        for resource in resources {
            ledger.insert(resource);
        }
        ledger
    }

    /// Register a resource. Re-registering an id replaces it in place.
    pub fn insert(&mut self, mut resource: Resource) {
        resource.amount = resource.amount.max(0.0);
        match self.index.get(&resource.id) {
            Some(&slot) => self.resources[slot] = resource,
            None => {
                self.index.insert(resource.id, self.resources.len());
                self.resources.push(resource);
            }
        }
    }

    pub fn find(&self, id: ResourceId) -> Option<&Resource> {
        self.index.get(&id).map(|&slot| &self.resources[slot])
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.index.contains_key(&id)
    }

    /// Current balance, `None` for unknown ids.
    pub fn amount(&self, id: ResourceId) -> Option<f64> {
        self.find(id).map(|r| r.amount)
    }

    pub fn is_labor(&self, id: ResourceId) -> bool {
        self.find(id).is_some_and(|r| r.is_labor)
    }

    /// Add `delta` to a balance, clamping the result at zero.
    pub fn adjust(&mut self, id: ResourceId, delta: f64) -> AdjustOutcome {
        let Some(&slot) = self.index.get(&id) else {
            return AdjustOutcome::UnknownResource;
        };
        let resource = &mut self.resources[slot];
        let before = resource.amount;
        resource.amount = (before + delta).max(0.0);
        AdjustOutcome::Applied {
            applied: resource.amount - before,
            balance: resource.amount,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn labor_ids(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.resources.iter().filter(|r| r.is_labor).map(|r| r.id)
    }

    pub fn must_be_stored_ids(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.resources
            .iter()
            .filter(|r| r.must_be_stored)
            .map(|r| r.id)
    }

    pub fn balances(&self) -> BTreeMap<ResourceId, f64> {
        self.resources.iter().map(|r| (r.id, r.amount)).collect()
    }
}
