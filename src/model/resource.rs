use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a resource type in the active project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A typed resource balance owned by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    /// Current balance, never negative.
    pub amount: f64,
    /// Workforce-type resource: allocated and returned, never refunded.
    #[serde(default)]
    pub is_labor: bool,
    /// Perishable: decays while no storage capacity exists for it.
    #[serde(default)]
    pub must_be_stored: bool,
}

impl Resource {
    pub fn new(id: impl Into<ResourceId>, name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount: amount.max(0.0),
            is_labor: false,
            must_be_stored: false,
        }
    }

    pub fn labor(mut self) -> Self {
        self.is_labor = true;
        self
    }

    pub fn perishable(mut self) -> Self {
        self.must_be_stored = true;
        self
    }
}

/// A `{resource, amount}` pair as found in cost, production and storage lists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceAmount {
    pub resource_id: ResourceId,
    pub amount: f64,
}

impl ResourceAmount {
    pub fn new(resource_id: impl Into<ResourceId>, amount: f64) -> Self {
        Self {
            resource_id: resource_id.into(),
            amount,
        }
    }
}
