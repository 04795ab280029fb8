use serde::{Deserialize, Serialize};

use super::building::BuildingKey;
use super::resource::ResourceId;

/// One resource row of an [`EconomySnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceBalance {
    pub id: ResourceId,
    pub name: String,
    pub amount: f64,
    /// Aggregated storage capacity; `None` when no storage limit applies.
    pub capacity: Option<f64>,
    /// Labor currently held by buildings (zero for non-labor resources).
    pub allocated: f64,
    pub is_labor: bool,
    pub must_be_stored: bool,
}

/// Read-only view of the economy for the UI shell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EconomySnapshot {
    pub resources: Vec<ResourceBalance>,
    pub stopped_by_engine: Vec<BuildingKey>,
    pub manually_stopped: Vec<BuildingKey>,
}

impl EconomySnapshot {
    pub fn balance(&self, id: ResourceId) -> Option<&ResourceBalance> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Plain data with string keys only; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
