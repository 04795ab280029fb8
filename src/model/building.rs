use std::fmt;

use serde::{Deserialize, Serialize};

use super::resource::ResourceAmount;

/// Grid coordinate identifying a placed building (its top-left cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BuildingKey {
    pub row: i32,
    pub col: i32,
}

impl BuildingKey {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for BuildingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Immutable template data for a building type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDefinition {
    pub name: String,
    /// Non-buildings (ground tiles, decorations) take no part in the economy.
    #[serde(default = "default_true")]
    pub is_building: bool,
    /// Infrastructure such as the command centre or a port: never throttled.
    #[serde(default)]
    pub exempt_infrastructure: bool,
    #[serde(default)]
    pub build_cost: Vec<ResourceAmount>,
    #[serde(default)]
    pub operational_cost: Vec<ResourceAmount>,
    #[serde(default)]
    pub production: Vec<ResourceAmount>,
    #[serde(default)]
    pub stored_capacity: Vec<ResourceAmount>,
}

fn default_true() -> bool {
    true
}

impl BuildingDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_building: true,
            exempt_infrastructure: false,
            build_cost: Vec::new(),
            operational_cost: Vec::new(),
            production: Vec::new(),
            stored_capacity: Vec::new(),
        }
    }

    pub fn with_build_cost(mut self, cost: impl IntoIterator<Item = ResourceAmount>) -> Self {
        self.build_cost.extend(cost);
        self
    }

    pub fn with_operational_cost(mut self, cost: impl IntoIterator<Item = ResourceAmount>) -> Self {
        self.operational_cost.extend(cost);
        self
    }

    pub fn with_production(mut self, output: impl IntoIterator<Item = ResourceAmount>) -> Self {
        self.production.extend(output);
        self
    }

    pub fn with_storage(mut self, capacity: impl IntoIterator<Item = ResourceAmount>) -> Self {
        self.stored_capacity.extend(capacity);
        self
    }

    pub fn exempt(mut self) -> Self {
        self.exempt_infrastructure = true;
        self
    }

    pub fn decoration(mut self) -> Self {
        self.is_building = false;
        self
    }
}

/// A building the placement system has put on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBuilding {
    pub key: BuildingKey,
    pub definition: BuildingDefinition,
    pub production_enabled: bool,
    pub under_construction: bool,
}

impl PlacedBuilding {
    /// A finished building with production switched on.
    pub fn operating(key: BuildingKey, definition: BuildingDefinition) -> Self {
        Self {
            key,
            definition,
            production_enabled: true,
            under_construction: false,
        }
    }

    /// A freshly started construction site; production stays off until completion.
    pub fn construction_site(key: BuildingKey, definition: BuildingDefinition) -> Self {
        Self {
            key,
            definition,
            production_enabled: false,
            under_construction: true,
        }
    }

    /// Whether this building's storage counts towards aggregated capacity.
    pub fn contributes_storage(&self) -> bool {
        self.definition.is_building && self.production_enabled && !self.under_construction
    }
}
