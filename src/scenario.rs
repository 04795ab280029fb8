use bevy_app::App;

use crate::config::EconomyConfig;
use crate::economy::{EconomyEngine, ResourceLedger};
use crate::ecs::{EconomyPlugin, build_economy_app_with_engine};
use crate::model::*;

// -- Builder-style ref types --

/// Typed reference to a building in a [`Scenario`], enabling chained mutation.
///
/// Created by [`Scenario::building`]. Call [`.key()`](BuildingRef::key) to
/// terminate the chain and extract the key.
pub struct BuildingRef<'a> {
    scenario: &'a mut Scenario,
    slot: usize,
}

impl<'a> BuildingRef<'a> {
    fn placed_mut(&mut self) -> &mut PlacedBuilding {
        &mut self.scenario.buildings[self.slot]
    }

    /// Move the building to an explicit grid position.
    pub fn at(mut self, row: i32, col: i32) -> Self { self.placed_mut().key = BuildingKey::new(row, col); self }
    pub fn disabled(mut self) -> Self { self.placed_mut().production_enabled = false; self }
    pub fn under_construction(mut self) -> Self {
        let b = self.placed_mut();
        b.under_construction = true;
        b.production_enabled = false;
        self
    }
    pub fn exempt(mut self) -> Self { self.placed_mut().definition.exempt_infrastructure = true; self }
    pub fn costs(mut self, resource: ResourceId, amount: f64) -> Self {
        self.placed_mut().definition.operational_cost.push(ResourceAmount::new(resource, amount));
        self
    }
    pub fn produces(mut self, resource: ResourceId, amount: f64) -> Self {
        self.placed_mut().definition.production.push(ResourceAmount::new(resource, amount));
        self
    }
    pub fn stores(mut self, resource: ResourceId, capacity: f64) -> Self {
        self.placed_mut().definition.stored_capacity.push(ResourceAmount::new(resource, capacity));
        self
    }

    /// Escape hatch: apply an arbitrary closure to the placed building.
    pub fn with(mut self, f: impl FnOnce(&mut PlacedBuilding)) -> Self { f(self.placed_mut()); self }

    /// Terminate the chain and return the building key.
    pub fn key(self) -> BuildingKey { self.scenario.buildings[self.slot].key }
}

/// Test-world builder: registers resources and places buildings, then hands
/// back a ready [`EconomyEngine`] (or a headless app around one).
///
/// Buildings are placed in the order they were added, each on its own
/// column of row 0 unless moved with [`BuildingRef::at`].
pub struct Scenario {
    resources: Vec<Resource>,
    buildings: Vec<PlacedBuilding>,
    next_resource: u64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
            buildings: Vec::new(),
            next_resource: 1,
        }
    }

    // -- Resources --

    pub fn add_resource(&mut self, name: &str, amount: f64) -> ResourceId {
        self.add_resource_with(name, amount, |_| {})
    }

    pub fn add_resource_with(
        &mut self,
        name: &str,
        amount: f64,
        modify: impl FnOnce(&mut Resource),
    ) -> ResourceId {
        let id = ResourceId(self.next_resource);
        self.next_resource += 1;
        let mut resource = Resource::new(id, name, amount);
        modify(&mut resource);
        self.resources.push(resource);
        id
    }

    pub fn add_labor(&mut self, name: &str, amount: f64) -> ResourceId {
        self.add_resource_with(name, amount, |r| r.is_labor = true)
    }

    pub fn add_perishable(&mut self, name: &str, amount: f64) -> ResourceId {
        self.add_resource_with(name, amount, |r| r.must_be_stored = true)
    }

    // -- Buildings --

    /// Place a finished, running building and return a chainable ref to it.
    pub fn building(&mut self, name: &str) -> BuildingRef<'_> {
        self.place(BuildingDefinition::new(name))
    }

    /// Place a finished, running building from a full definition.
    pub fn place(&mut self, definition: BuildingDefinition) -> BuildingRef<'_> {
        let col = self.buildings.len() as i32;
        self.buildings
            .push(PlacedBuilding::operating(BuildingKey::new(0, col), definition));
        let slot = self.buildings.len() - 1;
        BuildingRef {
            scenario: self,
            slot,
        }
    }

    /// Shorthand: a running building whose only operating cost is `amount` of `resource`.
    pub fn add_consumer(&mut self, resource: ResourceId, amount: f64) -> BuildingKey {
        self.building("Consumer").costs(resource, amount).key()
    }

    /// Shorthand: a running building that stores `capacity` of `resource`.
    pub fn add_storage(&mut self, resource: ResourceId, capacity: f64) -> BuildingKey {
        self.building("Storehouse").stores(resource, capacity).key()
    }

    // -- Finish --

    pub fn build(self) -> EconomyEngine {
        let mut engine = EconomyEngine::new(ResourceLedger::from_resources(self.resources));
        for building in self.buildings {
            engine.on_building_placed(building);
        }
        engine
    }

    /// Build the engine and wrap it in a headless app with every economy system installed.
    pub fn build_app(self, config: EconomyConfig) -> App {
        let mut app = build_economy_app_with_engine(config, self.build());
        app.add_plugins(EconomyPlugin);
        app
    }
}
