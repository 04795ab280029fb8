//! The economy façade: one owner for balances, allocations and buildings.
//!
//! Collaborators (placement, construction animation, the UI) only ever talk
//! to [`EconomyEngine`]; the pure functions in the sibling modules never see
//! each other's state. Population changes rebuild the consumption index and
//! capacities eagerly, enable/disable changes recompute capacities only.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::build_cost::{Affordability, BuildCostLedger, MissingResource};
use super::consumption::ConsumptionIndex;
use super::ledger::{AdjustOutcome, ResourceLedger};
use super::priority::{self, Decision, PriorityState};
use super::production::{self, CycleReport, StorageCheck};
use super::queries::{self, ResourceUsage};
use super::registry::BuildingRegistry;
use super::storage::{self, Capacities};
use crate::model::{
    Allocation, AllocationHandle, BuildingDefinition, BuildingKey, EconomySnapshot, PlacedBuilding,
    Resource, ResourceBalance, ResourceId,
};

/// Outcome of [`EconomyEngine::on_construction_start`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionStart {
    /// Cost deducted; `handles` are the build-labor allocations now open.
    Started { handles: Vec<AllocationHandle> },
    /// Nothing changed; these build-cost entries are not covered.
    Unaffordable(Vec<MissingResource>),
    /// Nothing changed; a building already stands on this key.
    Occupied,
}

impl ConstructionStart {
    pub fn is_started(&self) -> bool {
        matches!(self, ConstructionStart::Started { .. })
    }
}

/// Outcome of [`EconomyEngine::set_production_enabled`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProductionToggle {
    Enabled,
    Disabled,
    /// Already in the requested state.
    Unchanged,
    /// Refused: these operating costs cannot be covered right now.
    MissingResources(BTreeSet<ResourceId>),
    /// Refused: the building is still a construction site.
    UnderConstruction,
    UnknownBuilding,
}

#[derive(Debug, Clone, Default)]
pub struct EconomyEngine {
    ledger: ResourceLedger,
    allocations: BuildCostLedger,
    buildings: BuildingRegistry,
    /// Build-labor handles retained between start and completion.
    construction_handles: HashMap<BuildingKey, Vec<AllocationHandle>>,
    /// Sites whose capital was already refunded.
    cancelled: BTreeSet<BuildingKey>,
    index: ConsumptionIndex,
    capacities: Capacities,
    stopped_by_engine: BTreeSet<BuildingKey>,
    manually_stopped: BTreeSet<BuildingKey>,
}

impl EconomyEngine {
    pub fn new(ledger: ResourceLedger) -> Self {
        let mut engine = Self {
            ledger,
            ..Self::default()
        };
        engine.refresh_population();
        engine
    }

    // ---------------------------------------------------------------------------
    // Read access
    // ---------------------------------------------------------------------------

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn allocations(&self) -> &BuildCostLedger {
        &self.allocations
    }

    pub fn building(&self, key: BuildingKey) -> Option<&PlacedBuilding> {
        self.buildings.get(key)
    }

    pub fn buildings(&self) -> impl Iterator<Item = &PlacedBuilding> {
        self.buildings.iter()
    }

    pub fn consumption_index(&self) -> &ConsumptionIndex {
        &self.index
    }

    pub fn capacities(&self) -> &Capacities {
        &self.capacities
    }

    pub fn stopped_by_engine(&self) -> &BTreeSet<BuildingKey> {
        &self.stopped_by_engine
    }

    pub fn manually_stopped(&self) -> &BTreeSet<BuildingKey> {
        &self.manually_stopped
    }

    // ---------------------------------------------------------------------------
    // Resources
    // ---------------------------------------------------------------------------

    /// Register (or replace) a resource. Perishables change the capacity table.
    pub fn register_resource(&mut self, resource: Resource) {
        self.ledger.insert(resource);
        self.refresh_population();
    }

    /// Outside income or spending, e.g. trade. Clamped at zero like every adjustment.
    pub fn adjust_resource(&mut self, id: ResourceId, delta: f64) -> AdjustOutcome {
        let outcome = self.ledger.adjust(id, delta);
        if outcome.is_unknown() {
            tracing::warn!("adjustment of {delta} names unknown resource {id}");
        }
        outcome
    }

    // ---------------------------------------------------------------------------
    // Building population
    // ---------------------------------------------------------------------------

    /// Add a building as-is. Balances are not touched; operating labor is
    /// allocated only when production is switched on through the engine.
    pub fn on_building_placed(&mut self, building: PlacedBuilding) -> bool {
        let key = building.key;
        if !self.buildings.insert(building) {
            tracing::warn!("placement on occupied key {key} ignored");
            return false;
        }
        self.refresh_population();
        true
    }

    /// Drop a building, closing every allocation it still holds.
    /// Returns the removed building and the allocations that were closed.
    pub fn on_building_removed(
        &mut self,
        key: BuildingKey,
    ) -> Option<(PlacedBuilding, Vec<Allocation>)> {
        let Some(building) = self.buildings.remove(key) else {
            tracing::debug!("removal of unknown building {key}");
            return None;
        };
        let closed: Vec<Allocation> = self.allocations.outstanding_for(key).cloned().collect();
        self.allocations.return_all_for_building(key, &mut self.ledger);
        self.construction_handles.remove(&key);
        self.cancelled.remove(&key);
        self.stopped_by_engine.remove(&key);
        self.manually_stopped.remove(&key);
        self.refresh_population();
        Some((building, closed))
    }

    pub fn check_affordability(&self, definition: &BuildingDefinition) -> Affordability {
        BuildCostLedger::check_affordability(definition, &self.ledger)
    }

    /// Pay for a new construction site and register it.
    pub fn on_construction_start(
        &mut self,
        key: BuildingKey,
        definition: BuildingDefinition,
    ) -> ConstructionStart {
        if self.buildings.contains(key) {
            tracing::warn!("construction of {} refused: {key} is occupied", definition.name);
            return ConstructionStart::Occupied;
        }
        let affordability = self.check_affordability(&definition);
        if !affordability.ok {
            tracing::warn!(
                "construction of {} at {key} refused: {} resource(s) short",
                definition.name,
                affordability.missing.len()
            );
            return ConstructionStart::Unaffordable(affordability.missing);
        }

        let handles = self
            .allocations
            .deduct_build_cost(&definition, key, &mut self.ledger);
        tracing::info!("construction of {} started at {key}", definition.name);
        if !handles.is_empty() {
            self.construction_handles.insert(key, handles.clone());
        }
        self.buildings
            .insert(PlacedBuilding::construction_site(key, definition));
        self.refresh_population();
        ConstructionStart::Started { handles }
    }

    /// Refund the capital of an unfinished site. Build labor stays allocated
    /// until the site is removed. Returns `false` if there was nothing to refund.
    pub fn on_construction_cancelled(&mut self, key: BuildingKey) -> bool {
        let Some(building) = self.buildings.get(key) else {
            tracing::debug!("cancel of unknown site {key}");
            return false;
        };
        if !building.under_construction || self.cancelled.contains(&key) {
            tracing::debug!("cancel of {key} ignored");
            return false;
        }
        BuildCostLedger::refund_build_cost_on_delete(&building.definition, &mut self.ledger);
        self.cancelled.insert(key);
        tracing::info!("construction at {key} cancelled");
        true
    }

    /// Finish a site: its build labor comes back exactly once and production
    /// is switched on when the operating cost can be covered.
    ///
    /// Returns `None` when nothing was completed, otherwise the outcome of
    /// switching production on. `ProductionToggle::MissingResources` leaves
    /// the building idle with no stop flag.
    pub fn on_construction_complete(&mut self, key: BuildingKey) -> Option<ProductionToggle> {
        if self.cancelled.contains(&key) {
            tracing::debug!("completion of cancelled site {key} ignored");
            return None;
        }
        let Some(building) = self.buildings.get_mut(key) else {
            tracing::debug!("completion of unknown site {key}");
            return None;
        };
        if !building.under_construction {
            tracing::debug!("{key} is already complete");
            return None;
        }
        building.under_construction = false;
        if let Some(handles) = self.construction_handles.remove(&key) {
            self.allocations
                .return_build_workforce(&handles, &mut self.ledger);
        }
        tracing::info!("construction at {key} complete");
        self.refresh_population();
        let toggle = self.set_production_enabled(key, true);
        if let ProductionToggle::MissingResources(missing) = &toggle {
            tracing::warn!("{key} completed but stays idle, missing {missing:?}");
        }
        Some(toggle)
    }

    /// Tear a building down: refund its capital, then remove it.
    pub fn on_building_demolished(&mut self, key: BuildingKey) -> Option<PlacedBuilding> {
        let building = self.buildings.get(key)?;
        if !self.cancelled.contains(&key) {
            BuildCostLedger::refund_build_cost_on_delete(&building.definition, &mut self.ledger);
        }
        tracing::info!("{} at {key} demolished", building.definition.name);
        self.on_building_removed(key).map(|(building, _)| building)
    }

    // ---------------------------------------------------------------------------
    // Production
    // ---------------------------------------------------------------------------

    /// Manual switch. Enabling clears any stop flag and allocates operating
    /// labor; disabling gives the labor back and marks a manual stop that the
    /// engine will never override.
    pub fn set_production_enabled(&mut self, key: BuildingKey, enabled: bool) -> ProductionToggle {
        let Some(building) = self.buildings.get(key) else {
            return ProductionToggle::UnknownBuilding;
        };
        if building.under_construction {
            return ProductionToggle::UnderConstruction;
        }

        if enabled {
            self.manually_stopped.remove(&key);
            if building.production_enabled {
                return ProductionToggle::Unchanged;
            }
            let missing = queries::missing_operational_resources(&building.definition, &self.ledger);
            if !missing.is_empty() {
                tracing::warn!("{key} cannot start: {} resource(s) short", missing.len());
                return ProductionToggle::MissingResources(missing);
            }
            // An engine-paused building still holds its workers.
            if !self.stopped_by_engine.remove(&key) {
                self.allocations.allocate_operating_workforce(
                    &building.definition,
                    key,
                    &mut self.ledger,
                );
            }
            if let Some(b) = self.buildings.get_mut(key) {
                b.production_enabled = true;
            }
            self.refresh_capacities();
            ProductionToggle::Enabled
        } else {
            if !building.production_enabled && self.manually_stopped.contains(&key) {
                return ProductionToggle::Unchanged;
            }
            self.allocations
                .return_operating_workforce(key, &mut self.ledger);
            self.stopped_by_engine.remove(&key);
            self.manually_stopped.insert(key);
            if let Some(b) = self.buildings.get_mut(key) {
                b.production_enabled = false;
            }
            self.refresh_capacities();
            ProductionToggle::Disabled
        }
    }

    /// One priority evaluation: stop, then restart, against the pre-tick state.
    pub fn tick(&mut self) -> Decision {
        let enabled: BTreeSet<BuildingKey> = self
            .buildings
            .iter()
            .filter(|b| b.production_enabled && !b.under_construction)
            .map(|b| b.key)
            .collect();
        let decision = priority::evaluate(
            &self.ledger,
            &self.index,
            PriorityState {
                enabled: &enabled,
                stopped_by_engine: &self.stopped_by_engine,
                manually_stopped: &self.manually_stopped,
            },
        );

        for &key in &decision.to_stop {
            if let Some(b) = self.buildings.get_mut(key) {
                b.production_enabled = false;
            }
            self.stopped_by_engine.insert(key);
        }
        for &key in &decision.to_restart {
            if let Some(b) = self.buildings.get_mut(key) {
                b.production_enabled = true;
            }
            self.stopped_by_engine.remove(&key);
        }
        if !decision.is_empty() {
            tracing::info!(
                "priority pass stopped {} and restarted {}",
                decision.to_stop.len(),
                decision.to_restart.len()
            );
            self.refresh_capacities();
        }
        decision
    }

    /// One cycle for every enabled, completed building, in placement order.
    pub fn run_production_cycles(&mut self) -> Vec<(BuildingKey, CycleReport)> {
        let mut reports = Vec::new();
        for building in self.buildings.iter() {
            if !building.definition.is_building
                || !building.production_enabled
                || building.under_construction
            {
                continue;
            }
            let report =
                production::execute_production_cycle(building, &mut self.ledger, &self.capacities);
            reports.push((building.key, report));
        }
        reports
    }

    pub fn can_start_production(&self, definition: &BuildingDefinition) -> bool {
        queries::can_start_production(definition, &self.ledger)
    }

    pub fn missing_operational_resources(
        &self,
        definition: &BuildingDefinition,
    ) -> BTreeSet<ResourceId> {
        queries::missing_operational_resources(definition, &self.ledger)
    }

    pub fn can_store_production(&self, key: BuildingKey) -> Option<StorageCheck> {
        let building = self.buildings.get(key)?;
        Some(production::can_store_production(
            building,
            &self.ledger,
            &self.capacities,
        ))
    }

    pub fn resource_usage(&self) -> ResourceUsage {
        queries::resource_usage(&self.buildings)
    }

    pub fn decay_unstored(&mut self, unit: f64) -> BTreeMap<ResourceId, f64> {
        storage::decay_unstored(&mut self.ledger, &self.capacities, unit)
    }

    pub fn snapshot(&self) -> EconomySnapshot {
        EconomySnapshot {
            resources: self
                .ledger
                .iter()
                .map(|r| ResourceBalance {
                    id: r.id,
                    name: r.name.clone(),
                    amount: r.amount,
                    capacity: self.capacities.limit(r.id),
                    allocated: self.allocations.allocated_total(r.id),
                    is_labor: r.is_labor,
                    must_be_stored: r.must_be_stored,
                })
                .collect(),
            stopped_by_engine: self.stopped_by_engine.iter().copied().collect(),
            manually_stopped: self.manually_stopped.iter().copied().collect(),
        }
    }

    fn refresh_population(&mut self) {
        self.index = ConsumptionIndex::rebuild(&self.buildings, &self.ledger);
        self.refresh_capacities();
    }

    fn refresh_capacities(&mut self) {
        self.capacities = storage::aggregate_capacities(&self.buildings, &self.ledger);
    }
}
