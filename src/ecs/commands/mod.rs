pub mod applicator;

use bevy_ecs::message::Message;

use crate::model::{BuildingDefinition, BuildingKey, PlacedBuilding, Resource, ResourceId};

pub use applicator::apply_economy_commands;

/// A collaborator's request to change the economy.
///
/// Placement, construction animation and the UI write these via
/// `MessageWriter<EconomyCommand>` (or `World::write_message` from outside
/// the schedule). The applicator in `EconomySet::Commands` processes them in
/// arrival order before the tick's priority evaluation.
#[derive(Message, Clone, Debug)]
pub struct EconomyCommand {
    pub kind: EconomyCommandKind,
    /// Human-readable note carried into the logs.
    pub description: String,
}

impl EconomyCommand {
    pub fn new(kind: EconomyCommandKind) -> Self {
        Self {
            kind,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Clone, Debug)]
pub enum EconomyCommandKind {
    // -- Resources --
    RegisterResource {
        resource: Resource,
    },
    AdjustResource {
        resource_id: ResourceId,
        delta: f64,
    },

    // -- Population --
    PlaceBuilding {
        building: PlacedBuilding,
    },
    RemoveBuilding {
        key: BuildingKey,
    },

    // -- Construction lifecycle --
    StartConstruction {
        key: BuildingKey,
        definition: BuildingDefinition,
    },
    CancelConstruction {
        key: BuildingKey,
    },
    CompleteConstruction {
        key: BuildingKey,
    },
    Demolish {
        key: BuildingKey,
    },

    // -- Manual control --
    SetProductionEnabled {
        key: BuildingKey,
        enabled: bool,
    },
}
