use bevy_ecs::message::Message;

use crate::economy::MissingResource;
use crate::model::{BuildingKey, ResourceId};

/// Why a construction command was turned down.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstructionRefusal {
    Occupied,
    Unaffordable(Vec<MissingResource>),
}

/// Outcomes the economy reports back to collaborators (UI, placement,
/// construction animation). Written by the applicator and the tick systems,
/// read in `EconomyPhase::Reactions` or later.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum EconomyEvent {
    // -- Priority --
    ProductionStopped {
        key: BuildingKey,
    },
    ProductionRestarted {
        key: BuildingKey,
    },

    // -- Storage --
    StorageFull {
        key: BuildingKey,
        resource_id: ResourceId,
    },
    ResourceSpoiled {
        resource_id: ResourceId,
        amount: f64,
    },

    // -- Construction --
    ConstructionStarted {
        key: BuildingKey,
    },
    ConstructionRefused {
        key: BuildingKey,
        reason: ConstructionRefusal,
    },
    ConstructionCompleted {
        key: BuildingKey,
    },
    BuildingRemoved {
        key: BuildingKey,
    },
}
