use bevy_ecs::message::Messages;
use bevy_ecs::world::World;

use crate::economy::{ConstructionStart, EconomyEngine, ProductionToggle};
use crate::ecs::events::{ConstructionRefusal, EconomyEvent};
use crate::ecs::resources::EconomyState;

use super::{EconomyCommand, EconomyCommandKind};

/// Exclusive system that drains all pending `EconomyCommand` messages,
/// applies them to the engine in arrival order and emits `EconomyEvent`
/// messages for the outcomes.
///
/// Runs in `EconomySet::Commands`, ahead of evaluation.
pub fn apply_economy_commands(world: &mut World) {
    let commands: Vec<EconomyCommand> = {
        let Some(mut messages) = world.get_resource_mut::<Messages<EconomyCommand>>() else {
            return;
        };
        messages.drain().collect()
    };

    if commands.is_empty() {
        return;
    }

    let Some(mut state) = world.remove_resource::<EconomyState>() else {
        tracing::warn!(
            "{} economy command(s) dropped: no EconomyState in world",
            commands.len()
        );
        return;
    };

    let mut events = Vec::new();
    for cmd in &commands {
        if !cmd.description.is_empty() {
            tracing::debug!("applying economy command: {}", cmd.description);
        }
        apply_command(&mut state.0, &cmd.kind, &mut events);
    }

    if let Some(mut messages) = world.get_resource_mut::<Messages<EconomyEvent>>() {
        messages.write_batch(events);
    }
    world.insert_resource(state);
}

fn apply_command(
    engine: &mut EconomyEngine,
    kind: &EconomyCommandKind,
    events: &mut Vec<EconomyEvent>,
) {
    match kind {
        EconomyCommandKind::RegisterResource { resource } => {
            engine.register_resource(resource.clone());
        }
        EconomyCommandKind::AdjustResource { resource_id, delta } => {
            engine.adjust_resource(*resource_id, *delta);
        }
        EconomyCommandKind::PlaceBuilding { building } => {
            engine.on_building_placed(building.clone());
        }
        EconomyCommandKind::RemoveBuilding { key } => {
            if engine.on_building_removed(*key).is_some() {
                events.push(EconomyEvent::BuildingRemoved { key: *key });
            }
        }
        EconomyCommandKind::StartConstruction { key, definition } => {
            match engine.on_construction_start(*key, definition.clone()) {
                ConstructionStart::Started { .. } => {
                    events.push(EconomyEvent::ConstructionStarted { key: *key });
                }
                ConstructionStart::Unaffordable(missing) => {
                    events.push(EconomyEvent::ConstructionRefused {
                        key: *key,
                        reason: ConstructionRefusal::Unaffordable(missing),
                    });
                }
                ConstructionStart::Occupied => {
                    events.push(EconomyEvent::ConstructionRefused {
                        key: *key,
                        reason: ConstructionRefusal::Occupied,
                    });
                }
            }
        }
        EconomyCommandKind::CancelConstruction { key } => {
            engine.on_construction_cancelled(*key);
        }
        EconomyCommandKind::CompleteConstruction { key } => {
            if engine.on_construction_complete(*key).is_some() {
                events.push(EconomyEvent::ConstructionCompleted { key: *key });
            }
        }
        EconomyCommandKind::Demolish { key } => {
            if engine.on_building_demolished(*key).is_some() {
                events.push(EconomyEvent::BuildingRemoved { key: *key });
            }
        }
        EconomyCommandKind::SetProductionEnabled { key, enabled } => {
            match engine.set_production_enabled(*key, *enabled) {
                ProductionToggle::Enabled
                | ProductionToggle::Disabled
                | ProductionToggle::Unchanged => {}
                refused => {
                    tracing::warn!("production toggle for {key} refused: {refused:?}");
                }
            }
        }
    }
}
