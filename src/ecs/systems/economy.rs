//! Economy tick systems.
//!
//! Update phase, chained by `EconomySet`:
//! 1. `evaluate_priorities`: shed and restore consumers (every `evaluation_interval`)
//! 2. `run_production`: one cycle per enabled building (every `production_interval`)
//! 3. `decay_perishables`: spoil perishables without storage (every `decay_interval`)
//!
//! Reaction system (Reactions phase):
//! 4. `record_economy_events`: stamp every `EconomyEvent` into `EconomyEventLog`

use bevy_app::App;
use bevy_ecs::message::{MessageReader, MessageWriter};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Res, ResMut};

use crate::config::EconomyConfig;
use crate::ecs::clock::EconomyClock;
use crate::ecs::conditions::{decay_due, evaluation_due, production_due};
use crate::ecs::events::EconomyEvent;
use crate::ecs::resources::{EconomyEventLog, EconomyState, LoggedEvent};
use crate::ecs::schedule::{EconomyPhase, EconomySet, EconomyTick};

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub fn add_economy_systems(app: &mut App) {
    app.add_systems(
        EconomyTick,
        evaluate_priorities
            .run_if(evaluation_due)
            .in_set(EconomySet::Evaluation),
    );
    app.add_systems(
        EconomyTick,
        run_production
            .run_if(production_due)
            .in_set(EconomySet::Production),
    );
    app.add_systems(
        EconomyTick,
        decay_perishables.run_if(decay_due).in_set(EconomySet::Decay),
    );
    app.add_systems(
        EconomyTick,
        record_economy_events.in_set(EconomyPhase::Reactions),
    );
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

fn evaluate_priorities(mut state: ResMut<EconomyState>, mut events: MessageWriter<EconomyEvent>) {
    let decision = state.tick();
    for &key in &decision.to_stop {
        events.write(EconomyEvent::ProductionStopped { key });
    }
    for &key in &decision.to_restart {
        events.write(EconomyEvent::ProductionRestarted { key });
    }
}

fn run_production(mut state: ResMut<EconomyState>, mut events: MessageWriter<EconomyEvent>) {
    for (key, report) in state.run_production_cycles() {
        for resource_id in report.blocked {
            events.write(EconomyEvent::StorageFull { key, resource_id });
        }
    }
}

fn decay_perishables(
    mut state: ResMut<EconomyState>,
    config: Res<EconomyConfig>,
    mut events: MessageWriter<EconomyEvent>,
) {
    for (resource_id, amount) in state.decay_unstored(config.decay_unit) {
        events.write(EconomyEvent::ResourceSpoiled {
            resource_id,
            amount,
        });
    }
}

fn record_economy_events(
    mut events: MessageReader<EconomyEvent>,
    clock: Res<EconomyClock>,
    mut log: ResMut<EconomyEventLog>,
) {
    for event in events.read() {
        log.events.push(LoggedEvent {
            tick: clock.tick_count,
            event: event.clone(),
        });
    }
}
