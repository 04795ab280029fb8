use bevy_app::App;
use bevy_ecs::message::MessageRegistry;
use bevy_ecs::schedule::IntoScheduleConfigs;

use super::clock::EconomyClock;
use super::commands::{EconomyCommand, apply_economy_commands};
use super::events::EconomyEvent;
use super::resources::{EconomyEventLog, EconomyState};
use super::schedule::{EconomyPhase, EconomySet, configure_economy_schedule};
use crate::config::EconomyConfig;
use crate::economy::{EconomyEngine, ResourceLedger};

/// Build a headless app with the economy clock, the engine seeded from
/// `config.resources`, message types, and the command applicator.
///
/// Install [`EconomyPlugin`](super::plugin::EconomyPlugin) for the tick systems.
/// Manual tick control:
/// ```no_run
/// # use economy_engine::config::EconomyConfig;
/// # use economy_engine::ecs::{build_economy_app, EconomyPlugin, EconomyTick};
/// let mut app = build_economy_app(EconomyConfig::default());
/// app.add_plugins(EconomyPlugin);
/// for _ in 0..30 {
///     app.world_mut().run_schedule(EconomyTick);
/// }
/// ```
pub fn build_economy_app(config: EconomyConfig) -> App {
    let ledger = ResourceLedger::from_resources(config.resources.iter().cloned());
    build_economy_app_with_engine(config, EconomyEngine::new(ledger))
}

/// Build a headless app around an engine assembled elsewhere (e.g. by a `Scenario`).
/// `config.resources` is ignored here.
pub fn build_economy_app_with_engine(config: EconomyConfig, engine: EconomyEngine) -> App {
    let mut app = App::empty();

    // Core resources
    app.insert_resource(EconomyClock::new());
    app.insert_resource(EconomyState(engine));
    app.insert_resource(EconomyEventLog::new());
    app.insert_resource(config);

    // Register message types
    MessageRegistry::register_message::<EconomyCommand>(app.world_mut());
    MessageRegistry::register_message::<EconomyEvent>(app.world_mut());

    // Build schedule with message rotation + applicator
    let mut schedule = configure_economy_schedule();
    schedule.add_systems(bevy_ecs::message::message_update_system.in_set(EconomyPhase::PreUpdate));
    schedule.add_systems(apply_economy_commands.in_set(EconomySet::Commands));
    app.add_schedule(schedule);
    app
}
