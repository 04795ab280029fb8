use bevy_app::App;
use bevy_ecs::message::Messages;

use crate::config::EconomyConfig;
use crate::ecs::app::build_economy_app;
use crate::ecs::commands::{EconomyCommand, EconomyCommandKind};
use crate::ecs::plugin::EconomyPlugin;
use crate::ecs::resources::EconomyState;
use crate::ecs::schedule::EconomyTick;

/// App with the core resources and every economy system installed.
pub fn economy_app(config: EconomyConfig) -> App {
    let mut app = build_economy_app(config);
    app.add_plugins(EconomyPlugin);
    app
}

/// Queue a command for the next tick.
pub fn send(app: &mut App, kind: EconomyCommandKind) {
    app.world_mut()
        .resource_mut::<Messages<EconomyCommand>>()
        .write(EconomyCommand::new(kind));
}

/// Run `n` ticks.
pub fn tick(app: &mut App, n: u32) {
    for _ in 0..n {
        app.world_mut().run_schedule(EconomyTick);
    }
}

pub fn engine(app: &App) -> &EconomyState {
    app.world().resource::<EconomyState>()
}
