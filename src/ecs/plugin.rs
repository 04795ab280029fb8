use bevy_app::{App, Plugin};

use super::systems::add_economy_systems;

/// Installs the evaluation, production, decay and event-recording systems
/// on an app built by [`build_economy_app`](super::app::build_economy_app).
pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        add_economy_systems(app);
    }
}
