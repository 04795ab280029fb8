use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

/// Tick counter for the economy schedule.
///
/// The `advance_clock` system moves it forward at the end of each tick (in
/// `EconomyPhase::Last`), so every other system sees the current tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct EconomyClock {
    pub tick_count: u64,
}

impl EconomyClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.tick_count += 1;
    }
}

pub fn advance_clock(mut clock: ResMut<EconomyClock>) {
    clock.advance();
}
