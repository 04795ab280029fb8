use bevy_ecs::system::Res;

use super::clock::EconomyClock;
use crate::config::EconomyConfig;

// Internal check function for testability.

fn interval_check(tick: u64, interval: u32) -> bool {
    // A zero interval never passes config validation; treat it as "every tick".
    tick.is_multiple_of(u64::from(interval.max(1)))
}

/// Run condition: a priority evaluation is due this tick.
pub fn evaluation_due(clock: Res<EconomyClock>, config: Res<EconomyConfig>) -> bool {
    interval_check(clock.tick_count, config.evaluation_interval)
}

/// Run condition: a production cycle is due this tick.
pub fn production_due(clock: Res<EconomyClock>, config: Res<EconomyConfig>) -> bool {
    interval_check(clock.tick_count, config.production_interval)
}

/// Run condition: perishables without storage decay this tick.
pub fn decay_due(clock: Res<EconomyClock>, config: Res<EconomyConfig>) -> bool {
    interval_check(clock.tick_count, config.decay_interval)
}
