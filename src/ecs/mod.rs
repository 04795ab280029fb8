pub mod app;
pub mod clock;
pub mod commands;
pub mod conditions;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod schedule;
pub mod systems;
pub mod test_helpers;

pub use app::{build_economy_app, build_economy_app_with_engine};
pub use clock::EconomyClock;
pub use commands::{EconomyCommand, EconomyCommandKind, apply_economy_commands};
pub use conditions::{decay_due, evaluation_due, production_due};
pub use events::{ConstructionRefusal, EconomyEvent};
pub use plugin::EconomyPlugin;
pub use resources::{EconomyEventLog, EconomyState, LoggedEvent};
pub use schedule::{EconomyPhase, EconomySet, EconomyTick, configure_economy_schedule};
