pub mod economy_state;
pub mod event_log;

pub use economy_state::EconomyState;
pub use event_log::{EconomyEventLog, LoggedEvent};
