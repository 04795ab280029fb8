use bevy_ecs::resource::Resource;

use crate::ecs::events::EconomyEvent;

/// An economy event stamped with the tick it was observed on.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEvent {
    pub tick: u64,
    pub event: EconomyEvent,
}

/// Accumulates economy events between reads by the host.
#[derive(Resource, Debug, Clone, Default)]
pub struct EconomyEventLog {
    pub events: Vec<LoggedEvent>,
}

impl EconomyEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out everything logged so far and start over.
    pub fn take(&mut self) -> Vec<LoggedEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
