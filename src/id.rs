use crate::model::AllocationHandle;

/// Monotonic source of allocation handles.
/// A handle value is never reused, so a stale handle can never close a newer allocation.
#[derive(Debug, Clone)]
pub struct HandleGenerator {
    next: u64,
}

impl HandleGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_handle(&mut self) -> AllocationHandle {
        let handle = AllocationHandle(self.next);
        self.next += 1;
        handle
    }
}

impl Default for HandleGenerator {
    fn default() -> Self {
        Self::new()
    }
}
