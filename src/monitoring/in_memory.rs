//! `InMemoryMonitor`: a bounded ring of recorded events, for tests and
//! demos that want to assert on what the kernel observed.

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
use chrono::Utc;
use parking_lot::Mutex;

// Layer 3: Internal module imports
use super::traits::Monitor;
use super::types::{RecordedEvent, RuntimeEvent};

/// Records every event it receives, up to `capacity`, dropping the oldest
/// once full.
pub struct InMemoryMonitor {
    capacity: usize,
    events: Mutex<VecDeque<RecordedEvent>>,
}

impl InMemoryMonitor {
    /// A monitor retaining up to `capacity` most-recent events.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// A snapshot of every event currently retained, oldest first.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Count of retained events whose `kind` equals `kind`.
    pub fn count(&self, kind: &str) -> usize {
        self.events.lock().iter().filter(|e| e.event().kind() == kind).count()
    }
}

impl Default for InMemoryMonitor {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl Monitor for InMemoryMonitor {
    fn record(&self, event: RuntimeEvent) {
        let mut events = self.events.lock();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(RecordedEvent {
            timestamp: Utc::now(),
            event,
        });
    }
}
