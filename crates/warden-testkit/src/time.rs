//! Controllable block clock
//!
//! Clones share one timestamp, so a test can keep a handle and move time
//! under an account that owns another clone.

use parking_lot::Mutex;
use std::sync::Arc;
use warden_core::{TimeEffects, Timestamp};

/// Block clock that only moves when told to
#[derive(Debug, Clone, Default)]
pub struct ControllableClock {
    current_time: Arc<Mutex<Timestamp>>,
}

impl ControllableClock {
    /// Create a clock starting at `initial_timestamp`
    pub fn new(initial_timestamp: Timestamp) -> Self {
        Self {
            current_time: Arc::new(Mutex::new(initial_timestamp)),
        }
    }

    /// Advance time by given number of seconds
    pub fn advance(&self, seconds: u64) {
        let mut current = self.current_time.lock();
        *current = current.saturating_add(seconds);
    }

    /// Set absolute time
    pub fn set(&self, timestamp: Timestamp) {
        *self.current_time.lock() = timestamp;
    }

    /// Get current time
    pub fn now(&self) -> Timestamp {
        *self.current_time.lock()
    }
}

impl TimeEffects for ControllableClock {
    fn block_timestamp(&self) -> Timestamp {
        self.now()
    }
}
