use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use pumpwatch_core::Timestamp;
use pumpwatch_ports::Clock;

/// Clock frozen at a given instant
///
/// Time only moves through [`FixedClock::set`] or [`FixedClock::advance`].
pub struct FixedClock {
    current: RwLock<Timestamp>,
}

impl FixedClock {
    pub fn new(at: Timestamp) -> Self {
        Self {
            current: RwLock::new(at),
        }
    }

    /// Frozen at the Unix epoch
    pub fn at_epoch() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn set(&self, at: Timestamp) {
        *self.current.write() = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.current.write();
        *current += by;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at_epoch()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }
}
