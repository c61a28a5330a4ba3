use chrono::Utc;
use pumpwatch_core::Timestamp;
use pumpwatch_ports::Clock;

/// UTC wall time, used by the server for analyses and alerts
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_are_ordered() {
        let clock = SystemClock::new();
        let before = Utc::now();
        let stamped = clock.now();
        let after = Utc::now();

        assert!(before <= stamped && stamped <= after);
    }
}
