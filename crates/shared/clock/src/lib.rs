//! Pumpwatch Clock Infrastructure
//!
//! Time sources for analysis and alert timestamps:
//!
//! - [`SystemClock`]: wall-clock time for production
//! - [`FixedClock`]: frozen time that only moves when told to, for tests
//!
//! ```ignore
//! use pumpwatch_clock::{Clock, FixedClock};
//! use chrono::Duration;
//!
//! let clock = FixedClock::at_epoch();
//! let t0 = clock.now();
//! clock.advance(Duration::minutes(5));
//! assert_eq!(clock.now() - t0, Duration::minutes(5));
//! ```

mod fixed;
mod system;

pub use fixed::FixedClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use pumpwatch_ports::Clock;
