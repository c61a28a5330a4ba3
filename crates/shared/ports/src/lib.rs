//! Pumpwatch Ports
//!
//! Port definitions (traits) for the surveillance engine.
//! These define the boundaries between detection logic and its collaborators.

mod baseline;
mod classifier;
mod clock;
mod error;

pub use baseline::BaselineSource;
pub use classifier::Classifier;
pub use clock::Clock;
pub use error::{SurveillanceError, SurveillanceResult};
