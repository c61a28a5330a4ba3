//! Pumpwatch Core Domain
//!
//! Pure domain types for the pump-and-dump surveillance engine.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    Alert, AnalysisRecord, BaselineKind, Classification, MetricSnapshot, NewAlert, Pattern,
    RiskLevel, RiskStats, VolumeSpike,
};
pub use values::{AlertId, Symbol, Timestamp};
