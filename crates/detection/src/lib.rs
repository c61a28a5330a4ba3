//! Pumpwatch Detection
//!
//! Turns raw feed records into classified analysis records:
//!
//! ```text
//! raw record ──► normalize ──► MetricSnapshot
//!                                  │
//!             BaselineSource ──► SpikeEstimator ──► VolumeSpike
//!                                  │
//!                              Classifier ──► AnalysisRecord
//! ```
//!
//! # Classification strategies
//!
//! - [`TieredClassifier`]: threshold tiers on spike ratio and percent change
//! - [`WeightedClassifier`]: additive score over price change, volume and intraday range
//!
//! The active strategy is chosen explicitly through [`ClassifierKind`].

pub mod baseline;
pub mod classifier;
pub mod normalizer;
pub mod pipeline;
pub mod spike;

pub use baseline::{NoBaseline, StaticBaselines};
pub use classifier::{
    ClassifierKind, Thresholds, TieredClassifier, TieredConfig, WeightedClassifier,
    WeightedConfig,
};
pub use normalizer::{normalize, normalize_all};
pub use pipeline::DetectionPipeline;
pub use spike::SpikeEstimator;
