use pumpwatch_core::{Classification, MetricSnapshot, VolumeSpike};

/// Risk/pattern classification strategy
///
/// Implementations must be pure: the same snapshot and spike always produce
/// the same classification.
pub trait Classifier: Send + Sync {
    /// Stable strategy name, recorded on every analysis record
    fn name(&self) -> &'static str;

    fn classify(&self, snapshot: &MetricSnapshot, spike: &VolumeSpike) -> Classification;
}
