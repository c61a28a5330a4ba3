//! Volume Spike Estimation
//!
//! Ratio of observed volume to a baseline volume. The baseline is a rolling
//! average from a [`BaselineSource`](pumpwatch_ports::BaselineSource) when
//! one is known, otherwise a synthetic stand-in of 20% of the observed volume.
//!
//! The synthetic baseline makes the ratio constant: any volume of 5 or more
//! yields exactly 5.0. Without real history the estimator cannot tell a
//! spike from a quiet day, and callers that need a genuine anomaly signal
//! must supply baselines.

use log::warn;
use pumpwatch_core::{BaselineKind, MetricSnapshot, VolumeSpike};

/// Fraction of observed volume used when no baseline is supplied
pub const SYNTHETIC_BASELINE_FRACTION: f64 = 0.2;

/// Smallest baseline ever divided by
pub const MIN_BASELINE: f64 = 1.0;

/// Stateless volume spike estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct SpikeEstimator;

impl SpikeEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Estimate the spike for a snapshot, optionally against a known baseline
    pub fn estimate(&self, snapshot: &MetricSnapshot, baseline: Option<f64>) -> VolumeSpike {
        let volume = snapshot.volume as f64;

        let (baseline, kind) = match baseline {
            Some(supplied) if supplied.is_finite() => {
                (supplied.max(MIN_BASELINE), BaselineKind::Supplied)
            }
            Some(supplied) => {
                warn!(
                    "{}: non-finite baseline {} floored to {}",
                    snapshot.symbol, supplied, MIN_BASELINE
                );
                (MIN_BASELINE, BaselineKind::Supplied)
            }
            None => (
                (volume * SYNTHETIC_BASELINE_FRACTION).max(MIN_BASELINE),
                BaselineKind::Synthetic,
            ),
        };

        VolumeSpike::new(volume / baseline, baseline, kind)
    }
}
