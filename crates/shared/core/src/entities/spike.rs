use serde::{Deserialize, Serialize};

/// Where the baseline volume of a spike came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineKind {
    /// Rolling average supplied by a baseline source
    Supplied,
    /// Fixed fraction of the observed volume (no history available)
    Synthetic,
}

/// Observed volume relative to a baseline volume
///
/// `ratio` keeps full precision and is what classifiers compare against.
/// Use [`VolumeSpike::rounded`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeSpike {
    pub ratio: f64,
    /// Baseline actually divided by, always >= 1
    pub baseline: f64,
    pub baseline_kind: BaselineKind,
}

impl VolumeSpike {
    pub fn new(ratio: f64, baseline: f64, baseline_kind: BaselineKind) -> Self {
        Self {
            ratio,
            baseline,
            baseline_kind,
        }
    }

    /// Ratio rounded to two decimal places
    pub fn rounded(&self) -> f64 {
        (self.ratio * 100.0).round() / 100.0
    }

    pub fn is_synthetic(&self) -> bool {
        self.baseline_kind == BaselineKind::Synthetic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_keeps_two_places() {
        let spike = VolumeSpike::new(2.0 / 3.0, 3.0, BaselineKind::Supplied);
        assert_eq!(spike.rounded(), 0.67);
        assert!(spike.ratio > 0.666 && spike.ratio < 0.667);
    }
}
