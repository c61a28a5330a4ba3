//! Tiered Threshold Classifier
//!
//! Looks only at the volume spike ratio and the percent price change.
//!
//! | Risk   | Condition                                   |
//! |--------|---------------------------------------------|
//! | HIGH   | spike >= 3.0 and abs(change) >= 5%          |
//! | MEDIUM | spike >= 1.8 or abs(change) >= 3%           |
//! | LOW    | otherwise                                   |
//!
//! Patterns: PUMP (spike >= 3, change >= +5%), DUMP (spike >= 3,
//! change <= -5%), UNUSUAL (spike >= 2 or abs(change) >= 3%), else NORMAL.

use pumpwatch_core::{Classification, MetricSnapshot, Pattern, RiskLevel, VolumeSpike};
use pumpwatch_ports::Classifier;
use serde::{Deserialize, Serialize};

/// Thresholds for the tiered classifier
///
/// Fields missing from a config file keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TieredConfig {
    /// Spike ratio for PUMP/DUMP and HIGH risk
    pub major_spike: f64,
    /// Percent move for PUMP/DUMP and HIGH risk
    pub major_change_pct: f64,
    /// Spike ratio for UNUSUAL
    pub unusual_spike: f64,
    /// Spike ratio for MEDIUM risk
    pub moderate_spike: f64,
    /// Percent move for UNUSUAL and MEDIUM risk
    pub moderate_change_pct: f64,
}

impl Default for TieredConfig {
    fn default() -> Self {
        Self {
            major_spike: 3.0,
            major_change_pct: 5.0,
            unusual_spike: 2.0,
            moderate_spike: 1.8,
            moderate_change_pct: 3.0,
        }
    }
}

impl TieredConfig {
    /// Thresholds must be finite and non-negative
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("major_spike", self.major_spike),
            ("major_change_pct", self.major_change_pct),
            ("unusual_spike", self.unusual_spike),
            ("moderate_spike", self.moderate_spike),
            ("moderate_change_pct", self.moderate_change_pct),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            Some((name, v)) => Err(format!(
                "tiered.{} must be a non-negative number, got {}",
                name, v
            )),
            None => Ok(()),
        }
    }
}

/// Threshold-tier classifier over spike ratio and percent change
#[derive(Debug, Clone, Default)]
pub struct TieredClassifier {
    config: TieredConfig,
}

impl TieredClassifier {
    pub const NAME: &'static str = "tiered";

    pub fn new(config: TieredConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TieredConfig {
        &self.config
    }

    pub fn pattern(&self, change_pct: f64, spike: f64) -> Pattern {
        let c = &self.config;
        if spike >= c.major_spike && change_pct >= c.major_change_pct {
            Pattern::Pump
        } else if spike >= c.major_spike && change_pct <= -c.major_change_pct {
            Pattern::Dump
        } else if spike >= c.unusual_spike || change_pct.abs() >= c.moderate_change_pct {
            Pattern::Unusual
        } else {
            Pattern::Normal
        }
    }

    pub fn risk(&self, change_pct: f64, spike: f64) -> RiskLevel {
        let c = &self.config;
        if spike >= c.major_spike && change_pct.abs() >= c.major_change_pct {
            RiskLevel::High
        } else if spike >= c.moderate_spike || change_pct.abs() >= c.moderate_change_pct {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// One-line explanation, one decimal place for both numbers
    pub fn reason(risk: RiskLevel, change_pct: f64, spike: f64) -> String {
        match risk {
            RiskLevel::High => format!("⚠️ {:.1}x volume, {:.1}% move", spike, change_pct),
            RiskLevel::Medium => format!(
                "Moderate spike: {:.1}x volume, {:.1}% change",
                spike, change_pct
            ),
            RiskLevel::Low => "Normal trading behavior".to_string(),
        }
    }
}

impl Classifier for TieredClassifier {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn classify(&self, snapshot: &MetricSnapshot, spike: &VolumeSpike) -> Classification {
        let change = snapshot.change_percent;
        let ratio = spike.ratio;
        let risk_level = self.risk(change, ratio);

        Classification {
            pattern: self.pattern(change, ratio),
            risk_level,
            risk_score: None,
            signals: vec![Self::reason(risk_level, change, ratio)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpwatch_core::BaselineKind;

    fn classify(change: f64, ratio: f64) -> Classification {
        let snapshot = MetricSnapshot::new("ABC", 100.0, change, 900);
        let spike = VolumeSpike::new(ratio, 100.0, BaselineKind::Supplied);
        TieredClassifier::default().classify(&snapshot, &spike)
    }

    #[test]
    fn test_pump_high() {
        let result = classify(6.0, 9.0);
        assert_eq!(result.pattern, Pattern::Pump);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(result.is_suspicious());
        assert_eq!(result.risk_score, None);
        assert_eq!(result.signals, vec!["⚠️ 9.0x volume, 6.0% move".to_string()]);
    }

    #[test]
    fn test_dump_high() {
        let result = classify(-7.3, 4.0);
        assert_eq!(result.pattern, Pattern::Dump);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.signals[0], "⚠️ 4.0x volume, -7.3% move");
    }

    #[test]
    fn test_quiet_symbol() {
        let result = classify(0.0, 0.0);
        assert_eq!(result.pattern, Pattern::Normal);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(!result.is_suspicious());
        assert_eq!(result.signals, vec!["Normal trading behavior".to_string()]);
    }

    #[test]
    fn test_moderate_spike() {
        let result = classify(1.0, 1.8);
        assert_eq!(result.pattern, Pattern::Normal);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(
            result.signals[0],
            "Moderate spike: 1.8x volume, 1.0% change"
        );
    }

    #[test]
    fn test_unusual_by_change_alone() {
        let result = classify(-3.0, 1.0);
        assert_eq!(result.pattern, Pattern::Unusual);
        assert_eq!(result.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_big_spike_small_move_is_unusual_medium() {
        let result = classify(4.9, 5.0);
        assert_eq!(result.pattern, Pattern::Unusual);
        assert_eq!(result.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_custom_thresholds() {
        let config: TieredConfig = serde_json::from_str(r#"{"major_spike": 10.0}"#).unwrap();
        assert_eq!(config.major_change_pct, 5.0);
        assert_eq!(config.validate(), Ok(()));

        let snapshot = MetricSnapshot::new("ABC", 100.0, 6.0, 900);
        let spike = VolumeSpike::new(9.0, 100.0, BaselineKind::Supplied);
        let result = TieredClassifier::new(config).classify(&snapshot, &spike);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.pattern, Pattern::Unusual);

        let negative = TieredConfig {
            moderate_spike: -1.0,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_boundaries_inclusive() {
        let classifier = TieredClassifier::default();
        assert_eq!(classifier.risk(5.0, 3.0), RiskLevel::High);
        assert_eq!(classifier.risk(-5.0, 3.0), RiskLevel::High);
        assert_eq!(classifier.risk(4.999, 3.0), RiskLevel::Medium);
        assert_eq!(classifier.risk(2.999, 1.799), RiskLevel::Low);
        assert_eq!(classifier.pattern(5.0, 3.0), Pattern::Pump);
        assert_eq!(classifier.pattern(-5.0, 3.0), Pattern::Dump);
        assert_eq!(classifier.pattern(0.0, 2.0), Pattern::Unusual);
        assert_eq!(classifier.pattern(0.0, 1.99), Pattern::Normal);
    }

    #[test]
    fn test_risk_monotonic_in_change_and_spike() {
        let classifier = TieredClassifier::default();
        let changes: Vec<f64> = (0..=40).map(|i| i as f64 * 0.25).collect();
        let spikes: Vec<f64> = (0..=40).map(|i| i as f64 * 0.1).collect();

        for sign in [1.0, -1.0] {
            for &spike in &spikes {
                let mut prev = RiskLevel::Low;
                for &change in &changes {
                    let risk = classifier.risk(sign * change, spike);
                    assert!(risk >= prev, "risk fell at change {} spike {}", change, spike);
                    prev = risk;
                }
            }
            for &change in &changes {
                let mut prev = RiskLevel::Low;
                for &spike in &spikes {
                    let risk = classifier.risk(sign * change, spike);
                    assert!(risk >= prev, "risk fell at spike {} change {}", spike, change);
                    prev = risk;
                }
            }
        }
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(classify(6.0, 9.0), classify(6.0, 9.0));
        assert_eq!(classify(-3.3, 1.2), classify(-3.3, 1.2));
    }
}
