//! Additive Weighted Scorer
//!
//! Independent checks each add a fixed weight and a signal:
//!
//! - Price change: > 10% adds 40, else > 5% adds 20
//! - Volume: > 100 000 adds 30, else > 50 000 adds 15
//! - Intraday range `(high - low) / low`: > 5% adds 20
//!
//! The sum is clamped to 100. Risk is HIGH from 70, MEDIUM from 40.
//! The spike ratio is not used; this strategy scores raw volume instead.

use pumpwatch_core::{Classification, MetricSnapshot, Pattern, RiskLevel, VolumeSpike};
use pumpwatch_ports::Classifier;
use serde::{Deserialize, Serialize};

/// Signal emitted when nothing fired
pub const NO_SIGNAL: &str = "No suspicious patterns detected";

const PRICE_SPIKE: &str = "Unusual price spike";
const PRICE_INCREASE: &str = "Significant price increase";
const HIGH_VOLUME: &str = "High trading volume";
const ELEVATED_VOLUME: &str = "Elevated trading volume";

/// Weights and thresholds for the weighted scorer
///
/// Fields missing from a config file keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightedConfig {
    pub spike_change_pct: f64,
    pub spike_change_weight: u32,
    pub rise_change_pct: f64,
    pub rise_change_weight: u32,
    pub high_volume: u64,
    pub high_volume_weight: u32,
    pub elevated_volume: u64,
    pub elevated_volume_weight: u32,
    pub volatility_pct: f64,
    pub volatility_weight: u32,
    /// Lowest score that is HIGH risk
    pub high_score: u32,
    /// Lowest score that is MEDIUM risk
    pub medium_score: u32,
    pub max_score: u32,
}

impl Default for WeightedConfig {
    fn default() -> Self {
        Self {
            spike_change_pct: 10.0,
            spike_change_weight: 40,
            rise_change_pct: 5.0,
            rise_change_weight: 20,
            high_volume: 100_000,
            high_volume_weight: 30,
            elevated_volume: 50_000,
            elevated_volume_weight: 15,
            volatility_pct: 5.0,
            volatility_weight: 20,
            high_score: 70,
            medium_score: 40,
            max_score: 100,
        }
    }
}

impl WeightedConfig {
    pub fn validate(&self) -> Result<(), String> {
        let pcts = [
            ("spike_change_pct", self.spike_change_pct),
            ("rise_change_pct", self.rise_change_pct),
            ("volatility_pct", self.volatility_pct),
        ];
        if let Some((name, v)) = pcts.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(format!("weighted.{} must be a non-negative number, got {}", name, v));
        }
        if self.rise_change_pct > self.spike_change_pct {
            return Err("weighted.rise_change_pct must not exceed spike_change_pct".to_string());
        }
        if self.elevated_volume > self.high_volume {
            return Err("weighted.elevated_volume must not exceed high_volume".to_string());
        }
        if self.medium_score > self.high_score || self.high_score > self.max_score {
            return Err(
                "weighted scores must satisfy medium_score <= high_score <= max_score".to_string(),
            );
        }
        Ok(())
    }
}

/// Additive score over price change, volume and intraday volatility
#[derive(Debug, Clone, Default)]
pub struct WeightedClassifier {
    config: WeightedConfig,
}

impl WeightedClassifier {
    pub const NAME: &'static str = "weighted";

    pub fn new(config: WeightedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WeightedConfig {
        &self.config
    }

    /// Score and the signals that contributed to it
    pub fn score(&self, snapshot: &MetricSnapshot) -> (u32, Vec<String>) {
        let c = &self.config;
        let mut score = 0u32;
        let mut signals = Vec::new();

        let change = snapshot.change_percent;
        if change > c.spike_change_pct {
            score += c.spike_change_weight;
            signals.push(PRICE_SPIKE.to_string());
        } else if change > c.rise_change_pct {
            score += c.rise_change_weight;
            signals.push(PRICE_INCREASE.to_string());
        }

        if snapshot.volume > c.high_volume {
            score += c.high_volume_weight;
            signals.push(HIGH_VOLUME.to_string());
        } else if snapshot.volume > c.elevated_volume {
            score += c.elevated_volume_weight;
            signals.push(ELEVATED_VOLUME.to_string());
        }

        if let Some(volatility) = snapshot.intraday_volatility() {
            if volatility > c.volatility_pct {
                score += c.volatility_weight;
                signals.push(format!("High intraday volatility: {:.1}%", volatility));
            }
        }

        (score.min(c.max_score), signals)
    }

    pub fn risk(&self, score: u32) -> RiskLevel {
        if score >= self.config.high_score {
            RiskLevel::High
        } else if score >= self.config.medium_score {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    fn pattern(risk: RiskLevel, change_pct: f64, any_signal: bool) -> Pattern {
        match risk {
            RiskLevel::High if change_pct > 0.0 => Pattern::Pump,
            RiskLevel::High if change_pct < 0.0 => Pattern::Dump,
            _ if any_signal => Pattern::Unusual,
            _ => Pattern::Normal,
        }
    }
}

impl Classifier for WeightedClassifier {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn classify(&self, snapshot: &MetricSnapshot, _spike: &VolumeSpike) -> Classification {
        let (score, mut signals) = self.score(snapshot);
        let risk_level = self.risk(score);
        let pattern = Self::pattern(risk_level, snapshot.change_percent, !signals.is_empty());

        if risk_level == RiskLevel::Low && signals.is_empty() {
            signals.push(NO_SIGNAL.to_string());
        }

        Classification {
            pattern,
            risk_level,
            risk_score: Some(score),
            signals,
        }
    }
}
