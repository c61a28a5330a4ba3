use serde::{Deserialize, Serialize};

use super::{MetricSnapshot, Pattern, RiskLevel, VolumeSpike};
use crate::values::{Symbol, Timestamp};

/// Output of a classification strategy for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub pattern: Pattern,
    pub risk_level: RiskLevel,
    /// Numeric score, only produced by score-based strategies
    pub risk_score: Option<u32>,
    /// Short explanations of what contributed to the assessment
    pub signals: Vec<String>,
}

impl Classification {
    pub fn is_suspicious(&self) -> bool {
        self.risk_level.is_suspicious()
    }
}

/// Classified view of one symbol for one refresh cycle
///
/// Superseded as a whole on every refresh, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub symbol: Symbol,
    pub current_price: f64,
    pub price_change_percent: f64,
    pub volume: u64,
    pub volume_spike: VolumeSpike,
    pub pattern: Pattern,
    pub risk_level: RiskLevel,
    pub risk_score: Option<u32>,
    pub signals: Vec<String>,
    pub is_suspicious: bool,
    /// Name of the strategy that produced the classification
    pub strategy: String,
    pub timestamp: Timestamp,
}

impl AnalysisRecord {
    pub fn new(
        snapshot: &MetricSnapshot,
        spike: VolumeSpike,
        classification: Classification,
        strategy: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        let is_suspicious = classification.is_suspicious();
        Self {
            symbol: snapshot.symbol.clone(),
            current_price: snapshot.price,
            price_change_percent: snapshot.change_percent,
            volume: snapshot.volume,
            volume_spike: spike,
            pattern: classification.pattern,
            risk_level: classification.risk_level,
            risk_score: classification.risk_score,
            signals: classification.signals,
            is_suspicious,
            strategy: strategy.into(),
            timestamp,
        }
    }

    /// Signals joined into a single line
    pub fn reason(&self) -> String {
        self.signals.join("; ")
    }
}

/// Count of records per risk tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskStats {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub suspicious: usize,
}

impl RiskStats {
    /// Single pass over the records
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AnalysisRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            match record.risk_level {
                RiskLevel::High => stats.high += 1,
                RiskLevel::Medium => stats.medium += 1,
                RiskLevel::Low => stats.low += 1,
            }
            if record.is_suspicious {
                stats.suspicious += 1;
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::BaselineKind;
    use chrono::Utc;

    fn record(symbol: &str, risk_level: RiskLevel) -> AnalysisRecord {
        let snapshot = MetricSnapshot::new(symbol, 100.0, 1.0, 1_000);
        let classification = Classification {
            pattern: Pattern::Normal,
            risk_level,
            risk_score: None,
            signals: vec!["first".to_string(), "second".to_string()],
        };
        AnalysisRecord::new(
            &snapshot,
            VolumeSpike::new(5.0, 200.0, BaselineKind::Synthetic),
            classification,
            "tiered",
            Utc::now(),
        )
    }

    #[test]
    fn test_suspicious_flag_follows_risk() {
        assert!(record("A", RiskLevel::High).is_suspicious);
        assert!(record("B", RiskLevel::Medium).is_suspicious);
        assert!(!record("C", RiskLevel::Low).is_suspicious);
    }

    #[test]
    fn test_reason_joins_signals() {
        assert_eq!(record("A", RiskLevel::Low).reason(), "first; second");
    }

    #[test]
    fn test_stats_single_pass() {
        let records = vec![
            record("A", RiskLevel::High),
            record("B", RiskLevel::Medium),
            record("C", RiskLevel::Medium),
            record("D", RiskLevel::Low),
        ];
        let stats = RiskStats::from_records(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.high, 1);
        assert_eq!(stats.medium, 2);
        assert_eq!(stats.low, 1);
        assert_eq!(stats.suspicious, 3);
    }
}
