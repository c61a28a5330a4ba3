//! Dashboard filtering and ranking over an analysis set

use pumpwatch_core::{AnalysisRecord, RiskLevel};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field to rank by, always descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    VolumeSpike,
    PriceChangePercent,
    Volume,
    RiskScore,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::VolumeSpike => "volume_spike",
            SortKey::PriceChangePercent => "price_change_percent",
            SortKey::Volume => "volume",
            SortKey::RiskScore => "risk_score",
        }
    }

    fn compare(&self, a: &AnalysisRecord, b: &AnalysisRecord) -> Ordering {
        match self {
            SortKey::VolumeSpike => b.volume_spike.ratio.total_cmp(&a.volume_spike.ratio),
            SortKey::PriceChangePercent => b.price_change_percent.total_cmp(&a.price_change_percent),
            SortKey::Volume => b.volume.cmp(&a.volume),
            // Unscored records rank last
            SortKey::RiskScore => b.risk_score.cmp(&a.risk_score),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "volume_spike" => Ok(SortKey::VolumeSpike),
            "price_change_percent" => Ok(SortKey::PriceChangePercent),
            "volume" => Ok(SortKey::Volume),
            "risk_score" => Ok(SortKey::RiskScore),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Filter, rank and truncate analysis records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisQuery {
    pub risk: Option<RiskLevel>,
    pub search: Option<String>,
    pub sort_by: Option<SortKey>,
    #[serde(default)]
    pub suspicious_only: bool,
    pub limit: Option<usize>,
}

impl AnalysisQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn risk(mut self, risk: RiskLevel) -> Self {
        self.risk = Some(risk);
        self
    }

    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_by = Some(key);
        self
    }

    pub fn suspicious_only(mut self) -> Self {
        self.suspicious_only = true;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, record: &AnalysisRecord) -> bool {
        if self.suspicious_only && !record.is_suspicious {
            return false;
        }
        if self.risk.is_some_and(|risk| record.risk_level != risk) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => record.symbol.contains(needle),
            _ => true,
        }
    }

    /// Apply to records in store order
    pub fn apply<'a>(&self, records: impl IntoIterator<Item = &'a AnalysisRecord>) -> Vec<AnalysisRecord> {
        let mut selected: Vec<AnalysisRecord> = records
            .into_iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        if let Some(key) = self.sort_by {
            // sort_by is stable: ties keep store order
            selected.sort_by(|a, b| key.compare(a, b));
        }
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use pumpwatch_core::{BaselineKind, Classification, MetricSnapshot, Pattern, VolumeSpike};

    fn record(symbol: &str, change: f64, volume: u64, ratio: f64, risk: RiskLevel) -> AnalysisRecord {
        AnalysisRecord::new(
            &MetricSnapshot::new(symbol, 10.0, change, volume),
            VolumeSpike::new(ratio, 100.0, BaselineKind::Supplied),
            Classification {
                pattern: Pattern::Normal,
                risk_level: risk,
                risk_score: None,
                signals: vec![],
            },
            "tiered",
            DateTime::<Utc>::UNIX_EPOCH,
        )
    }

    fn fixture() -> Vec<AnalysisRecord> {
        vec![
            record("NABIL", 1.0, 500, 2.0, RiskLevel::Low),
            record("NICA", 6.0, 900, 9.0, RiskLevel::High),
            record("NABBC", -4.0, 100, 2.0, RiskLevel::Medium),
            record("HIDCL", 6.0, 300, 1.0, RiskLevel::Medium),
        ]
    }

    fn symbols(records: &[AnalysisRecord]) -> Vec<&str> {
        records.iter().map(|r| r.symbol.as_str()).collect()
    }

    #[test]
    fn test_default_query_returns_all_in_order() {
        let records = fixture();
        let result = AnalysisQuery::new().apply(&records);
        assert_eq!(symbols(&result), vec!["NABIL", "NICA", "NABBC", "HIDCL"]);
    }

    #[test]
    fn test_filter_by_risk_and_search() {
        let records = fixture();
        let medium = AnalysisQuery::new().risk(RiskLevel::Medium).apply(&records);
        assert_eq!(symbols(&medium), vec!["NABBC", "HIDCL"]);

        let found = AnalysisQuery::new().search("nab").apply(&records);
        assert_eq!(symbols(&found), vec!["NABIL", "NABBC"]);

        let blank = AnalysisQuery::new().search("  ").apply(&records);
        assert_eq!(blank.len(), 4);
    }

    #[test]
    fn test_sort_descending_and_stable() {
        let records = fixture();
        let by_spike = AnalysisQuery::new().sort_by(SortKey::VolumeSpike).apply(&records);
        assert_eq!(symbols(&by_spike), vec!["NICA", "NABIL", "NABBC", "HIDCL"]);

        let by_change = AnalysisQuery::new()
            .sort_by(SortKey::PriceChangePercent)
            .apply(&records);
        assert_eq!(symbols(&by_change), vec!["NICA", "HIDCL", "NABIL", "NABBC"]);
    }

    #[test]
    fn test_suspicious_only_with_limit() {
        let records = fixture();
        let top = AnalysisQuery::new()
            .suspicious_only()
            .sort_by(SortKey::Volume)
            .limit(2)
            .apply(&records);
        assert_eq!(symbols(&top), vec!["NICA", "HIDCL"]);
    }

    #[test]
    fn test_risk_score_puts_unscored_last() {
        let mut records = fixture();
        records[3].risk_score = Some(45);
        let ranked = AnalysisQuery::new().sort_by(SortKey::RiskScore).apply(&records);
        assert_eq!(ranked[0].symbol.as_str(), "HIDCL");
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("Volume_Spike".parse::<SortKey>(), Ok(SortKey::VolumeSpike));
        assert!("price".parse::<SortKey>().is_err());
    }
}
