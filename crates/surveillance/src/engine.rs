//! Surveillance Engine
//!
//! Facade over the detection pipeline, the analysis store and the alert
//! ledger. All mutable state is owned here and injected at construction.

use crate::alert_ledger::AlertLedger;
use crate::analysis_store::AnalysisStore;
use crate::query::AnalysisQuery;
use log::info;
use pumpwatch_clock::SystemClock;
use pumpwatch_core::{
    Alert, AlertId, AnalysisRecord, NewAlert, RiskLevel, RiskStats, Symbol, Timestamp,
};
use pumpwatch_detection::DetectionPipeline;
use pumpwatch_ports::{Clock, SurveillanceResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Outcome of one refresh cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshSummary {
    /// Raw records received
    pub received: usize,
    /// Distinct symbols published
    pub total: usize,
    pub suspicious: usize,
    pub strategy: String,
    pub refreshed_at: Timestamp,
}

pub struct SurveillanceEngine {
    pipeline: DetectionPipeline,
    store: AnalysisStore,
    ledger: AlertLedger,
    clock: Arc<dyn Clock>,
}

impl SurveillanceEngine {
    pub fn new(pipeline: DetectionPipeline, ledger: AlertLedger, clock: Arc<dyn Clock>) -> Self {
        Self {
            pipeline,
            store: AnalysisStore::new(),
            ledger,
            clock,
        }
    }

    /// Engine on the system clock with the default ledger bound
    pub fn with_pipeline(pipeline: DetectionPipeline) -> Self {
        Self::new(pipeline, AlertLedger::default(), Arc::new(SystemClock::new()))
    }

    /// Analyze a batch and replace the published set with the result
    pub fn refresh(&self, raw: &[Value]) -> RefreshSummary {
        let refreshed_at = self.clock.now();
        let records = self.pipeline.analyze(raw, refreshed_at);
        let stats = self.store.upsert_all(records, refreshed_at);
        info!(
            "[SURVEILLANCE] Refresh: {} records, {} suspicious ({} high, {} medium)",
            stats.total, stats.suspicious, stats.high, stats.medium
        );

        RefreshSummary {
            received: raw.len(),
            total: stats.total,
            suspicious: stats.suspicious,
            strategy: self.strategy().to_string(),
            refreshed_at,
        }
    }

    pub fn get_all(&self) -> Vec<AnalysisRecord> {
        self.store.list()
    }

    pub fn get_suspicious(&self) -> Vec<AnalysisRecord> {
        self.store.suspicious()
    }

    pub fn get_by_symbol(&self, symbol: &str) -> SurveillanceResult<AnalysisRecord> {
        self.store.get(symbol)
    }

    pub fn get_stats(&self) -> RiskStats {
        self.store.stats()
    }

    pub fn query(&self, query: &AnalysisQuery) -> Vec<AnalysisRecord> {
        query.apply(self.store.snapshot().records())
    }

    pub fn last_refreshed(&self) -> Option<Timestamp> {
        self.store.last_refreshed()
    }

    pub fn create_alert(
        &self,
        symbol: impl Into<Symbol>,
        alert_type: impl Into<String>,
        message: impl Into<String>,
        risk_level: RiskLevel,
    ) -> Alert {
        let alert = NewAlert::new(symbol, alert_type, message, risk_level);
        self.ledger.create(alert, self.clock.now())
    }

    /// Oldest first
    pub fn list_alerts(&self) -> Vec<Alert> {
        self.ledger.list()
    }

    pub fn get_alert(&self, id: AlertId) -> SurveillanceResult<Alert> {
        self.ledger.get(id)
    }

    /// Whether an alert was removed; unknown ids are not an error
    pub fn delete_alert(&self, id: AlertId) -> bool {
        self.ledger.delete(id)
    }

    pub fn alert_capacity(&self) -> usize {
        self.ledger.capacity()
    }

    pub fn strategy(&self) -> &'static str {
        self.pipeline.strategy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortKey;
    use approx::assert_relative_eq;
    use chrono::Duration;
    use pumpwatch_clock::FixedClock;
    use pumpwatch_core::Pattern;
    use pumpwatch_detection::{ClassifierKind, StaticBaselines};
    use pumpwatch_ports::SurveillanceError;
    use serde_json::json;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn engine_with(kind: ClassifierKind, clock: Arc<FixedClock>) -> SurveillanceEngine {
        let baselines: StaticBaselines = [("ABC", 100.0)].into_iter().collect();
        let pipeline = DetectionPipeline::new(kind.build(), Arc::new(baselines));
        SurveillanceEngine::new(pipeline, AlertLedger::default(), clock)
    }

    fn feed() -> Vec<Value> {
        vec![
            json!({"symbol": "ABC", "price": 100, "changePercent": 6.0, "volume": 900}),
            json!({"symbol": "XYZ", "price": 105, "changePercent": 12.0, "volume": 120000, "high": 110, "low": 100}),
            json!({"symbol": "QUIET", "price": 50, "changePercent": 0.0, "volume": 0}),
        ]
    }

    #[test]
    fn test_refresh_publishes_all_records() {
        init();
        let clock = Arc::new(FixedClock::at_epoch());
        let engine = engine_with(ClassifierKind::Tiered, Arc::clone(&clock));

        let summary = engine.refresh(&feed());
        assert_eq!(summary.received, 3);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.strategy, "tiered");
        assert_eq!(summary.refreshed_at, clock.now());

        let abc = engine.get_by_symbol("abc").unwrap();
        assert_relative_eq!(abc.volume_spike.ratio, 9.0);
        assert_eq!(abc.pattern, Pattern::Pump);
        assert_eq!(abc.risk_level, RiskLevel::High);

        let quiet = engine.get_by_symbol("QUIET").unwrap();
        assert_eq!(quiet.risk_level, RiskLevel::Low);
        assert_eq!(quiet.signals, vec!["Normal trading behavior".to_string()]);
    }

    #[test]
    fn test_concurrent_refresh_summaries_match_own_batch() {
        let engine = engine_with(ClassifierKind::Tiered, Arc::new(FixedClock::at_epoch()));
        let small = vec![json!({"symbol": "ONE", "volume": 10})];
        let large = feed();

        std::thread::scope(|s| {
            for batch in [&small, &large] {
                let engine = &engine;
                s.spawn(move || {
                    for _ in 0..200 {
                        let summary = engine.refresh(batch);
                        assert_eq!(summary.total, batch.len());
                        assert_eq!(summary.received, batch.len());
                    }
                });
            }
        });

        let total = engine.get_stats().total;
        assert!(total == small.len() || total == large.len());
    }

    #[test]
    fn test_unknown_symbol_not_found() {
        let engine = engine_with(ClassifierKind::Tiered, Arc::new(FixedClock::at_epoch()));
        engine.refresh(&feed());
        assert_eq!(
            engine.get_by_symbol("NOPE"),
            Err(SurveillanceError::SymbolNotFound(Symbol::new("NOPE")))
        );
    }

    #[test]
    fn test_suspicious_is_subset_of_all() {
        let engine = engine_with(ClassifierKind::Tiered, Arc::new(FixedClock::at_epoch()));
        engine.refresh(&feed());

        let all = engine.get_all();
        let suspicious = engine.get_suspicious();
        assert!(!suspicious.is_empty());
        assert!(suspicious.iter().all(|r| r.is_suspicious && all.contains(r)));
        assert_eq!(engine.get_stats().suspicious, suspicious.len());
    }

    #[test]
    fn test_second_refresh_replaces_set() {
        let clock = Arc::new(FixedClock::at_epoch());
        let engine = engine_with(ClassifierKind::Tiered, Arc::clone(&clock));
        engine.refresh(&feed());

        clock.advance(Duration::minutes(5));
        engine.refresh(&[json!({"symbol": "XYZ", "volume": 10})]);

        assert_eq!(engine.get_all().len(), 1);
        assert!(engine.get_by_symbol("ABC").is_err());
        assert_eq!(engine.last_refreshed(), Some(clock.now()));
    }

    #[test]
    fn test_weighted_engine_scores() {
        let engine = engine_with(ClassifierKind::Weighted, Arc::new(FixedClock::at_epoch()));
        engine.refresh(&feed());

        let xyz = engine.get_by_symbol("XYZ").unwrap();
        assert_eq!(xyz.risk_score, Some(90));
        assert_eq!(xyz.risk_level, RiskLevel::High);
        assert_eq!(xyz.strategy, "weighted");

        let ranked = engine.query(&AnalysisQuery::new().sort_by(SortKey::RiskScore));
        assert_eq!(ranked[0].symbol.as_str(), "XYZ");
    }

    #[test]
    fn test_alert_lifecycle() {
        let clock = Arc::new(FixedClock::at_epoch());
        let engine = engine_with(ClassifierKind::Tiered, Arc::clone(&clock));

        let alert = engine.create_alert("abc", "PUMP", "9x volume", RiskLevel::High);
        assert_eq!(alert.id, 1);
        assert_eq!(alert.symbol.as_str(), "ABC");
        assert_eq!(alert.created_at, clock.now());
        assert_eq!(engine.get_alert(1).unwrap(), alert);

        assert!(!engine.delete_alert(42));
        assert_eq!(engine.list_alerts().len(), 1);

        assert!(engine.delete_alert(1));
        assert_eq!(engine.get_alert(1), Err(SurveillanceError::AlertNotFound(1)));
    }

    #[test]
    fn test_alert_bound() {
        let engine = engine_with(ClassifierKind::Tiered, Arc::new(FixedClock::at_epoch()));
        for _ in 0..51 {
            engine.create_alert("ABC", "PUMP", "spike", RiskLevel::High);
        }
        let alerts = engine.list_alerts();
        assert_eq!(alerts.len(), engine.alert_capacity());
        assert!(alerts.iter().all(|a| a.id != 1));
    }
}
