//! Analysis Store
//!
//! Latest analysis record per symbol. Each refresh builds a fresh immutable
//! [`AnalysisSet`] and publishes it with a single pointer swap, so readers
//! see either the previous full set or the new one.

use arc_swap::ArcSwap;
use log::{debug, info};
use pumpwatch_core::{AnalysisRecord, RiskStats, Symbol, Timestamp};
use pumpwatch_ports::{SurveillanceError, SurveillanceResult};
use std::collections::HashMap;
use std::sync::Arc;

/// One published generation of analysis records
#[derive(Debug, Clone, Default)]
pub struct AnalysisSet {
    records: Vec<AnalysisRecord>,
    index: HashMap<Symbol, usize>,
    refreshed_at: Option<Timestamp>,
}

impl AnalysisSet {
    /// Build a set, later duplicates replacing earlier ones in place
    pub fn build(batch: Vec<AnalysisRecord>, refreshed_at: Timestamp) -> Self {
        let mut records: Vec<AnalysisRecord> = Vec::with_capacity(batch.len());
        let mut index = HashMap::with_capacity(batch.len());

        for record in batch {
            match index.get(&record.symbol) {
                Some(&pos) => {
                    debug!("duplicate symbol {} in batch, keeping later record", record.symbol);
                    records[pos] = record;
                }
                None => {
                    index.insert(record.symbol.clone(), records.len());
                    records.push(record);
                }
            }
        }

        Self {
            records,
            index,
            refreshed_at: Some(refreshed_at),
        }
    }

    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&AnalysisRecord> {
        self.index.get(symbol).map(|&pos| &self.records[pos])
    }

    pub fn suspicious(&self) -> impl Iterator<Item = &AnalysisRecord> {
        self.records.iter().filter(|r| r.is_suspicious)
    }

    pub fn stats(&self) -> RiskStats {
        RiskStats::from_records(&self.records)
    }

    pub fn refreshed_at(&self) -> Option<Timestamp> {
        self.refreshed_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Lock-free readable store of the latest analysis set
pub struct AnalysisStore {
    current: ArcSwap<AnalysisSet>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(AnalysisSet::default()),
        }
    }

    /// Replace the whole set; symbols absent from `records` disappear
    ///
    /// Returns the stats of the set this call published, which a concurrent
    /// refresh cannot overwrite.
    pub fn upsert_all(&self, records: Vec<AnalysisRecord>, refreshed_at: Timestamp) -> RiskStats {
        let set = AnalysisSet::build(records, refreshed_at);
        let stats = set.stats();
        self.current.store(Arc::new(set));
        info!("[STORE] Published {} analysis records", stats.total);
        stats
    }

    /// Current generation, consistent for as long as it is held
    pub fn snapshot(&self) -> Arc<AnalysisSet> {
        self.current.load_full()
    }

    /// Case-insensitive lookup
    pub fn get(&self, symbol: &str) -> SurveillanceResult<AnalysisRecord> {
        let symbol = Symbol::new(symbol);
        self.current
            .load()
            .get(&symbol)
            .cloned()
            .ok_or(SurveillanceError::SymbolNotFound(symbol))
    }

    pub fn list(&self) -> Vec<AnalysisRecord> {
        self.current.load().records.clone()
    }

    pub fn suspicious(&self) -> Vec<AnalysisRecord> {
        self.current.load().suspicious().cloned().collect()
    }

    pub fn stats(&self) -> RiskStats {
        self.current.load().stats()
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    pub fn last_refreshed(&self) -> Option<Timestamp> {
        self.current.load().refreshed_at
    }
}

impl Default for AnalysisStore {
    fn default() -> Self {
        Self::new()
    }
}
