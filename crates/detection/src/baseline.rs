//! Baseline volume sources

use dashmap::DashMap;
use pumpwatch_core::Symbol;
use pumpwatch_ports::BaselineSource;
use std::sync::Arc;

/// No history at all: every spike uses the synthetic baseline
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBaseline;

impl BaselineSource for NoBaseline {
    fn baseline_volume(&self, _symbol: &Symbol) -> Option<f64> {
        None
    }
}

/// In-memory average volumes keyed by symbol
///
/// Thread-safe; values can be updated between refreshes.
pub struct StaticBaselines {
    volumes: Arc<DashMap<Symbol, f64>>,
}

impl StaticBaselines {
    pub fn new() -> Self {
        Self {
            volumes: Arc::new(DashMap::new()),
        }
    }

    /// Set (or replace) the average volume for a symbol
    pub fn set(&self, symbol: impl Into<Symbol>, average_volume: f64) {
        self.volumes.insert(symbol.into(), average_volume);
    }

    pub fn remove(&self, symbol: &Symbol) -> Option<f64> {
        self.volumes.remove(symbol).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}

impl Default for StaticBaselines {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StaticBaselines {
    fn clone(&self) -> Self {
        Self {
            volumes: Arc::clone(&self.volumes),
        }
    }
}

impl<S: Into<Symbol>> FromIterator<(S, f64)> for StaticBaselines {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let baselines = Self::new();
        for (symbol, volume) in iter {
            baselines.set(symbol, volume);
        }
        baselines
    }
}

impl BaselineSource for StaticBaselines {
    fn baseline_volume(&self, symbol: &Symbol) -> Option<f64> {
        self.volumes.get(symbol).map(|v| *v.value())
    }
}
