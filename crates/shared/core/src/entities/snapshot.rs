use serde::{Deserialize, Serialize};

use crate::values::Symbol;

/// Canonical per-symbol metrics for one refresh cycle
///
/// Produced by the normalizer from a raw feed record and never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub symbol: Symbol,
    /// Closing or last traded price, never negative
    pub price: f64,
    /// Signed percent change over the session
    pub change_percent: f64,
    /// Traded volume in shares
    pub volume: u64,
    /// Session high, when the feed reports one
    pub high: Option<f64>,
    /// Session low, when the feed reports one
    pub low: Option<f64>,
}

impl MetricSnapshot {
    pub fn new(symbol: impl Into<Symbol>, price: f64, change_percent: f64, volume: u64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change_percent,
            volume,
            high: None,
            low: None,
        }
    }

    /// Attach the session range
    pub fn with_range(mut self, high: f64, low: f64) -> Self {
        self.high = Some(high);
        self.low = Some(low);
        self
    }

    pub fn abs_change(&self) -> f64 {
        self.change_percent.abs()
    }

    /// Intraday range as a percent of the low: `(high - low) / low * 100`
    ///
    /// Only defined when both ends of the range are positive.
    pub fn intraday_volatility(&self) -> Option<f64> {
        match (self.high, self.low) {
            (Some(high), Some(low)) if high > 0.0 && low > 0.0 => Some((high - low) / low * 100.0),
            _ => None,
        }
    }
}
