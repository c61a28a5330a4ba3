use pumpwatch_core::Symbol;

/// Supplier of historical average volume per symbol
///
/// Returning `None` means no history is known and the spike estimator falls
/// back to its synthetic baseline.
pub trait BaselineSource: Send + Sync {
    fn baseline_volume(&self, symbol: &Symbol) -> Option<f64>;
}
