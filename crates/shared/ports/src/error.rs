use pumpwatch_core::{AlertId, Symbol};
use thiserror::Error;

/// Errors surfaced by surveillance queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurveillanceError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(Symbol),

    #[error("Alert not found: {0}")]
    AlertNotFound(AlertId),
}

pub type SurveillanceResult<T> = std::result::Result<T, SurveillanceError>;
