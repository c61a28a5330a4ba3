use serde::{Deserialize, Serialize};

use super::RiskLevel;
use crate::values::{AlertId, Symbol, Timestamp};

/// Operator-raised alert
///
/// Alerts are never derived from analysis records; they exist only because
/// someone created one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub symbol: Symbol,
    /// Free-form tag such as `"PUMP"` or `"VOLUME_SPIKE"`
    pub alert_type: String,
    pub message: String,
    pub risk_level: RiskLevel,
    pub created_at: Timestamp,
}

/// Alert contents before the ledger assigns an id and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlert {
    pub symbol: Symbol,
    pub alert_type: String,
    pub message: String,
    pub risk_level: RiskLevel,
}

impl NewAlert {
    pub fn new(
        symbol: impl Into<Symbol>,
        alert_type: impl Into<String>,
        message: impl Into<String>,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            alert_type: alert_type.into(),
            message: message.into(),
            risk_level,
        }
    }

    pub fn into_alert(self, id: AlertId, created_at: Timestamp) -> Alert {
        Alert {
            id,
            symbol: self.symbol,
            alert_type: self.alert_type,
            message: self.message,
            risk_level: self.risk_level,
            created_at,
        }
    }
}
