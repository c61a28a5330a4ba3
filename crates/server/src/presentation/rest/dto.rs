use chrono::SecondsFormat;
use pumpwatch_core::{Alert, AlertId, AnalysisRecord, RiskStats};
use pumpwatch_surveillance::RefreshSummary;
use serde::{Deserialize, Serialize};

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub msg: String,
}

impl ErrorResponse {
    pub fn new(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub total_stocks: usize,
    pub strategy: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Query string for `GET /stocks`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StocksQuery {
    #[serde(default)]
    pub risk: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub suspicious_only: Option<bool>,
}

/// One analyzed stock as served to dashboards
#[derive(Debug, Clone, Serialize)]
pub struct StockResponse {
    pub symbol: String,
    pub current_price: f64,
    pub price_change_percent: f64,
    pub volume: u64,
    /// Rounded to two decimal places
    pub volume_spike: f64,
    pub baseline_kind: String,
    pub is_suspicious: bool,
    pub risk_level: String,
    /// Wire code, e.g. "PUMP"
    pub pattern: String,
    /// Dashboard label, e.g. "Potential PUMP"
    pub pattern_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u32>,
    pub reason: String,
    pub signals: Vec<String>,
    pub strategy: String,
    pub timestamp: String,
}

impl From<&AnalysisRecord> for StockResponse {
    fn from(record: &AnalysisRecord) -> Self {
        Self {
            symbol: record.symbol.to_string(),
            current_price: record.current_price,
            price_change_percent: record.price_change_percent,
            volume: record.volume,
            volume_spike: record.volume_spike.rounded(),
            baseline_kind: if record.volume_spike.is_synthetic() {
                "synthetic".to_string()
            } else {
                "supplied".to_string()
            },
            is_suspicious: record.is_suspicious,
            risk_level: record.risk_level.to_string(),
            pattern: record.pattern.to_string(),
            pattern_label: record.pattern.label().to_string(),
            risk_score: record.risk_score,
            reason: record.reason(),
            signals: record.signals.clone(),
            strategy: record.strategy.clone(),
            timestamp: record.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

pub fn stock_list(records: &[AnalysisRecord]) -> Vec<StockResponse> {
    records.iter().map(StockResponse::from).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total_stocks: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
    pub suspicious: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refreshed: Option<String>,
}

impl StatsResponse {
    pub fn new(stats: RiskStats, last_refreshed: Option<chrono::DateTime<chrono::Utc>>) -> Self {
        Self {
            total_stocks: stats.total,
            high_risk: stats.high,
            medium_risk: stats.medium,
            low_risk: stats.low,
            suspicious: stats.suspicious,
            last_refreshed: last_refreshed.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub received: usize,
    pub total_stocks: usize,
    pub suspicious: usize,
    pub strategy: String,
    pub refreshed_at: String,
}

impl From<RefreshSummary> for RefreshResponse {
    fn from(summary: RefreshSummary) -> Self {
        Self {
            received: summary.received,
            total_stocks: summary.total,
            suspicious: summary.suspicious,
            strategy: summary.strategy,
            refreshed_at: summary
                .refreshed_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaselineRequest {
    pub average_volume: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BaselineResponse {
    pub symbol: String,
    pub average_volume: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsQuery {
    #[serde(default)]
    pub newest_first: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlertRequest {
    pub symbol: String,
    #[serde(alias = "type")]
    pub alert_type: String,
    #[serde(default)]
    pub message: String,
    pub risk_level: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertResponse {
    pub id: AlertId,
    pub symbol: String,
    pub alert_type: String,
    pub message: String,
    pub risk_level: String,
    pub created_at: String,
}

impl From<&Alert> for AlertResponse {
    fn from(alert: &Alert) -> Self {
        Self {
            id: alert.id,
            symbol: alert.symbol.to_string(),
            alert_type: alert.alert_type.clone(),
            message: alert.message.clone(),
            risk_level: alert.risk_level.to_string(),
            created_at: alert.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
