use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use pumpwatch_core::{AlertId, RiskLevel, Symbol};
use pumpwatch_surveillance::{AnalysisQuery, SortKey};
use serde_json::Value;
use std::sync::Arc;

use crate::feed::extract_records;
use crate::presentation::rest::{ApiError, dto::*};

use super::AppState;

/// GET /
pub async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "pumpwatch API".to_string(),
        total_stocks: state.engine.get_stats().total,
        strategy: state.engine.strategy().to_string(),
    })
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /stocks
pub async fn list_stocks(
    Query(params): Query<StocksQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StockResponse>>, ApiError> {
    let mut query = AnalysisQuery::new();

    if let Some(risk) = params.risk.as_deref().filter(|s| !s.trim().is_empty()) {
        let risk = risk
            .parse::<RiskLevel>()
            .map_err(|_| ApiError::invalid_parameter("risk", "must be HIGH, MEDIUM or LOW"))?;
        query = query.risk(risk);
    }
    if let Some(key) = params.sort_by.as_deref().filter(|s| !s.trim().is_empty()) {
        let key = key.parse::<SortKey>().map_err(|_| {
            ApiError::invalid_parameter(
                "sort_by",
                "must be volume_spike, price_change_percent, volume or risk_score",
            )
        })?;
        query = query.sort_by(key);
    }
    if let Some(search) = params.search {
        query = query.search(search);
    }
    if let Some(limit) = params.limit {
        query = query.limit(limit);
    }
    if params.suspicious_only.unwrap_or(false) {
        query = query.suspicious_only();
    }

    Ok(Json(stock_list(&state.engine.query(&query))))
}

/// GET /stocks/suspicious
pub async fn suspicious_stocks(State(state): State<Arc<AppState>>) -> Json<Vec<StockResponse>> {
    Json(stock_list(&state.engine.get_suspicious()))
}

/// GET /stocks/{symbol}
pub async fn get_stock(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<StockResponse>, ApiError> {
    let record = state.engine.get_by_symbol(&symbol)?;
    Ok(Json(StockResponse::from(&record)))
}

/// GET /stats
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.engine.get_stats(),
        state.engine.last_refreshed(),
    ))
}

/// POST /refresh
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let records = extract_records(body)?;
    let summary = state.engine.refresh(&records);
    Ok(Json(RefreshResponse::from(summary)))
}

/// PUT /baselines/{symbol}
pub async fn set_baseline(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(req): Json<BaselineRequest>,
) -> Result<Json<BaselineResponse>, ApiError> {
    let symbol = Symbol::new(&symbol);
    if symbol.is_unknown() {
        return Err(ApiError::invalid_parameter("symbol", "must not be blank"));
    }
    if !req.average_volume.is_finite() {
        return Err(ApiError::invalid_parameter(
            "average_volume",
            "must be a finite number",
        ));
    }

    state.baselines.set(symbol.clone(), req.average_volume);
    tracing::info!("Baseline for {} set to {}", symbol, req.average_volume);

    Ok(Json(BaselineResponse {
        symbol: symbol.to_string(),
        average_volume: req.average_volume,
    }))
}

/// GET /alerts
pub async fn list_alerts(
    Query(params): Query<AlertsQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<AlertResponse>> {
    let mut alerts: Vec<AlertResponse> = state
        .engine
        .list_alerts()
        .iter()
        .map(AlertResponse::from)
        .collect();
    if params.newest_first.unwrap_or(false) {
        alerts.reverse();
    }
    Json(alerts)
}

/// POST /alerts
pub async fn create_alert(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAlertRequest>,
) -> Result<(StatusCode, Json<AlertResponse>), ApiError> {
    let risk_level = req
        .risk_level
        .parse::<RiskLevel>()
        .map_err(|_| ApiError::invalid_parameter("risk_level", "must be HIGH, MEDIUM or LOW"))?;
    if req.symbol.trim().is_empty() {
        return Err(ApiError::invalid_parameter("symbol", "must not be blank"));
    }

    let alert = state
        .engine
        .create_alert(req.symbol.as_str(), req.alert_type, req.message, risk_level);
    Ok((StatusCode::CREATED, Json(AlertResponse::from(&alert))))
}

/// GET /alerts/{id}
pub async fn get_alert(
    Path(id): Path<AlertId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<AlertResponse>, ApiError> {
    let alert = state.engine.get_alert(id)?;
    Ok(Json(AlertResponse::from(&alert)))
}

/// DELETE /alerts/{id}
pub async fn delete_alert(
    Path(id): Path<AlertId>,
    State(state): State<Arc<AppState>>,
) -> Json<DeleteResponse> {
    Json(DeleteResponse {
        deleted: state.engine.delete_alert(id),
    })
}
