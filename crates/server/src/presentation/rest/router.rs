use axum::{
    Router,
    routing::{get, post, put},
};
use pumpwatch_detection::StaticBaselines;
use pumpwatch_surveillance::SurveillanceEngine;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;

/// Application state shared across handlers
pub struct AppState {
    pub engine: Arc<SurveillanceEngine>,
    /// Same map the engine's pipeline reads baselines from
    pub baselines: StaticBaselines,
}

impl AppState {
    pub fn new(engine: Arc<SurveillanceEngine>, baselines: StaticBaselines) -> Self {
        AppState { engine, baselines }
    }
}

/// Create the REST API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Analysis
        .route("/stocks", get(handlers::list_stocks))
        .route("/stocks/suspicious", get(handlers::suspicious_stocks))
        .route("/stocks/{symbol}", get(handlers::get_stock))
        .route("/stats", get(handlers::stats))
        .route("/refresh", post(handlers::refresh))
        .route("/baselines/{symbol}", put(handlers::set_baseline))
        // Alerts
        .route(
            "/alerts",
            get(handlers::list_alerts).post(handlers::create_alert),
        )
        .route(
            "/alerts/{id}",
            get(handlers::get_alert).delete(handlers::delete_alert),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
