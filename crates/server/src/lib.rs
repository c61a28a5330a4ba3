//! Pumpwatch Server
//!
//! Serving layer for the surveillance engine.
//!
//! # Architecture
//!
//! - **Config**: JSON file plus environment overrides
//! - **Feed**: where raw records come from (a local snapshot file)
//! - **Refresher**: startup and periodic refresh with timeout and retry
//! - **Presentation**: REST API over the engine
//!
//! # Example
//!
//! ```ignore
//! use pumpwatch_server::{App, PumpwatchConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = PumpwatchConfig::default().with_env().unwrap();
//!     App::new(config).run().await.unwrap();
//! }
//! ```

pub mod config;
pub mod feed;
pub mod presentation;
pub mod refresher;

pub use config::{ConfigError, DetectionConfig, FeedConfig, PumpwatchConfig, ServerConfig};
pub use feed::{FeedError, FeedSource, SnapshotFileFeed};
pub use presentation::{AppState, create_router};
pub use refresher::Refresher;

use axum::Router;
use pumpwatch_clock::SystemClock;
use pumpwatch_detection::{DetectionPipeline, StaticBaselines};
use pumpwatch_ports::Clock;
use pumpwatch_surveillance::{AlertLedger, SurveillanceEngine};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// The pumpwatch server
pub struct App {
    pub config: PumpwatchConfig,
    engine: Arc<SurveillanceEngine>,
    baselines: StaticBaselines,
    feed: Option<Arc<dyn FeedSource>>,
}

impl App {
    /// Build on the system clock
    pub fn new(config: PumpwatchConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(config: PumpwatchConfig, clock: Arc<dyn Clock>) -> Self {
        let baselines: StaticBaselines = config
            .baselines
            .iter()
            .map(|(symbol, volume)| (symbol.as_str(), *volume))
            .collect();

        let pipeline = DetectionPipeline::new(
            config
                .detection
                .strategy
                .build_with(&config.detection.thresholds),
            Arc::new(baselines.clone()),
        );
        let ledger = AlertLedger::new(config.detection.alert_capacity);
        let engine = Arc::new(SurveillanceEngine::new(pipeline, ledger, clock));

        let feed = config
            .feed
            .snapshot_path
            .as_ref()
            .map(|path| Arc::new(SnapshotFileFeed::new(path)) as Arc<dyn FeedSource>);

        App {
            config,
            engine,
            baselines,
            feed,
        }
    }

    /// Replace the configured feed
    pub fn with_feed(mut self, feed: Arc<dyn FeedSource>) -> Self {
        self.feed = Some(feed);
        self
    }

    pub fn engine(&self) -> &Arc<SurveillanceEngine> {
        &self.engine
    }

    pub fn baselines(&self) -> &StaticBaselines {
        &self.baselines
    }

    /// Create the REST API router
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState::new(
            Arc::clone(&self.engine),
            self.baselines.clone(),
        ));
        create_router(state)
    }

    fn refresher(&self, feed: Arc<dyn FeedSource>) -> Refresher {
        Refresher::new(Arc::clone(&self.engine), feed, &self.config.feed)
    }

    /// Seed the analysis set from the feed, if one is configured
    ///
    /// A failing feed is not fatal: the server starts with an empty set.
    pub async fn initial_refresh(&self) {
        let Some(feed) = self.feed.clone() else {
            tracing::info!("No feed configured, waiting for POST /refresh");
            return;
        };

        match self.refresher(Arc::clone(&feed)).refresh_once().await {
            Ok(summary) => tracing::info!(
                "Loaded {} stocks from {} ({} suspicious)",
                summary.total,
                feed.name(),
                summary.suspicious
            ),
            Err(e) => tracing::warn!("Initial load from {} failed: {}", feed.name(), e),
        }
    }

    /// Run the server
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        self.initial_refresh().await;

        let periodic = match (self.feed.clone(), self.config.feed.refresh_interval_secs) {
            (Some(feed), Some(secs)) => {
                tracing::info!("Refreshing from {} every {}s", feed.name(), secs);
                Some(self.refresher(feed).spawn(Duration::from_secs(secs)))
            }
            _ => None,
        };

        let addr = self.config.bind_addr();
        tracing::info!("pumpwatch listening on {}", addr);

        let listener = TcpListener::bind(&addr).await?;
        let served = axum::serve(listener, self.router()).await;

        if let Some(handle) = periodic {
            handle.abort();
        }
        served?;

        Ok(())
    }
}
