//! Periodic feed refresh
//!
//! Each fetch is bounded by a timeout and retried with linear backoff. When
//! every attempt fails the previously published analysis set stays live.

use crate::config::FeedConfig;
use crate::feed::{FeedError, FeedSource};
use pumpwatch_surveillance::{RefreshSummary, SurveillanceEngine};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct Refresher {
    engine: Arc<SurveillanceEngine>,
    feed: Arc<dyn FeedSource>,
    timeout: Duration,
    max_retries: u32,
    backoff: Duration,
}

impl Refresher {
    pub fn new(engine: Arc<SurveillanceEngine>, feed: Arc<dyn FeedSource>, config: &FeedConfig) -> Self {
        Self {
            engine,
            feed,
            timeout: Duration::from_secs(config.fetch_timeout_secs),
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// One attempt plus up to `max_retries` retries
    pub async fn fetch_with_retry(&self) -> Result<Vec<Value>, FeedError> {
        let mut attempt = 0;
        loop {
            let result = match tokio::time::timeout(self.timeout, self.feed.fetch()).await {
                Ok(result) => result,
                Err(_) => Err(FeedError::Timeout(self.timeout.as_secs())),
            };

            match result {
                Ok(records) => return Ok(records),
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.backoff * attempt;
                    tracing::warn!(
                        "Feed {} failed ({}), retry {}/{} in {:?}",
                        self.feed.name(),
                        e,
                        attempt,
                        self.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Fetch and publish; on failure the previous set is kept
    pub async fn refresh_once(&self) -> Result<RefreshSummary, FeedError> {
        match self.fetch_with_retry().await {
            Ok(records) => Ok(self.engine.refresh(&records)),
            Err(e) => {
                tracing::error!(
                    "Feed {} unavailable, keeping {} published records: {}",
                    self.feed.name(),
                    self.engine.get_stats().total,
                    e
                );
                Err(e)
            }
        }
    }

    /// Refresh every `every`, starting after the first interval
    pub fn spawn(self, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                if let Ok(summary) = self.refresh_once().await {
                    tracing::info!(
                        "Periodic refresh: {} records, {} suspicious",
                        summary.total,
                        summary.suspicious
                    );
                }
            }
        })
    }
}
