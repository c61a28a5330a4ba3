//! Configuration loading for the pumpwatch server
//!
//! JSON file with serde defaults, then environment overrides:
//!
//! | Variable                 | Field                        |
//! |--------------------------|------------------------------|
//! | `HOST`                   | `server.host`                |
//! | `PORT`                   | `server.port`                |
//! | `PUMPWATCH_STRATEGY`     | `detection.strategy`         |
//! | `PUMPWATCH_SNAPSHOT`     | `feed.snapshot_path`         |
//! | `PUMPWATCH_REFRESH_SECS` | `feed.refresh_interval_secs` |

use pumpwatch_detection::{ClassifierKind, Thresholds};
use pumpwatch_surveillance::DEFAULT_ALERT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PumpwatchConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub detection: DetectionConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    /// Average volume per symbol, used as the spike baseline
    #[serde(default)]
    pub baselines: BTreeMap<String, f64>,
}

impl PumpwatchConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("PORT", format!("'{}' is not a port", port)))?;
        }
        if let Some(strategy) = lookup("PUMPWATCH_STRATEGY") {
            self.detection.strategy = strategy
                .parse()
                .map_err(|e: String| ConfigError::invalid("PUMPWATCH_STRATEGY", e))?;
        }
        if let Some(path) = lookup("PUMPWATCH_SNAPSHOT") {
            self.feed.snapshot_path = Some(PathBuf::from(path));
        }
        if let Some(secs) = lookup("PUMPWATCH_REFRESH_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ConfigError::invalid("PUMPWATCH_REFRESH_SECS", format!("'{}' is not a number", secs))
            })?;
            self.feed.refresh_interval_secs = (secs > 0).then_some(secs);
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detection.alert_capacity == 0 {
            return Err(ConfigError::invalid(
                "detection.alert_capacity",
                "must be at least 1",
            ));
        }
        self.detection
            .thresholds
            .validate()
            .map_err(|reason| ConfigError::invalid("detection.thresholds", reason))?;
        if self.feed.fetch_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "feed.fetch_timeout_secs",
                "must be at least 1",
            ));
        }
        if let Some((symbol, _)) = self
            .baselines
            .iter()
            .find(|(_, volume)| !volume.is_finite())
        {
            return Err(ConfigError::invalid(
                "baselines",
                format!("average volume for {} is not a number", symbol),
            ));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Strategy selection, its thresholds and the ledger bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    #[serde(default)]
    pub strategy: ClassifierKind,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default = "default_alert_capacity")]
    pub alert_capacity: usize,
}

fn default_alert_capacity() -> usize {
    DEFAULT_ALERT_CAPACITY
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            strategy: ClassifierKind::default(),
            thresholds: Thresholds::default(),
            alert_capacity: default_alert_capacity(),
        }
    }
}

/// Where raw records come from and how often to re-read them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Local snapshot file seeding the analysis set
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
    /// Periodic refresh; disabled when absent
    #[serde(default)]
    pub refresh_interval_secs: Option<u64>,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            refresh_interval_secs: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let config = PumpwatchConfig::from_json("{}").unwrap();
        assert_eq!(config, PumpwatchConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.detection.strategy, ClassifierKind::Tiered);
        assert_eq!(config.detection.alert_capacity, 50);
        assert_eq!(config.feed.fetch_timeout_secs, 10);
        assert_eq!(config.feed.max_retries, 3);
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "server": {"host": "127.0.0.1", "port": 9100},
            "detection": {"strategy": "weighted", "alert_capacity": 10},
            "feed": {"snapshot_path": "data/stocks.json", "refresh_interval_secs": 60},
            "baselines": {"NABIL": 12000.0, "NICA": 8000}
        }"#;
        let config = PumpwatchConfig::from_json(json).unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:9100");
        assert_eq!(config.detection.strategy, ClassifierKind::Weighted);
        assert_eq!(config.detection.alert_capacity, 10);
        assert_eq!(
            config.feed.snapshot_path,
            Some(PathBuf::from("data/stocks.json"))
        );
        assert_eq!(config.feed.refresh_interval_secs, Some(60));
        assert_eq!(config.baselines.get("NICA"), Some(&8000.0));
    }

    #[test]
    fn test_rejects_zero_capacity_and_timeout() {
        let err = PumpwatchConfig::from_json(r#"{"detection": {"alert_capacity": 0}}"#);
        assert!(matches!(err, Err(ConfigError::Invalid { .. })));

        let err = PumpwatchConfig::from_json(r#"{"feed": {"fetch_timeout_secs": 0}}"#);
        assert!(matches!(err, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_thresholds_section() {
        let json = r#"{
            "detection": {
                "strategy": "weighted",
                "thresholds": {"weighted": {"high_score": 80, "high_volume": 200000}}
            }
        }"#;
        let config = PumpwatchConfig::from_json(json).unwrap();
        let weighted = config.detection.thresholds.weighted;

        assert_eq!(weighted.high_score, 80);
        assert_eq!(weighted.high_volume, 200_000);
        assert_eq!(weighted.medium_score, 40);
        assert_eq!(config.detection.thresholds.tiered.major_spike, 3.0);
    }

    #[test]
    fn test_rejects_inconsistent_thresholds() {
        let json = r#"{"detection": {"thresholds": {"weighted": {"medium_score": 80, "high_score": 70}}}}"#;
        let err = PumpwatchConfig::from_json(json);
        assert!(
            matches!(err, Err(ConfigError::Invalid { ref field, .. }) if field == "detection.thresholds")
        );
    }

    #[test]
    fn test_unknown_strategy_is_parse_error() {
        let err = PumpwatchConfig::from_json(r#"{"detection": {"strategy": "ml"}}"#);
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let config = PumpwatchConfig::default()
            .with_overrides(env(&[
                ("HOST", "127.0.0.1"),
                ("PORT", "9000"),
                ("PUMPWATCH_STRATEGY", "WEIGHTED"),
                ("PUMPWATCH_SNAPSHOT", "/tmp/stocks.json"),
                ("PUMPWATCH_REFRESH_SECS", "30"),
            ]))
            .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.detection.strategy, ClassifierKind::Weighted);
        assert_eq!(
            config.feed.snapshot_path,
            Some(PathBuf::from("/tmp/stocks.json"))
        );
        assert_eq!(config.feed.refresh_interval_secs, Some(30));
    }

    #[test]
    fn test_zero_refresh_disables_interval() {
        let mut config = PumpwatchConfig::default();
        config.feed.refresh_interval_secs = Some(60);
        let config = config
            .with_overrides(env(&[("PUMPWATCH_REFRESH_SECS", "0")]))
            .unwrap();
        assert_eq!(config.feed.refresh_interval_secs, None);
    }

    #[test]
    fn test_bad_env_values() {
        let err = PumpwatchConfig::default().with_overrides(env(&[("PORT", "http")]));
        assert!(matches!(err, Err(ConfigError::Invalid { ref field, .. }) if field == "PORT"));

        let err = PumpwatchConfig::default().with_overrides(env(&[("PUMPWATCH_STRATEGY", "x")]));
        assert!(err.is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = PumpwatchConfig::from_file("/nonexistent/pumpwatch.json");
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }
}
