//! Raw record feeds
//!
//! A feed yields the raw per-symbol records for one refresh cycle. Record
//! contents are not validated here; the normalizer tolerates anything.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Feed errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("Failed to read feed '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse feed: {0}")]
    Parse(String),

    #[error("Unexpected feed shape: {0}")]
    Shape(String),

    #[error("Feed fetch timed out after {0}s")]
    Timeout(u64),
}

/// Source of raw records
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<Value>, FeedError>;
}

/// Pull the record list out of a feed document
///
/// Accepts a bare array or the NEPSE envelope `{"result": {"stocks": [...]}}`.
pub fn extract_records(document: Value) -> Result<Vec<Value>, FeedError> {
    match document {
        Value::Array(records) => Ok(records),
        Value::Object(mut obj) => match obj.remove("result") {
            Some(Value::Object(mut result)) => match result.remove("stocks") {
                Some(Value::Array(records)) => Ok(records),
                Some(_) => Err(FeedError::Shape("result.stocks is not an array".into())),
                None => Err(FeedError::Shape("result has no stocks".into())),
            },
            _ => Err(FeedError::Shape("expected an array or a result envelope".into())),
        },
        _ => Err(FeedError::Shape("expected an array or a result envelope".into())),
    }
}

/// Snapshot file on local disk, re-read on every fetch
#[derive(Debug, Clone)]
pub struct SnapshotFileFeed {
    path: PathBuf,
    name: String,
}

impl SnapshotFileFeed {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FeedSource for SnapshotFileFeed {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<Value>, FeedError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FeedError::Io {
                path: self.path.display().to_string(),
                error: e.to_string(),
            })?;

        let document: Value =
            serde_json::from_str(&content).map_err(|e| FeedError::Parse(e.to_string()))?;
        extract_records(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let records = extract_records(json!([{"symbol": "A"}, {"symbol": "B"}])).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_nepse_envelope() {
        let doc = json!({"result": {"stocks": [{"stockSymbol": "NABIL"}], "date": "2024-03-01"}});
        let records = extract_records(doc).unwrap();
        assert_eq!(records, vec![json!({"stockSymbol": "NABIL"})]);
    }

    #[test]
    fn test_bad_shapes() {
        assert!(matches!(extract_records(json!({"stocks": []})), Err(FeedError::Shape(_))));
        assert!(matches!(
            extract_records(json!({"result": {"stocks": {}}})),
            Err(FeedError::Shape(_))
        ));
        assert!(matches!(extract_records(json!(3)), Err(FeedError::Shape(_))));
    }

    #[tokio::test]
    async fn test_file_feed_reads_envelope() {
        let path = std::env::temp_dir().join(format!("pumpwatch-feed-{}.json", std::process::id()));
        tokio::fs::write(&path, r#"{"result": {"stocks": [{"stockSymbol": "NICA", "volume": 10}]}}"#)
            .await
            .unwrap();

        let feed = SnapshotFileFeed::new(&path);
        let records = feed.fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(feed.name().starts_with("file:"));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file() {
        let feed = SnapshotFileFeed::new("/nonexistent/stocks.json");
        assert!(matches!(feed.fetch().await, Err(FeedError::Io { .. })));
    }
}
