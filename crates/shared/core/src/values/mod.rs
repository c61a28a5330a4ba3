use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Monotonic alert identifier, unique for the lifetime of the process
pub type AlertId = u64;

/// Ticker symbol
///
/// Always stored trimmed and upper-cased so that lookups are case-insensitive.
/// A blank input becomes the [`Symbol::UNKNOWN`] sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Sentinel used when a feed record carries no symbol
    pub const UNKNOWN: &'static str = "N/A";

    pub fn new(value: impl AsRef<str>) -> Self {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Self::unknown();
        }
        Symbol(trimmed.to_uppercase())
    }

    pub fn unknown() -> Self {
        Symbol(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(&needle.trim().to_uppercase())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::new(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Symbol::new(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
