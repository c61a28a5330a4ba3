use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discrete risk tier
///
/// Ordered so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Medium and High both flag a symbol as suspicious
    pub fn is_suspicious(&self) -> bool {
        matches!(self, RiskLevel::Medium | RiskLevel::High)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(RiskLevel::Low),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "HIGH" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level: {}", other)),
        }
    }
}

/// Trading pattern label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pattern {
    /// Volume spike together with a sharp rise
    Pump,
    /// Volume spike together with a sharp fall
    Dump,
    /// Something stands out, but not a clear pump or dump
    Unusual,
    Normal,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Pump => "PUMP",
            Pattern::Dump => "DUMP",
            Pattern::Unusual => "UNUSUAL",
            Pattern::Normal => "NORMAL",
        }
    }

    /// Human-readable label shown on dashboards
    pub fn label(&self) -> &'static str {
        match self {
            Pattern::Pump => "Potential PUMP",
            Pattern::Dump => "Potential DUMP",
            Pattern::Unusual => "Unusual Activity",
            Pattern::Normal => "Normal Trading",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
