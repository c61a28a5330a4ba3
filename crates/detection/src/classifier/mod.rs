//! Classification strategies
//!
//! Both strategies implement [`Classifier`]; which one runs is a
//! configuration choice, never inferred from the data.

mod tiered;
mod weighted;

pub use tiered::{TieredClassifier, TieredConfig};
pub use weighted::{NO_SIGNAL, WeightedClassifier, WeightedConfig};

use pumpwatch_ports::Classifier;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Selectable classification strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    #[default]
    Tiered,
    Weighted,
}

impl ClassifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierKind::Tiered => TieredClassifier::NAME,
            ClassifierKind::Weighted => WeightedClassifier::NAME,
        }
    }

    /// Build the strategy with default thresholds
    pub fn build(&self) -> Arc<dyn Classifier> {
        self.build_with(&Thresholds::default())
    }

    /// Build the strategy with the matching section of `thresholds`
    pub fn build_with(&self, thresholds: &Thresholds) -> Arc<dyn Classifier> {
        match self {
            ClassifierKind::Tiered => Arc::new(TieredClassifier::new(thresholds.tiered)),
            ClassifierKind::Weighted => Arc::new(WeightedClassifier::new(thresholds.weighted)),
        }
    }
}

/// Tunable thresholds for both strategies; only the selected one is used
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default)]
    pub tiered: TieredConfig,
    #[serde(default)]
    pub weighted: WeightedConfig,
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), String> {
        self.tiered.validate()?;
        self.weighted.validate()
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tiered" => Ok(ClassifierKind::Tiered),
            "weighted" => Ok(ClassifierKind::Weighted),
            other => Err(format!("unknown strategy: {}", other)),
        }
    }
}
