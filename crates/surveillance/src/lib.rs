//! Pumpwatch Surveillance
//!
//! Stateful side of the engine:
//!
//! - **Analysis Store**: latest classified record per symbol, replaced
//!   wholesale on every refresh
//! - **Alert Ledger**: bounded log of operator alerts
//! - **Queries**: filtering and ranking for dashboards
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   SurveillanceEngine                     │
//! │                                                          │
//! │  raw feed ──► DetectionPipeline ──► AnalysisStore        │
//! │                                       (ArcSwap)          │
//! │                                                          │
//! │  operator ──────────────────────► AlertLedger            │
//! │                                       (Mutex)            │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod alert_ledger;
pub mod analysis_store;
pub mod engine;
pub mod query;

pub use alert_ledger::{AlertLedger, DEFAULT_ALERT_CAPACITY};
pub use analysis_store::{AnalysisSet, AnalysisStore};
pub use engine::{RefreshSummary, SurveillanceEngine};
pub use query::{AnalysisQuery, SortKey};
