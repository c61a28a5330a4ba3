mod alert;
mod analysis;
mod risk;
mod snapshot;
mod spike;

pub use alert::{Alert, NewAlert};
pub use analysis::{AnalysisRecord, Classification, RiskStats};
pub use risk::{Pattern, RiskLevel};
pub use snapshot::MetricSnapshot;
pub use spike::{BaselineKind, VolumeSpike};
