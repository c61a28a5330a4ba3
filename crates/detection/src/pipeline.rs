use crate::baseline::NoBaseline;
use crate::classifier::ClassifierKind;
use crate::normalizer::normalize_all;
use crate::spike::SpikeEstimator;
use log::debug;
use pumpwatch_core::{AnalysisRecord, MetricSnapshot, Timestamp};
use pumpwatch_ports::{BaselineSource, Classifier};
use serde_json::Value;
use std::sync::Arc;

/// Normalize, estimate and classify in one pass
///
/// Holds no per-cycle state; the same pipeline can analyze any number of
/// batches concurrently.
#[derive(Clone)]
pub struct DetectionPipeline {
    estimator: SpikeEstimator,
    classifier: Arc<dyn Classifier>,
    baselines: Arc<dyn BaselineSource>,
}

impl DetectionPipeline {
    pub fn new(classifier: Arc<dyn Classifier>, baselines: Arc<dyn BaselineSource>) -> Self {
        Self {
            estimator: SpikeEstimator::new(),
            classifier,
            baselines,
        }
    }

    /// Pipeline for a strategy with default thresholds and no baselines
    pub fn with_kind(kind: ClassifierKind) -> Self {
        Self::new(kind.build(), Arc::new(NoBaseline))
    }

    /// Name of the active strategy
    pub fn strategy(&self) -> &'static str {
        self.classifier.name()
    }

    pub fn analyze_snapshot(&self, snapshot: &MetricSnapshot, at: Timestamp) -> AnalysisRecord {
        let baseline = self.baselines.baseline_volume(&snapshot.symbol);
        let spike = self.estimator.estimate(snapshot, baseline);
        let classification = self.classifier.classify(snapshot, &spike);

        AnalysisRecord::new(snapshot, spike, classification, self.strategy(), at)
    }

    /// One record per raw input, in input order, all stamped with `at`
    pub fn analyze(&self, raw: &[Value], at: Timestamp) -> Vec<AnalysisRecord> {
        let records: Vec<_> = normalize_all(raw)
            .iter()
            .map(|snapshot| self.analyze_snapshot(snapshot, at))
            .collect();

        debug!(
            "analyzed {} records with {} strategy",
            records.len(),
            self.strategy()
        );
        records
    }
}

impl std::fmt::Debug for DetectionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionPipeline")
            .field("strategy", &self.strategy())
            .finish()
    }
}
