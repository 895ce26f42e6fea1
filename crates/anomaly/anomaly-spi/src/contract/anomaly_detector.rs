//! Anomaly detector trait definition.

use crate::error::Result;
use crate::model::{DetectionResult, ThresholdContext};

/// Anomaly detector trait.
///
/// Implementations judge every point of a series against a cutoff derived
/// from that same series.
pub trait AnomalyDetector: Send + Sync {
    /// Score and flag every point of `series`.
    fn evaluate(&self, series: &[f64], context: ThresholdContext) -> Result<DetectionResult>;

    /// Ascending indices of the anomalous points of `series`.
    fn detect(&self, series: &[f64], context: ThresholdContext) -> Result<Vec<usize>> {
        Ok(self.evaluate(series, context)?.anomaly_indices())
    }
}
