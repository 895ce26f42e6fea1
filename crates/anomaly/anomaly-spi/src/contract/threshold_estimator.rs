//! Threshold estimator trait definition.

use crate::error::Result;
use crate::model::ThresholdContext;

/// Computes an anomaly cutoff from a historical sample.
pub trait ThresholdEstimator: Send + Sync {
    /// Estimate the cutoff for `sample` under `context`.
    ///
    /// Fails with `InvalidInput` when `sample` is empty.
    fn estimate(&self, sample: &[f64], context: ThresholdContext) -> Result<f64>;
}
