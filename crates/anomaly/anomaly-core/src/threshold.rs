//! Dynamic threshold estimation.

use anomaly_api::ThresholdConfig;
use anomaly_spi::{AnomalyError, Result, ThresholdContext, ThresholdEstimator};

use crate::stats;

/// Mean plus a context-dependent multiple of the population standard deviation.
///
/// `threshold = mean + k * std`, with `k = 2` under
/// [`ThresholdContext::Normal`] and `k = 3` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicThreshold;

impl DynamicThreshold {
    pub fn new() -> Self {
        Self
    }
}

impl ThresholdEstimator for DynamicThreshold {
    fn estimate(&self, sample: &[f64], context: ThresholdContext) -> Result<f64> {
        if sample.is_empty() {
            return Err(AnomalyError::invalid_input(
                "cannot estimate a threshold from an empty sample",
            ));
        }
        Ok(stats::mean(sample) + context.multiplier() * stats::population_std(sample))
    }
}

/// Convenience wrapper taking the context from a [`ThresholdConfig`].
pub fn estimate_threshold(sample: &[f64], config: &ThresholdConfig) -> Result<f64> {
    DynamicThreshold.estimate(sample, config.context)
}
