//! Threshold-based anomaly detector.

use anomaly_api::ThresholdConfig;
use anomaly_spi::{
    AnomalyDetector, DetectionResult, Result, ThresholdContext, ThresholdEstimator,
};

use crate::stats;
use crate::threshold::DynamicThreshold;

/// Flags points strictly above a threshold estimated from the same series.
///
/// The series under test doubles as the historical sample. Callers that
/// want holdout behaviour split the series before calling.
#[derive(Debug, Clone, Default)]
pub struct ThresholdDetector<E = DynamicThreshold> {
    estimator: E,
}

impl ThresholdDetector<DynamicThreshold> {
    /// Create a detector backed by [`DynamicThreshold`].
    pub fn new() -> Self {
        Self {
            estimator: DynamicThreshold,
        }
    }
}

impl<E: ThresholdEstimator> ThresholdDetector<E> {
    /// Create a detector backed by a custom estimator.
    pub fn with_estimator(estimator: E) -> Self {
        Self { estimator }
    }

    /// Detect with the context taken from a [`ThresholdConfig`].
    pub fn detect_with_config(&self, series: &[f64], config: &ThresholdConfig) -> Result<Vec<usize>> {
        self.detect(series, config.context)
    }
}

impl<E: ThresholdEstimator> AnomalyDetector for ThresholdDetector<E> {
    fn evaluate(&self, series: &[f64], context: ThresholdContext) -> Result<DetectionResult> {
        let threshold = self.estimator.estimate(series, context)?;
        let mean = stats::mean(series);
        let std_dev = stats::population_std(series);

        let is_anomaly = series.iter().map(|&x| x > threshold).collect();
        let scores = if std_dev == 0.0 {
            vec![0.0; series.len()]
        } else {
            series.iter().map(|&x| (x - mean) / std_dev).collect()
        };

        Ok(DetectionResult::new(is_anomaly, scores, threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anomaly_spi::AnomalyError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    #[test]
    fn test_detects_injected_spikes() {
        let mut rng = StdRng::seed_from_u64(42);
        let dist = Normal::new(50.0, 5.0).unwrap();
        let mut data: Vec<f64> = (0..95).map(|_| dist.sample(&mut rng)).collect();
        data.extend([100.0, 105.0, 110.0, 115.0, 120.0]);

        let anomalies = ThresholdDetector::new()
            .detect(&data, ThresholdContext::Normal)
            .unwrap();
        assert!(!anomalies.is_empty());
        assert!(anomalies.contains(&99));
    }

    #[test]
    fn test_indices_are_exactly_points_above_threshold() {
        let data: Vec<f64> = (0..40)
            .map(|i| if i % 13 == 0 { 90.0 } else { 10.0 + (i % 5) as f64 })
            .collect();
        let detector = ThresholdDetector::new();
        let result = detector.evaluate(&data, ThresholdContext::Normal).unwrap();
        let anomalies = result.anomaly_indices();

        for (i, &x) in data.iter().enumerate() {
            assert_eq!(anomalies.contains(&i), x > result.threshold, "index {}", i);
        }
        assert!(anomalies.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_five_point_sample_cannot_clear_two_sigma() {
        // In a sample of 5 the largest attainable z-score is 4 / sqrt(5) < 2.
        let anomalies = ThresholdDetector::new()
            .detect(&[1.0, 2.0, 100.0, 4.0, 5.0], ThresholdContext::Normal)
            .unwrap();
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_constant_series_has_no_anomalies() {
        let result = ThresholdDetector::new()
            .evaluate(&[3.0; 20], ThresholdContext::Normal)
            .unwrap();
        assert!(result.anomaly_indices().is_empty());
        assert!(result.scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_heightened_context_flags_no_more_than_normal() {
        let data: Vec<f64> = (0..60).map(|i| ((i * 37) % 17) as f64).chain([40.0, 28.0]).collect();
        let detector = ThresholdDetector::new();
        let normal = detector.detect(&data, ThresholdContext::Normal).unwrap();
        let heightened = detector.detect(&data, ThresholdContext::Heightened).unwrap();
        assert!(heightened.len() <= normal.len());
        assert!(heightened.iter().all(|i| normal.contains(i)));
    }

    #[test]
    fn test_empty_series_is_invalid_input() {
        let result = ThresholdDetector::new().detect(&[], ThresholdContext::Normal);
        assert!(matches!(result, Err(AnomalyError::InvalidInput(_))));
    }

    #[test]
    fn test_detect_with_config() {
        let mut data = vec![1.0; 30];
        data[12] = 50.0;
        let config = ThresholdConfig::default();
        let anomalies = ThresholdDetector::new()
            .detect_with_config(&data, &config)
            .unwrap();
        assert_eq!(anomalies, vec![12]);
    }
}
