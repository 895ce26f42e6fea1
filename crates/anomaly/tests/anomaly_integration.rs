//! Integration tests for the anomaly crate

use anomaly::{
    correlation_matrix, estimate_threshold, AnomalyDetector, AnomalyError, ArimaOrder,
    CorrelationAnalyzer, CorrelationFilter, CorrelationMatrix, DynamicThreshold, ErrorCategory,
    Forecaster, MetricHierarchy, PipelineConfig, SeriesForecaster, ThresholdConfig,
    ThresholdContext, ThresholdDetector, ThresholdEstimator, Tier,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn gaussian(n: usize, mean: f64, sigma: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(mean, sigma).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

fn population_stats(data: &[f64]) -> (f64, f64) {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let var = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

#[test]
fn test_threshold_matches_population_formula() {
    for seed in 0..5 {
        let sample = gaussian(64, 20.0, 4.0, seed);
        let (mean, std) = population_stats(&sample);
        let estimator = DynamicThreshold::new();

        let normal = estimator.estimate(&sample, ThresholdContext::Normal).unwrap();
        let heightened = estimator.estimate(&sample, ThresholdContext::Heightened).unwrap();
        assert!((normal - (mean + 2.0 * std)).abs() < 1e-9);
        assert!((heightened - (mean + 3.0 * std)).abs() < 1e-9);
    }
}

#[test]
fn test_unknown_context_label_means_heightened() {
    let sample = [1.0, 2.0, 3.0, 4.0];
    let context: ThresholdContext = "high_alert".parse().unwrap();
    let config = ThresholdConfig::new(context);
    let heightened = estimate_threshold(&sample, &config).unwrap();
    let expected = DynamicThreshold::new()
        .estimate(&sample, ThresholdContext::Heightened)
        .unwrap();
    assert_eq!(heightened, expected);
}

#[test]
fn test_estimator_behind_trait_object() {
    let estimator: Box<dyn ThresholdEstimator> = Box::new(DynamicThreshold::new());
    assert!(matches!(
        estimator.estimate(&[], ThresholdContext::Normal),
        Err(AnomalyError::InvalidInput(_))
    ));
}

#[test]
fn test_detect_returns_exactly_points_above_threshold() {
    let mut series = gaussian(300, 100.0, 10.0, 42);
    series[17] = 180.0;
    series[230] = 175.0;

    let detector = ThresholdDetector::new();
    let result = detector.evaluate(&series, ThresholdContext::Normal).unwrap();
    let indices = detector.detect(&series, ThresholdContext::Normal).unwrap();

    let expected: Vec<usize> = (0..series.len())
        .filter(|&i| series[i] > result.threshold)
        .collect();
    assert_eq!(indices, expected);
    assert!(indices.contains(&17));
    assert!(indices.contains(&230));
    assert!(indices.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_detector_behind_trait_object() {
    let detector: Box<dyn AnomalyDetector> = Box::new(ThresholdDetector::new());
    let flat = vec![7.0; 25];
    assert!(detector.detect(&flat, ThresholdContext::Normal).unwrap().is_empty());
}

#[test]
fn test_five_point_scenario() {
    let sample = [1.0, 2.0, 100.0, 4.0, 5.0];
    let threshold = DynamicThreshold::new()
        .estimate(&sample, ThresholdContext::Normal)
        .unwrap();
    // One outlier among five points sits just below mean + 2 std.
    assert!((threshold - 100.0515).abs() < 1e-3);
    let anomalies = ThresholdDetector::new()
        .detect(&sample, ThresholdContext::Normal)
        .unwrap();
    assert!(anomalies.is_empty());
}

#[test]
fn test_identical_constant_series_correlate_perfectly() {
    let a = vec![1.0; 100];
    let b = vec![1.0; 100];
    let analyzer = CorrelationAnalyzer::new(&a, &b);
    assert!((analyzer.pearson().unwrap() - 1.0).abs() < 1e-12);

    let matrix = correlation_matrix(&[a.as_slice(), b.as_slice()]).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert!((matrix.get(i, j) - 1.0).abs() < 1e-12);
        }
    }
}

#[test]
fn test_pearson_and_spearman_agree_in_sign() {
    let x = gaussian(120, 0.0, 1.0, 7);
    let noise = gaussian(120, 0.0, 0.3, 8);
    let y: Vec<f64> = x.iter().zip(&noise).map(|(a, n)| -1.5 * a + n).collect();

    let analyzer = CorrelationAnalyzer::new(&x, &y);
    let pearson = analyzer.pearson().unwrap();
    let spearman = analyzer.spearman().unwrap();
    assert!(pearson < -0.9);
    assert!(spearman < -0.85);
    assert!((-1.0..=1.0).contains(&pearson));
    assert!((-1.0..=1.0).contains(&spearman));
}

#[test]
fn test_correlation_rejects_mismatched_lengths() {
    let a = gaussian(10, 0.0, 1.0, 1);
    let b = gaussian(11, 0.0, 1.0, 2);
    let analyzer = CorrelationAnalyzer::new(&a, &b);
    assert_eq!(analyzer.pearson().unwrap_err().category(), ErrorCategory::InvalidInput);
    assert_eq!(analyzer.spearman().unwrap_err().category(), ErrorCategory::InvalidInput);
}

#[test]
fn test_lagged_delayed_copy_correlates_fully() {
    let leading = gaussian(200, 0.0, 1.0, 21);
    let filler = gaussian(200, 0.0, 1.0, 22);
    for lag in [1, 3, 12] {
        // trailing[t] = leading[t - lag] for t >= lag
        let trailing: Vec<f64> = (0..leading.len())
            .map(|t| if t >= lag { leading[t - lag] } else { filler[t] })
            .collect();

        let forward = CorrelationAnalyzer::new(&trailing, &leading).lagged(lag).unwrap();
        assert!((forward - 1.0).abs() < 1e-9, "lag {}: {}", lag, forward);

        let inverted = CorrelationAnalyzer::new(&leading, &trailing).lagged(lag).unwrap();
        assert!(inverted < 0.5, "lag {}: {}", lag, inverted);
    }
}

#[test]
fn test_lagged_rejects_degenerate_lags() {
    let a = gaussian(20, 0.0, 1.0, 3);
    let b = gaussian(20, 0.0, 1.0, 4);
    let analyzer = CorrelationAnalyzer::new(&a, &b);

    assert_eq!(analyzer.lagged(0).unwrap_err().category(), ErrorCategory::InvalidInput);
    assert!(matches!(analyzer.lagged(20), Err(AnomalyError::InvalidInput(_))));
    assert!(matches!(analyzer.lagged(50), Err(AnomalyError::InvalidInput(_))));
}

#[test]
fn test_lagged_profile_peaks_at_true_lag() {
    let leading = gaussian(300, 0.0, 1.0, 31);
    let noise = gaussian(300, 0.0, 0.1, 32);
    let trailing: Vec<f64> = (0..300)
        .map(|t| if t >= 5 { leading[t - 5] + noise[t] } else { noise[t] })
        .collect();

    let profile = CorrelationAnalyzer::new(&trailing, &leading)
        .lagged_profile(8)
        .unwrap();
    assert_eq!(profile.len(), 8);
    let (best, _) = profile
        .iter()
        .copied()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap();
    assert_eq!(best, 5);
}

#[test]
fn test_filter_keeps_larger_member_of_correlated_pair() {
    let values = [1.0, 2.0, 100.0, 4.0, 5.0];
    let matrix = CorrelationMatrix::from_rows(vec![
        vec![1.0, 0.2, 0.95, 0.1, 0.0],
        vec![0.2, 1.0, 0.1, 0.1, 0.0],
        vec![0.95, 0.1, 1.0, 0.1, 0.0],
        vec![0.1, 0.1, 0.1, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 1.0],
    ])
    .unwrap();

    let filtered = CorrelationFilter::new(0.7)
        .unwrap()
        .filter(&values, &matrix)
        .unwrap();
    assert_eq!(filtered.into_iter().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn test_filter_over_computed_matrix() {
    let base = gaussian(50, 10.0, 2.0, 51);
    let scaled: Vec<f64> = base.iter().map(|x| 3.0 * x + 1.0).collect();
    let other = gaussian(50, 10.0, 2.0, 52);
    let matrix = correlation_matrix(&[base.as_slice(), scaled.as_slice(), other.as_slice()]).unwrap();

    let filtered = CorrelationFilter::default()
        .filter(&[5.0, 9.0, 1.0], &matrix)
        .unwrap();
    assert_eq!(filtered.into_iter().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn test_filter_degenerate_matrices_return_empty() {
    let filter = CorrelationFilter::default();
    assert!(filter.filter(&[1.0], &CorrelationMatrix::identity(1)).unwrap().is_empty());
    assert!(filter.filter(&[], &CorrelationMatrix::identity(0)).unwrap().is_empty());
}

#[test]
fn test_reclassify_round_trip_every_tier() {
    for from in ["critical", "warning", "info"] {
        for to in ["critical", "warning", "info"] {
            let mut hierarchy = MetricHierarchy::new();
            hierarchy.add_labeled("latency_p99", from, vec![1.0, 2.0]).unwrap();
            hierarchy.add("other", Tier::Warning, vec![3.0]);
            assert!(hierarchy.reclassify_labeled("latency_p99", to).unwrap());

            let target: Tier = to.parse().unwrap();
            for tier in Tier::ALL {
                let present = hierarchy.names(tier).contains(&"latency_p99");
                assert_eq!(present, tier == target, "{} -> {}", from, to);
            }
            assert_eq!(hierarchy.len(), 2);
        }
    }
}

#[test]
fn test_unknown_tier_is_invalid_input() {
    let mut hierarchy = MetricHierarchy::new();
    let err = hierarchy.add_labeled("cpu", "Critical", vec![1.0]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidInput);
}

#[test]
fn test_forecaster_state_machine() {
    let mut forecaster: Box<dyn SeriesForecaster> = Box::new(Forecaster::default());
    assert!(!forecaster.is_fitted());
    assert_eq!(forecaster.forecast(1).unwrap_err().category(), ErrorCategory::State);

    let short = [1.0, 2.0];
    assert_eq!(forecaster.fit(&short).unwrap_err().category(), ErrorCategory::Model);
    assert!(!forecaster.is_fitted());

    let trend: Vec<f64> = (0..40).map(|i| 5.0 + 0.5 * i as f64).collect();
    forecaster.fit(&trend).unwrap();
    assert!(forecaster.is_fitted());
    let forecast = forecaster.forecast(2).unwrap();
    assert!((forecast[0] - 25.0).abs() < 1e-9);
    assert!((forecast[1] - 25.5).abs() < 1e-9);
}

#[test]
fn test_forecaster_rejects_unsupported_order() {
    let err = Forecaster::new(ArimaOrder::new(1, 3, 0)).unwrap_err();
    assert!(matches!(err, AnomalyError::InvalidParameter { .. }));
}

#[test]
fn test_config_json_round_trip() {
    let config = PipelineConfig::builder()
        .context(ThresholdContext::Heightened)
        .correlation_threshold(0.9)
        .order((2, 1, 0))
        .forecast_steps(5)
        .build()
        .unwrap();

    let json = config.to_json().unwrap();
    assert_eq!(PipelineConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_config_json_partial_and_invalid() {
    let config = PipelineConfig::from_json(r#"{"forecast": {"steps": 3}}"#).unwrap();
    assert_eq!(config.forecast.steps, 3);
    assert_eq!(config.forecast.order, ArimaOrder::new(1, 1, 1));
    assert_eq!(config.filter.correlation_threshold, 0.8);

    assert!(PipelineConfig::from_json(r#"{"filters": {}}"#).is_err());
    assert!(PipelineConfig::from_json(r#"{"filter": {"correlation_threshold": 1.5}}"#).is_err());
}
