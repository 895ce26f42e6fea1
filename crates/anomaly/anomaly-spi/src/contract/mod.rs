//! Contract definitions for anomaly detection.
//!
//! This module contains trait definitions that providers must implement.

mod anomaly_detector;
mod series_forecaster;
mod threshold_estimator;

pub use anomaly_detector::AnomalyDetector;
pub use series_forecaster::SeriesForecaster;
pub use threshold_estimator::ThresholdEstimator;
