//! Anomaly Detection Core
//!
//! Implementations for thresholding, correlation analysis, redundancy
//! filtering, ARIMA forecasting, metric tiering and the end-to-end pipeline.

mod stats;

pub mod alerting;
pub mod correlation;
pub mod detector;
pub mod filter;
pub mod forecaster;
pub mod hierarchy;
pub mod pipeline;
pub mod threshold;

pub use alerting::{alerts_for, create_alert, AlertBuilder};
pub use correlation::{correlation_matrix, lagged_correlation, pearson, spearman, CorrelationAnalyzer};
pub use detector::ThresholdDetector;
pub use filter::CorrelationFilter;
pub use forecaster::{Arima, Forecaster};
pub use hierarchy::MetricHierarchy;
pub use pipeline::AnomalyPipeline;
pub use threshold::{estimate_threshold, DynamicThreshold};
