//! Data models for anomaly detection.
//!
//! This module contains data structures used throughout the anomaly detection system.

mod alert;
mod analysis_result;
mod arima_order;
mod correlation_matrix;
mod detection_result;
mod metric;
mod threshold_context;

pub use alert::{Alert, AlertSeverity};
pub use analysis_result::{AnalysisResult, MetricCorrelation};
pub use arima_order::ArimaOrder;
pub use correlation_matrix::CorrelationMatrix;
pub use detection_result::DetectionResult;
pub use metric::{Metric, Tier};
pub use threshold_context::ThresholdContext;
