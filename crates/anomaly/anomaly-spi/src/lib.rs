//! Anomaly Detection Service Provider Interface
//!
//! Defines the data model, error taxonomy and contracts shared by every
//! anomaly detection component.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{AnomalyDetector, SeriesForecaster, ThresholdEstimator};
pub use error::{AnomalyError, ErrorCategory, Result};
pub use model::{
    Alert, AlertSeverity, AnalysisResult, ArimaOrder, CorrelationMatrix, DetectionResult, Metric,
    MetricCorrelation, ThresholdContext, Tier,
};
