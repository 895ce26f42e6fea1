//! Anomaly Detection Facade
//!
//! Unified re-exports for the anomaly detection module.
//!
//! This facade provides a single entry point to all functionality:
//! - Contracts (`ThresholdEstimator`, `AnomalyDetector`, `SeriesForecaster`),
//!   result types and `AnomalyError` from SPI
//! - Configuration types from API
//! - Thresholding, correlation, filtering, forecasting, metric tiering,
//!   alerting and `AnomalyPipeline` from Core

// Re-export everything from SPI
pub use anomaly_spi::*;

// Re-export everything from API
pub use anomaly_api::*;

// Re-export everything from Core
pub use anomaly_core::*;
