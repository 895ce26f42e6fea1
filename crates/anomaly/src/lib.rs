//! # anomaly
//!
//! Correlated anomaly detection for numeric time series.
//! Provides dynamic thresholds, cross-metric correlation, redundancy
//! filtering, ARIMA forecasting and severity tiers of named metrics.

pub use anomaly_facade::*;
