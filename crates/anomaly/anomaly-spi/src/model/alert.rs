//! Alert types for anomaly detection.

use serde::{Deserialize, Serialize};

/// Alert severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

/// An alert raised for an actionable anomaly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Position of the anomalous point in the primary series.
    pub index: usize,
    pub value: f64,
    pub score: f64,
    pub severity: AlertSeverity,
    pub message: String,
}
