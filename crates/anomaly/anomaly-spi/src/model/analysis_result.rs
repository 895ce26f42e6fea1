//! Output record of a full pipeline run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{AnomalyError, Result};

/// Pearson coefficient between a critical and a warning metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCorrelation {
    pub critical: String,
    pub warning: String,
    pub coefficient: f64,
}

impl MetricCorrelation {
    pub fn new(critical: impl Into<String>, warning: impl Into<String>, coefficient: f64) -> Self {
        Self {
            critical: critical.into(),
            warning: warning.into(),
            coefficient,
        }
    }
}

/// Combined output of one anomaly pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Forecast values, one per requested step.
    pub prediction: Vec<f64>,
    /// Correlation of every (critical, warning) metric pair, in hierarchy order.
    pub correlation_analysis: Vec<MetricCorrelation>,
    /// Indices marked redundant by the correlation filter.
    pub filtered_anomalies: BTreeSet<usize>,
    /// Indices above the detection threshold, ascending.
    pub anomalies: Vec<usize>,
    /// Threshold the anomalies were judged against.
    pub threshold: f64,
}

impl AnalysisResult {
    /// Detected anomalies that the filter did not mark redundant.
    pub fn actionable_anomalies(&self) -> Vec<usize> {
        self.anomalies
            .iter()
            .copied()
            .filter(|i| !self.filtered_anomalies.contains(i))
            .collect()
    }

    /// Serialize the record as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| AnomalyError::invalid_input(format!("cannot serialize result: {}", e)))
    }
}
