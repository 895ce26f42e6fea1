//! Alerting for actionable anomalies.

use anomaly_spi::{Alert, AlertSeverity, AnalysisResult};

use crate::stats;

/// Absolute z-score above which an alert escalates to critical.
const CRITICAL_SCORE: f64 = 5.0;

/// Create a new alert for the point at `index`.
pub fn create_alert(index: usize, value: f64, score: f64) -> Alert {
    AlertBuilder::new(index, value, score).build()
}

/// One alert per actionable anomaly of `result`, scored against `series`.
///
/// `series` must be the primary series the result was computed from;
/// indices beyond its end are skipped.
pub fn alerts_for(series: &[f64], result: &AnalysisResult) -> Vec<Alert> {
    if series.is_empty() {
        return Vec::new();
    }
    let mean = stats::mean(series);
    let std_dev = stats::population_std(series);

    result
        .actionable_anomalies()
        .into_iter()
        .filter_map(|i| series.get(i).map(|&value| (i, value)))
        .map(|(i, value)| {
            let score = if std_dev == 0.0 {
                0.0
            } else {
                (value - mean) / std_dev
            };
            create_alert(i, value, score)
        })
        .collect()
}

/// Alert builder for custom alert creation.
#[derive(Debug, Clone)]
pub struct AlertBuilder {
    index: usize,
    value: f64,
    score: f64,
    severity: Option<AlertSeverity>,
    message: Option<String>,
}

impl AlertBuilder {
    /// Create a new alert builder.
    pub fn new(index: usize, value: f64, score: f64) -> Self {
        Self {
            index,
            value,
            score,
            severity: None,
            message: None,
        }
    }

    /// Set custom severity.
    pub fn severity(mut self, severity: AlertSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set custom message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Build the alert.
    pub fn build(self) -> Alert {
        let severity = self.severity.unwrap_or(if self.score.abs() > CRITICAL_SCORE {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Warning
        });

        let message = self.message.unwrap_or_else(|| {
            format!(
                "Anomaly detected at index {}: value={:.4}, score={:.4}",
                self.index, self.value, self.score
            )
        });

        Alert {
            index: self.index,
            value: self.value,
            score: self.score,
            severity,
            message,
        }
    }
}
