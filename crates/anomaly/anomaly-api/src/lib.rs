//! Anomaly Detection API
//!
//! Configuration types and builders for anomaly detection.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{
    Alert, AlertSeverity, AnalysisResult, AnomalyError, ArimaOrder, CorrelationMatrix,
    DetectionResult, ErrorCategory, Metric, MetricCorrelation, Result, ThresholdContext, Tier,
};

/// Default correlation cutoff above which two series count as redundant.
pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 0.8;

// ============================================================================
// Threshold Configuration
// ============================================================================

/// Threshold detector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ThresholdConfig {
    /// Sensitivity policy (default: normal).
    pub context: ThresholdContext,
}

impl ThresholdConfig {
    pub fn new(context: ThresholdContext) -> Self {
        Self { context }
    }
}

// ============================================================================
// Filter Configuration
// ============================================================================

/// Correlation filter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FilterConfig {
    /// Pairs at or above this coefficient are redundant (default: 0.8).
    pub correlation_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            correlation_threshold: DEFAULT_CORRELATION_THRESHOLD,
        }
    }
}

impl FilterConfig {
    pub fn new(correlation_threshold: f64) -> Self {
        Self {
            correlation_threshold,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(-1.0..=1.0).contains(&self.correlation_threshold) {
            return Err(AnomalyError::invalid_parameter(
                "correlation_threshold",
                format!("must be in [-1, 1], got {}", self.correlation_threshold),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Forecast Configuration
// ============================================================================

/// Forecaster configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ForecastConfig {
    /// ARIMA order (default: (1, 1, 1)).
    pub order: ArimaOrder,
    /// Number of steps to forecast (default: 1).
    pub steps: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            order: ArimaOrder::default(),
            steps: 1,
        }
    }
}

impl ForecastConfig {
    pub fn new(order: ArimaOrder, steps: usize) -> Self {
        Self { order, steps }
    }

    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(AnomalyError::invalid_parameter(
                "steps",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Pipeline Configuration
// ============================================================================

/// End-to-end pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PipelineConfig {
    pub threshold: ThresholdConfig,
    pub filter: FilterConfig,
    pub forecast: ForecastConfig,
}

impl PipelineConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Check every section for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        self.filter.validate()?;
        self.forecast.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnomalyError::invalid_input(format!("invalid pipeline config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AnomalyError::invalid_input(format!("cannot serialize config: {}", e)))
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Set the threshold context.
    pub fn context(mut self, context: ThresholdContext) -> Self {
        self.config.threshold.context = context;
        self
    }

    /// Set the correlation filter cutoff.
    pub fn correlation_threshold(mut self, threshold: f64) -> Self {
        self.config.filter.correlation_threshold = threshold;
        self
    }

    /// Set the ARIMA order.
    pub fn order(mut self, order: impl Into<ArimaOrder>) -> Self {
        self.config.forecast.order = order.into();
        self
    }

    /// Set the forecast horizon.
    pub fn forecast_steps(mut self, steps: usize) -> Self {
        self.config.forecast.steps = steps;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<PipelineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
