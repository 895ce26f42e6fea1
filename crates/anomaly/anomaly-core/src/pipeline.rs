//! End-to-end anomaly pipeline.
//!
//! One `process()` call runs, in order:
//!
//! 1. ARIMA fit on the primary series and a forecast of `forecast.steps`
//! 2. Pearson correlation of every (critical, warning) metric pair
//! 3. Correlation matrix over the critical metrics and the redundancy
//!    filter against the primary series
//! 4. Threshold detection on the primary series
//!
//! The run is all-or-nothing: the first failing stage aborts the call and
//! no partial result is produced.

use anomaly_api::PipelineConfig;
use anomaly_spi::{
    AnalysisResult, AnomalyDetector, CorrelationMatrix, MetricCorrelation, Result,
    SeriesForecaster, Tier,
};
use tracing::{debug, instrument};

use crate::correlation::{correlation_matrix, pearson};
use crate::detector::ThresholdDetector;
use crate::filter::CorrelationFilter;
use crate::forecaster::Forecaster;
use crate::hierarchy::MetricHierarchy;

/// Runs the full analysis over a primary series and a metric hierarchy.
///
/// The pipeline borrows the hierarchy for its lifetime, so the hierarchy
/// cannot be reclassified while a pipeline over it exists.
#[derive(Debug, Clone)]
pub struct AnomalyPipeline<'a> {
    series: &'a [f64],
    hierarchy: &'a MetricHierarchy,
    config: PipelineConfig,
}

impl<'a> AnomalyPipeline<'a> {
    /// Create a pipeline with the default configuration.
    pub fn new(series: &'a [f64], hierarchy: &'a MetricHierarchy) -> Self {
        Self {
            series,
            hierarchy,
            config: PipelineConfig::default(),
        }
    }

    /// Create a pipeline with an explicit configuration.
    pub fn with_config(
        series: &'a [f64],
        hierarchy: &'a MetricHierarchy,
        config: PipelineConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            series,
            hierarchy,
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage and assemble the result.
    #[instrument(skip_all, fields(len = self.series.len(), metrics = self.hierarchy.len()))]
    pub fn process(&self) -> Result<AnalysisResult> {
        let prediction = self.predict()?;
        debug!(?prediction, "forecast complete");

        let correlation_analysis = self.correlate_tiers()?;
        debug!(pairs = correlation_analysis.len(), "tier correlation complete");

        let matrix = self.critical_matrix()?;
        let filtered_anomalies = CorrelationFilter::from_config(self.config.filter)?
            .filter(self.series, &matrix)?;
        debug!(dim = matrix.dim(), redundant = filtered_anomalies.len(), "filter complete");

        let detection = ThresholdDetector::new().evaluate(self.series, self.config.threshold.context)?;
        let anomalies = detection.anomaly_indices();
        debug!(threshold = detection.threshold, count = anomalies.len(), "detection complete");

        Ok(AnalysisResult {
            prediction,
            correlation_analysis,
            filtered_anomalies,
            anomalies,
            threshold: detection.threshold,
        })
    }

    fn predict(&self) -> Result<Vec<f64>> {
        let mut forecaster = Forecaster::from_config(&self.config.forecast)?;
        forecaster.fit(self.series)?;
        forecaster.forecast(self.config.forecast.steps)
    }

    fn correlate_tiers(&self) -> Result<Vec<MetricCorrelation>> {
        let mut pairs = Vec::new();
        for critical in self.hierarchy.metrics(Tier::Critical) {
            for warning in self.hierarchy.metrics(Tier::Warning) {
                let coefficient = pearson(&critical.data, &warning.data)?;
                pairs.push(MetricCorrelation::new(
                    critical.name.as_str(),
                    warning.name.as_str(),
                    coefficient,
                ));
            }
        }
        Ok(pairs)
    }

    /// Pearson matrix over the critical tier, `[[1.0]]` below two metrics.
    fn critical_matrix(&self) -> Result<CorrelationMatrix> {
        let critical: Vec<&[f64]> = self
            .hierarchy
            .metrics(Tier::Critical)
            .map(|m| m.data.as_slice())
            .collect();
        if critical.len() < 2 {
            return Ok(CorrelationMatrix::identity(1));
        }
        correlation_matrix(&critical)
    }
}
