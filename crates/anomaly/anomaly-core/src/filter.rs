//! Correlation-based redundancy filter.

use std::collections::BTreeSet;

use anomaly_api::FilterConfig;
use anomaly_spi::{AnomalyError, CorrelationMatrix, Result};
use tracing::{trace, warn};

/// Marks the weaker member of every highly correlated pair as redundant.
///
/// For each pair `i < j` with `matrix[i][j] >= threshold`, the index whose
/// value is smaller is marked; on a tie `i` is marked. The scan is
/// quadratic in the matrix dimension.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationFilter {
    threshold: f64,
}

impl CorrelationFilter {
    /// Create a filter with the given cutoff.
    ///
    /// Fails with `InvalidParameter` unless `threshold` lies in `[-1, 1]`.
    pub fn new(threshold: f64) -> Result<Self> {
        Self::from_config(FilterConfig::new(threshold))
    }

    /// Create from configuration.
    pub fn from_config(config: FilterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            threshold: config.correlation_threshold,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Indices marked redundant.
    ///
    /// A matrix with fewer than two rows has no pairs, so the result is
    /// empty regardless of `values`. Otherwise the matrix dimension must
    /// equal `values.len()`.
    pub fn filter(&self, values: &[f64], matrix: &CorrelationMatrix) -> Result<BTreeSet<usize>> {
        let mut redundant = BTreeSet::new();
        if matrix.dim() < 2 {
            warn!(dim = matrix.dim(), "correlation matrix too small, skipping filter");
            return Ok(redundant);
        }
        if matrix.dim() != values.len() {
            return Err(AnomalyError::invalid_input(format!(
                "correlation matrix is {0}x{0} but {1} values were supplied",
                matrix.dim(),
                values.len()
            )));
        }

        for i in 0..values.len() {
            for j in (i + 1)..values.len() {
                let coefficient = matrix.get(i, j);
                if coefficient >= self.threshold {
                    let marked = if values[i] <= values[j] { i } else { j };
                    trace!(i, j, coefficient, marked, "redundant pair");
                    redundant.insert(marked);
                }
            }
        }
        Ok(redundant)
    }
}

impl Default for CorrelationFilter {
    fn default() -> Self {
        Self {
            threshold: FilterConfig::default().correlation_threshold,
        }
    }
}
