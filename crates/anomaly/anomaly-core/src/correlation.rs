//! Pairwise correlation analysis.
//!
//! Pearson and Spearman coefficients between two equally long series, and
//! lagged Pearson correlation for testing whether one series trails another.
//!
//! ## Lag orientation
//!
//! `lagged_correlation(trailing, leading, lag)` pairs `trailing[lag + t]`
//! with `leading[t]`. A coefficient near 1.0 therefore means
//! `trailing[t] ≈ leading[t - lag]`: the first argument follows the second
//! by `lag` steps. Swapping the arguments asks the opposite question.

use anomaly_spi::{AnomalyError, CorrelationMatrix, Result};

use crate::stats;

/// Variance, relative to the mean square, below which a series counts as constant.
const RELATIVE_VARIANCE_EPSILON: f64 = 1e-12;

/// Pearson correlation coefficient of two equally long series.
///
/// Two element-wise identical series correlate at exactly 1.0, constant
/// ones included. Otherwise a constant series has no defined coefficient
/// and is rejected.
pub fn pearson(a: &[f64], b: &[f64]) -> Result<f64> {
    check_pair(a, b)?;
    if a == b {
        return Ok(1.0);
    }
    if is_constant(a) || is_constant(b) {
        return Err(AnomalyError::invalid_input(
            "correlation is undefined for a series with zero variance",
        ));
    }

    let mean_a = stats::mean(a);
    let mean_b = stats::mean(b);
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let r = cov / (var_a * var_b).sqrt();
    if !r.is_finite() {
        return Err(AnomalyError::NumericalError(format!(
            "correlation coefficient is {}",
            r
        )));
    }
    Ok(r.clamp(-1.0, 1.0))
}

/// Spearman rank correlation: Pearson over average-tie ranks.
pub fn spearman(a: &[f64], b: &[f64]) -> Result<f64> {
    check_pair(a, b)?;
    pearson(&stats::average_ranks(a), &stats::average_ranks(b))
}

/// Pearson correlation of `trailing[lag..]` against `leading[..len - lag]`.
///
/// See the module docs for the orientation. `lag` must be at least 1 and
/// strictly less than the series length.
pub fn lagged_correlation(trailing: &[f64], leading: &[f64], lag: usize) -> Result<f64> {
    if lag == 0 {
        return Err(AnomalyError::invalid_parameter("lag", "must be at least 1"));
    }
    if lag >= leading.len() {
        return Err(AnomalyError::invalid_input(format!(
            "lag {} leaves no overlap with a series of length {}",
            lag,
            leading.len()
        )));
    }
    if trailing.len() != leading.len() {
        return Err(length_mismatch(trailing.len(), leading.len()));
    }

    let overlap = leading.len() - lag;
    pearson(&trailing[lag..], &leading[..overlap])
}

/// Pairwise Pearson matrix over a set of equally long series.
pub fn correlation_matrix(series: &[&[f64]]) -> Result<CorrelationMatrix> {
    CorrelationMatrix::from_fn(series.len(), |i, j| pearson(series[i], series[j]))
}

/// Constant up to rounding, judged against the magnitude of the values
/// so that series recorded in small units still correlate.
fn is_constant(x: &[f64]) -> bool {
    let mean_square = x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64;
    stats::population_variance(x) <= RELATIVE_VARIANCE_EPSILON * mean_square
}

fn check_pair(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(length_mismatch(a.len(), b.len()));
    }
    if a.len() < 2 {
        return Err(AnomalyError::invalid_input(format!(
            "correlation needs at least 2 points, got {}",
            a.len()
        )));
    }
    Ok(())
}

fn length_mismatch(left: usize, right: usize) -> AnomalyError {
    AnomalyError::invalid_input(format!(
        "series lengths differ: {} vs {}",
        left, right
    ))
}

/// Correlation analysis over one pair of series.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationAnalyzer<'a> {
    data_i: &'a [f64],
    data_j: &'a [f64],
}

impl<'a> CorrelationAnalyzer<'a> {
    pub fn new(data_i: &'a [f64], data_j: &'a [f64]) -> Self {
        Self { data_i, data_j }
    }

    pub fn pearson(&self) -> Result<f64> {
        pearson(self.data_i, self.data_j)
    }

    pub fn spearman(&self) -> Result<f64> {
        spearman(self.data_i, self.data_j)
    }

    /// Lagged correlation testing whether `data_i` trails `data_j` by `lag` steps.
    pub fn lagged(&self, lag: usize) -> Result<f64> {
        lagged_correlation(self.data_i, self.data_j, lag)
    }

    /// Lagged coefficient for every lag in `1..=max_lag`.
    pub fn lagged_profile(&self, max_lag: usize) -> Result<Vec<(usize, f64)>> {
        (1..=max_lag)
            .map(|lag| self.lagged(lag).map(|coefficient| (lag, coefficient)))
            .collect()
    }
}
