//! ARIMA (AutoRegressive Integrated Moving Average) forecasting.
//!
//! The model combines three components:
//!
//! - **AR**: past values of the differenced series, coefficients from the
//!   Yule-Walker equations solved with Durbin-Levinson recursion
//! - **I**: `d`-fold differencing, undone when forecasting
//! - **MA**: past one-step errors, coefficients from the residual
//!   autocorrelation
//!
//! The order is fixed by the caller; no order selection is performed.
//!
//! ## Example
//!
//! ```rust
//! use anomaly_core::forecaster::Forecaster;
//! use anomaly_spi::{ArimaOrder, SeriesForecaster};
//!
//! let data: Vec<f64> = (1..=40).map(|x| x as f64 + (x as f64 * 0.3).sin()).collect();
//! let mut model = Forecaster::new(ArimaOrder::new(1, 1, 1)).unwrap();
//! model.fit(&data).unwrap();
//! assert_eq!(model.forecast(3).unwrap().len(), 3);
//! ```

use anomaly_api::ForecastConfig;
use anomaly_spi::{AnomalyError, ArimaOrder, Result, SeriesForecaster};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats;

const MAX_AR_ORDER: usize = 10;
const MAX_DIFFERENCING: usize = 2;
const MAX_MA_ORDER: usize = 10;
const VARIANCE_EPSILON: f64 = 1e-10;
const MA_BOUND: f64 = 0.99;

/// A fitted ARIMA model.
///
/// Only obtainable through [`Arima::fit`], so forecasting from it can never
/// hit an unfitted state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arima {
    order: ArimaOrder,
    /// AR coefficients, lag 1 first.
    ar_coeffs: Vec<f64>,
    /// MA coefficients, lag 1 first.
    ma_coeffs: Vec<f64>,
    /// Mean of the differenced series.
    constant: f64,
    /// Last value of the series at each differencing level `0..d`.
    level_tails: Vec<f64>,
    /// Differenced series.
    differenced: Vec<f64>,
    /// One-step errors over the differenced series.
    residuals: Vec<f64>,
}

impl Arima {
    /// Fit a model of the given order to `data`.
    ///
    /// Fails with `InvalidParameter` when the order exceeds
    /// `(10, 2, 10)`, `InsufficientData` when `data` is shorter than
    /// `p + d + q + 10`, `InvalidInput` on NaN or infinite values, and
    /// `ConvergenceFailure` when the estimation yields non-finite
    /// coefficients.
    pub fn fit(data: &[f64], order: ArimaOrder) -> Result<Self> {
        validate_order(order)?;

        let required = order.min_observations();
        if data.len() < required {
            return Err(AnomalyError::InsufficientData {
                required,
                actual: data.len(),
            });
        }
        if data.iter().any(|x| !x.is_finite()) {
            return Err(AnomalyError::invalid_input(
                "data contains NaN or infinite values",
            ));
        }

        let mut level_tails = Vec::with_capacity(order.d);
        let mut differenced = data.to_vec();
        for _ in 0..order.d {
            // non-empty: data.len() >= d + 10
            level_tails.push(differenced[differenced.len() - 1]);
            differenced = difference(&differenced);
        }

        let constant = stats::mean(&differenced);
        let centered: Vec<f64> = differenced.iter().map(|x| x - constant).collect();

        let ar_coeffs = yule_walker(&centered, order.p);
        let ar_residuals = ar_residuals(&centered, &ar_coeffs);
        let ma_coeffs = residual_ma_coefficients(&ar_residuals, order.q);
        let residuals = arma_residuals(&centered, &ar_coeffs, &ma_coeffs);

        let converged = ar_coeffs
            .iter()
            .chain(ma_coeffs.iter())
            .chain(residuals.iter())
            .all(|c| c.is_finite());
        if !converged {
            return Err(AnomalyError::ConvergenceFailure { iterations: 1 });
        }

        debug!(%order, ?ar_coeffs, ?ma_coeffs, constant, "fitted ARIMA model");

        Ok(Self {
            order,
            ar_coeffs,
            ma_coeffs,
            constant,
            level_tails,
            differenced,
            residuals,
        })
    }

    /// Forecast the next `steps` values on the original scale.
    pub fn forecast(&self, steps: usize) -> Vec<f64> {
        if steps == 0 {
            return Vec::new();
        }

        let mut extended: Vec<f64> = self.differenced.iter().map(|x| x - self.constant).collect();
        let mut errors = self.residuals.clone();
        let n = extended.len();

        for _ in 0..steps {
            let mut next = 0.0;
            for (j, phi) in self.ar_coeffs.iter().enumerate() {
                next += phi * extended[extended.len() - j - 1];
            }
            for (j, theta) in self.ma_coeffs.iter().enumerate() {
                if errors.len() > j {
                    next += theta * errors[errors.len() - j - 1];
                }
            }
            extended.push(next);
            // Future errors have zero expectation
            errors.push(0.0);
        }

        let mut result: Vec<f64> = extended[n..].iter().map(|x| x + self.constant).collect();
        for tail in self.level_tails.iter().rev() {
            result = integrate(*tail, &result);
        }
        result
    }

    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coeffs
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma_coeffs
    }

    /// Variance of the in-sample one-step errors.
    pub fn residual_variance(&self) -> f64 {
        let skip = self.order.p.min(self.residuals.len());
        let tail = &self.residuals[skip..];
        if tail.is_empty() {
            return 0.0;
        }
        tail.iter().map(|e| e * e).sum::<f64>() / tail.len() as f64
    }
}

/// Forecaster lifecycle: unfitted until [`SeriesForecaster::fit`] succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Forecaster {
    Unfitted { order: ArimaOrder },
    Fitted(Arima),
}

impl Forecaster {
    /// Create an unfitted forecaster, validating the order up front.
    pub fn new(order: ArimaOrder) -> Result<Self> {
        validate_order(order)?;
        Ok(Self::Unfitted { order })
    }

    /// Create from configuration.
    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        Self::new(config.order)
    }

    pub fn order(&self) -> ArimaOrder {
        match self {
            Self::Unfitted { order } => *order,
            Self::Fitted(model) => model.order(),
        }
    }

    /// The fitted model, if any.
    pub fn model(&self) -> Option<&Arima> {
        match self {
            Self::Unfitted { .. } => None,
            Self::Fitted(model) => Some(model),
        }
    }
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::Unfitted {
            order: ArimaOrder::default(),
        }
    }
}

impl SeriesForecaster for Forecaster {
    /// Refitting replaces any previous model; a failed fit leaves the
    /// current state untouched.
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        let model = Arima::fit(data, self.order())?;
        *self = Self::Fitted(model);
        Ok(())
    }

    fn forecast(&self, steps: usize) -> Result<Vec<f64>> {
        match self {
            Self::Unfitted { .. } => Err(AnomalyError::NotFitted),
            Self::Fitted(model) => Ok(model.forecast(steps)),
        }
    }

    fn is_fitted(&self) -> bool {
        matches!(self, Self::Fitted(_))
    }
}

fn validate_order(order: ArimaOrder) -> Result<()> {
    if order.p > MAX_AR_ORDER {
        return Err(AnomalyError::invalid_parameter(
            "p",
            format!("AR order must be <= {}", MAX_AR_ORDER),
        ));
    }
    if order.d > MAX_DIFFERENCING {
        return Err(AnomalyError::invalid_parameter(
            "d",
            format!("differencing order must be <= {}", MAX_DIFFERENCING),
        ));
    }
    if order.q > MAX_MA_ORDER {
        return Err(AnomalyError::invalid_parameter(
            "q",
            format!("MA order must be <= {}", MAX_MA_ORDER),
        ));
    }
    Ok(())
}

fn difference(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Cumulative sum of `increments` starting from `last`.
fn integrate(last: f64, increments: &[f64]) -> Vec<f64> {
    let mut level = last;
    increments
        .iter()
        .map(|dx| {
            level += dx;
            level
        })
        .collect()
}

/// Sample autocovariances for lags `0..=max_lag` of a centered series.
fn autocovariance(centered: &[f64], max_lag: usize) -> Vec<f64> {
    let n = centered.len();
    (0..=max_lag)
        .map(|k| {
            if k >= n {
                return 0.0;
            }
            centered[k..]
                .iter()
                .zip(centered.iter())
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / n as f64
        })
        .collect()
}

/// Solve the Yule-Walker equations with Durbin-Levinson recursion.
fn yule_walker(centered: &[f64], p: usize) -> Vec<f64> {
    if p == 0 {
        return Vec::new();
    }

    let r = autocovariance(centered, p);
    let mut phi = vec![0.0; p];
    if r[0].abs() <= VARIANCE_EPSILON {
        return phi;
    }

    let mut error = r[0];
    for k in 0..p {
        let mut acc = r[k + 1];
        for j in 0..k {
            acc -= phi[j] * r[k - j];
        }
        let reflection = acc / error;

        let previous = phi.clone();
        phi[k] = reflection;
        for j in 0..k {
            phi[j] = previous[j] - reflection * previous[k - 1 - j];
        }

        error *= 1.0 - reflection * reflection;
        if error.abs() <= VARIANCE_EPSILON {
            break;
        }
    }
    phi
}

/// One-step errors of the pure AR part; the first `p` entries are zero.
fn ar_residuals(centered: &[f64], phi: &[f64]) -> Vec<f64> {
    let p = phi.len();
    let mut residuals = vec![0.0; centered.len()];
    for t in p..centered.len() {
        let fitted: f64 = phi.iter().enumerate().map(|(j, c)| c * centered[t - j - 1]).sum();
        residuals[t] = centered[t] - fitted;
    }
    residuals
}

/// MA coefficients from the lag autocorrelations of the AR residuals.
fn residual_ma_coefficients(residuals: &[f64], q: usize) -> Vec<f64> {
    let mut theta = vec![0.0; q];
    if q == 0 || residuals.is_empty() {
        return theta;
    }

    let mean = stats::mean(residuals);
    let centered: Vec<f64> = residuals.iter().map(|x| x - mean).collect();
    let r = autocovariance(&centered, q);
    if r[0].abs() > VARIANCE_EPSILON {
        for k in 0..q {
            theta[k] = (r[k + 1] / r[0]).clamp(-MA_BOUND, MA_BOUND);
        }
    }
    theta
}

/// One-step errors of the full ARMA recursion over the centered series.
fn arma_residuals(centered: &[f64], phi: &[f64], theta: &[f64]) -> Vec<f64> {
    let p = phi.len();
    let mut errors = vec![0.0; centered.len()];
    for t in p..centered.len() {
        let mut fitted = 0.0;
        for (j, c) in phi.iter().enumerate() {
            fitted += c * centered[t - j - 1];
        }
        for (j, c) in theta.iter().enumerate() {
            if t > j {
                fitted += c * errors[t - j - 1];
            }
        }
        errors[t] = centered[t] - fitted;
    }
    errors
}
