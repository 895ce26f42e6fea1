//! Forecaster trait definition.

use crate::error::Result;

/// Fit-then-forecast contract for time series models.
pub trait SeriesForecaster {
    /// Fit the model to historical data.
    fn fit(&mut self, data: &[f64]) -> Result<()>;

    /// Forecast the next `steps` values.
    ///
    /// Fails with `NotFitted` when called before a successful `fit`.
    fn forecast(&self, steps: usize) -> Result<Vec<f64>>;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;
}
