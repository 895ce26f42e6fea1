//! Anomaly detection error types.

use thiserror::Error;

/// Anomaly detection errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnomalyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Model fitting failed to converge after {iterations} iterations")]
    ConvergenceFailure { iterations: usize },

    #[error("Numerical error: {0}")]
    NumericalError(String),

    #[error("Forecaster not fitted: call fit() before forecast()")]
    NotFitted,
}

/// Coarse classification of [`AnomalyError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Empty, mismatched or misshapen data, unknown tier, bad parameter.
    InvalidInput,
    /// Forecast model could not be fitted.
    Model,
    /// Operation called in the wrong lifecycle state.
    State,
}

impl AnomalyError {
    /// Shorthand for an [`AnomalyError::InvalidInput`].
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Shorthand for an [`AnomalyError::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Which side of the error taxonomy this error falls on.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput(_) | Self::InvalidParameter { .. } => ErrorCategory::InvalidInput,
            Self::InsufficientData { .. }
            | Self::ConvergenceFailure { .. }
            | Self::NumericalError(_) => ErrorCategory::Model,
            Self::NotFitted => ErrorCategory::State,
        }
    }
}

/// Result type for anomaly detection operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;
