//! Forecast error types

use thiserror::Error;

/// Errors that can occur during forecasting operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Not enough history to fit any model
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Forecast horizon outside 1..=MAX_HORIZON months
    #[error("Invalid horizon {0}: must be between 1 and {} months", crate::MAX_HORIZON)]
    InvalidHorizon(i64),

    /// Historical series violates its ordering or value invariants
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    /// Invalid configuration value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Degenerate numerical input. Recovered inside the engine and never
    /// returned from a forecast call.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl ForecastError {
    /// Shorthand for [`ForecastError::InvalidParameter`].
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the engine.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::NumericalInstability(_))
    }
}
