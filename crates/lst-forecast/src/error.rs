//! Error types for forecasting.

use thiserror::Error;

/// Result type for forecast operations.
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Errors that can occur while building the series or fitting the model.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Not enough data points for forecasting: have {have}, need at least {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("Series years must be strictly increasing: {prev} then {next}")]
    NonMonotonicYears { prev: i32, next: i32 },

    #[error("Non-finite mean value for year {0}")]
    NonFiniteValue(i32),
}
