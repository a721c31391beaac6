//! Error types for the stock_forecast crate

use series_math::MathError;
use thiserror::Error;

/// Custom error types for the stock_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The upstream source has nothing for the request
    #[error("No data available for '{symbol}': {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// The prepared series is too small to model
    #[error("Prepared series has {observations} usable observation(s), at least 2 required")]
    EmptySeries { observations: usize },

    /// The series is statistically degenerate for the fit policy
    #[error("Model fit error: {0}")]
    ModelFit(String),

    /// No timestamps shared between actuals and predictions
    #[error("No overlapping timestamps between {actual} actual and {predicted} predicted points")]
    InsufficientOverlap { actual: usize, predicted: usize },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to configuration loading or validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV decoding
    #[error("CSV error: {0}")]
    Csv(String),

    /// Error from JSON (de)serialization
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::Serialization(err.to_string())
    }
}

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        ForecastError::ModelFit(err.to_string())
    }
}
