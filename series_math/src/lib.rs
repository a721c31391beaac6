//! # Series Math
//!
//! Numeric building blocks for the price series models in `stock_forecast`.
//! This crate provides descriptive statistics, a ridge-regularised least
//! squares solver and Fourier seasonality features.

use thiserror::Error;

pub mod fourier;
pub mod regression;
pub mod stats;

/// Errors that can occur in series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for series math operations
pub type Result<T> = std::result::Result<T, MathError>;
