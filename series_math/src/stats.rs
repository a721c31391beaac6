//! Descriptive statistics over `f64` slices

use crate::{MathError, Result};

/// Root mean square of the values, typically model residuals
pub fn root_mean_square(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the RMS of an empty slice".to_string(),
        ));
    }

    Ok((values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt())
}

/// Largest absolute value
pub fn max_abs(values: &[f64]) -> Result<f64> {
    values
        .iter()
        .map(|v| v.abs())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
        .ok_or_else(|| MathError::InsufficientData("Empty slice has no maximum".to_string()))
}

/// Returns true when every value equals the first one
pub fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}
