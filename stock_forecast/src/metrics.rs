//! Metrics for evaluating forecast accuracy against observed prices

use crate::data::{ObservedPoint, Series};
use crate::error::{ForecastError, Result};
use crate::models::{Forecast, ForecastPoint};
use serde::Serialize;
use std::cmp::Ordering;

/// In-sample accuracy of a forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsReport {
    /// Mean Absolute Error
    pub mean_absolute_error: f64,
    /// Mean Squared Error
    pub mean_squared_error: f64,
    /// Root Mean Squared Error
    pub root_mean_squared_error: f64,
    /// Number of timestamps scored
    pub matched_points: usize,
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Performance Metrics ({} points, lower is better):", self.matched_points)?;
        writeln!(f, "  Mean Absolute Error (MAE):       {:.2}", self.mean_absolute_error)?;
        writeln!(f, "  Mean Squared Error (MSE):        {:.2}", self.mean_squared_error)?;
        writeln!(f, "  Root Mean Squared Error (RMSE):  {:.2}", self.root_mean_squared_error)?;
        Ok(())
    }
}

/// Scores predictions against actuals on shared timestamps
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsEvaluator;

impl MetricsEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Compare predictions to actuals
    ///
    /// Only timestamps present in both sequences are scored. Nothing is
    /// interpolated.
    pub fn evaluate(&self, actual: &Series, predicted: &Forecast) -> Result<MetricsReport> {
        self.score_points(actual.points(), predicted.points())
    }

    /// Score raw point slices, both in strictly ascending timestamp order
    pub fn score_points(
        &self,
        actual_points: &[ObservedPoint],
        predicted_points: &[ForecastPoint],
    ) -> Result<MetricsReport> {
        let mut abs_sum = 0.0;
        let mut sq_sum = 0.0;
        let mut matched = 0usize;

        // Both sides are strictly ascending, so a merge join finds every pair
        let (mut i, mut j) = (0, 0);
        while i < actual_points.len() && j < predicted_points.len() {
            let a = &actual_points[i];
            let p = &predicted_points[j];
            match a.timestamp.cmp(&p.timestamp) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    let error = a.value - p.point_estimate;
                    abs_sum += error.abs();
                    sq_sum += error * error;
                    matched += 1;
                    i += 1;
                    j += 1;
                }
            }
        }

        if matched == 0 {
            return Err(ForecastError::InsufficientOverlap {
                actual: actual_points.len(),
                predicted: predicted_points.len(),
            });
        }

        let n = matched as f64;
        let mse = sq_sum / n;
        log::debug!("Scored {} matched points", matched);

        Ok(MetricsReport {
            mean_absolute_error: abs_sum / n,
            mean_squared_error: mse,
            root_mean_squared_error: mse.sqrt(),
            matched_points: matched,
        })
    }
}

/// Evaluate forecast accuracy against actual values
pub fn evaluate(actual: &Series, predicted: &Forecast) -> Result<MetricsReport> {
    MetricsEvaluator.evaluate(actual, predicted)
}
