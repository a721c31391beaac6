//! Forecasting models for price series
//!
//! A model is anything that can be fit on a [`Series`] and then asked for a
//! [`Forecast`] covering the fitted history plus a number of future calendar
//! days. The orchestrator only sees the [`ForecastModel`] and
//! [`FittedModel`] traits, so implementations can be swapped freely.

use crate::data::Series;
use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt::Debug;

pub mod additive;
pub mod holt;

pub use additive::{AdditiveSeasonalModel, FittedAdditiveModel};
pub use holt::{FittedHoltModel, HoltLinearModel};

/// One predicted value with its uncertainty band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub timestamp: NaiveDate,
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl ForecastPoint {
    /// Point centred on `estimate` with a symmetric half-width
    pub fn symmetric(timestamp: NaiveDate, estimate: f64, half_width: f64) -> Self {
        let half_width = half_width.abs();
        Self {
            timestamp,
            point_estimate: estimate,
            lower_bound: estimate - half_width,
            upper_bound: estimate + half_width,
        }
    }
}

/// Per-timestamp additive components behind the point estimates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentFrame {
    pub trend: Vec<f64>,
    pub weekly: Option<Vec<f64>>,
    pub yearly: Option<Vec<f64>>,
}

impl ComponentFrame {
    fn len_matches(&self, n: usize) -> bool {
        self.trend.len() == n
            && self.weekly.as_ref().map_or(true, |w| w.len() == n)
            && self.yearly.as_ref().map_or(true, |y| y.len() == n)
    }
}

/// Model output spanning the fitted history and the requested horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    model_name: String,
    last_observed: NaiveDate,
    horizon_days: usize,
    points: Vec<ForecastPoint>,
    components: Option<ComponentFrame>,
}

impl Forecast {
    /// Create a forecast, checking ordering, band and horizon invariants
    pub fn new(
        model_name: &str,
        last_observed: NaiveDate,
        horizon_days: usize,
        points: Vec<ForecastPoint>,
        components: Option<ComponentFrame>,
    ) -> Result<Self> {
        if let Some(pair) = points.windows(2).find(|w| w[0].timestamp >= w[1].timestamp) {
            return Err(ForecastError::InvalidParameter(format!(
                "Forecast timestamps must be strictly increasing: {} is followed by {}",
                pair[0].timestamp, pair[1].timestamp
            )));
        }

        if let Some(bad) = points.iter().find(|p| {
            !(p.lower_bound <= p.point_estimate && p.point_estimate <= p.upper_bound)
        }) {
            return Err(ForecastError::InvalidParameter(format!(
                "Forecast band [{}, {}] does not contain {} at {}",
                bad.lower_bound, bad.upper_bound, bad.point_estimate, bad.timestamp
            )));
        }

        let future = points.iter().filter(|p| p.timestamp > last_observed).count();
        if future != horizon_days {
            return Err(ForecastError::InvalidParameter(format!(
                "Forecast has {} future points, expected {}",
                future, horizon_days
            )));
        }

        if let Some(frame) = &components {
            if !frame.len_matches(points.len()) {
                return Err(ForecastError::InvalidParameter(
                    "Component frame length doesn't match forecast length".to_string(),
                ));
            }
        }

        Ok(Self {
            model_name: model_name.to_string(),
            last_observed,
            horizon_days,
            points,
            components,
        })
    }

    /// All points in chronological order
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Get the length of the forecast
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the forecast is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points at or before the last observed timestamp
    pub fn historical(&self) -> &[ForecastPoint] {
        let split = self.split_index();
        &self.points[..split]
    }

    /// Points after the last observed timestamp
    pub fn future(&self) -> &[ForecastPoint] {
        let split = self.split_index();
        &self.points[split..]
    }

    fn split_index(&self) -> usize {
        self.points
            .partition_point(|p| p.timestamp <= self.last_observed)
    }

    pub fn timestamps(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    pub fn point_estimates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.point_estimate).collect()
    }

    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    pub fn last_observed(&self) -> NaiveDate {
        self.last_observed
    }

    pub fn components(&self) -> Option<&ComponentFrame> {
        self.components.as_ref()
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Fitted forecast model
pub trait FittedModel: Debug {
    /// Forecast the fitted history plus `horizon_days` future calendar days
    ///
    /// Calling this repeatedly with the same horizon yields identical output.
    fn predict(&self, horizon_days: usize) -> Result<Forecast>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be fit on a price series
pub trait ForecastModel: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedModel;

    /// Fit the model on a prepared series
    fn fit(&self, series: &Series) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Reject series a model cannot learn anything from
///
/// `min_observations` is two full periods of the shortest modeled cycle, or
/// two when the model has no seasonality.
pub fn check_fit_policy(series: &Series, min_observations: usize) -> Result<()> {
    let required = min_observations.max(2);
    if series.len() < required {
        return Err(ForecastError::ModelFit(format!(
            "Series has {} observations, at least {} required",
            series.len(),
            required
        )));
    }

    if series_math::stats::is_constant(&series.values()) {
        return Err(ForecastError::ModelFit(
            "Series has zero variance (constant price)".to_string(),
        ));
    }

    Ok(())
}

/// History timestamps followed by `horizon_days` consecutive calendar days
pub fn forecast_timestamps(history: &[NaiveDate], horizon_days: usize) -> Result<Vec<NaiveDate>> {
    let last = *history.last().ok_or_else(|| {
        ForecastError::InvalidParameter("Cannot extend an empty history".to_string())
    })?;

    // Reject before reserving anything for the horizon
    if last.checked_add_days(Days::new(horizon_days as u64)).is_none() {
        return Err(ForecastError::InvalidParameter(format!(
            "Horizon of {} days from {} exceeds the supported calendar",
            horizon_days, last
        )));
    }

    let mut timestamps = Vec::with_capacity(history.len() + horizon_days);
    timestamps.extend_from_slice(history);
    timestamps.extend(last.iter_days().skip(1).take(horizon_days));

    Ok(timestamps)
}

/// Standard normal quantile for a central interval of the given width
pub fn interval_z_score(interval_width: f64) -> Result<f64> {
    if !(interval_width > 0.0 && interval_width < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "Interval width must be between 0 and 1, got {}",
            interval_width
        )));
    }

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ForecastError::InvalidParameter(format!("Standard normal: {}", e)))?;
    Ok(normal.inverse_cdf(0.5 + interval_width / 2.0))
}
