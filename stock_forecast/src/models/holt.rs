//! Holt linear exponential smoothing

use crate::data::Series;
use crate::error::{ForecastError, Result};
use crate::models::{
    check_fit_policy, forecast_timestamps, interval_z_score, ComponentFrame, FittedModel, Forecast,
    ForecastModel, ForecastPoint,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use series_math::stats::root_mean_square;

/// Smoothing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoltConfig {
    /// Level smoothing parameter
    pub alpha: f64,
    /// Trend smoothing parameter
    pub beta: f64,
    /// Coverage of the uncertainty band, in (0, 1)
    pub interval_width: f64,
}

impl Default for HoltConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.1,
            interval_width: 0.80,
        }
    }
}

/// Double exponential smoothing model
#[derive(Debug, Clone)]
pub struct HoltLinearModel {
    /// Name of the model
    name: String,
    config: HoltConfig,
    z_score: f64,
}

/// Fitted Holt model
#[derive(Debug, Clone)]
pub struct FittedHoltModel {
    /// Name of the model
    name: String,
    history: Vec<NaiveDate>,
    /// One-step-ahead predictions for the history
    in_sample: Vec<f64>,
    /// Final level
    level: f64,
    /// Final trend per observation
    trend: f64,
    mean_gap_days: f64,
    sigma: f64,
    z_score: f64,
}

impl HoltLinearModel {
    /// Create a new Holt model
    pub fn new(config: HoltConfig) -> Result<Self> {
        if config.alpha <= 0.0 || config.alpha >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }
        if config.beta <= 0.0 || config.beta >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Beta must be between 0 and 1".to_string(),
            ));
        }
        let z_score = interval_z_score(config.interval_width)?;

        Ok(Self {
            name: format!("Holt linear (alpha={}, beta={})", config.alpha, config.beta),
            config,
            z_score,
        })
    }

    pub fn config(&self) -> &HoltConfig {
        &self.config
    }
}

impl ForecastModel for HoltLinearModel {
    type Fitted = FittedHoltModel;

    fn fit(&self, series: &Series) -> Result<Self::Fitted> {
        // No seasonal cycle to estimate, two points suffice
        check_fit_policy(series, 2)?;

        let prices = series.values();
        let alpha = self.config.alpha;
        let beta = self.config.beta;

        let mut level = prices[0];
        let mut trend = prices[1] - prices[0];

        // First prediction is just the first observation
        let mut in_sample = Vec::with_capacity(prices.len());
        in_sample.push(prices[0]);

        for &value in &prices[1..] {
            in_sample.push(level + trend);

            let previous = level;
            level = alpha * value + (1.0 - alpha) * (level + trend);
            trend = beta * (level - previous) + (1.0 - beta) * trend;
        }

        let residuals: Vec<f64> = prices[1..]
            .iter()
            .zip(&in_sample[1..])
            .map(|(a, p)| a - p)
            .collect();
        let sigma = root_mean_square(&residuals)?;

        Ok(FittedHoltModel {
            name: self.name.clone(),
            history: series.timestamps(),
            in_sample,
            level,
            trend,
            mean_gap_days: series.mean_gap_days(),
            sigma,
            z_score: self.z_score,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedHoltModel {
    /// Trend in price units per calendar day
    pub fn trend_per_day(&self) -> f64 {
        self.trend / self.mean_gap_days
    }

    pub fn level(&self) -> f64 {
        self.level
    }
}

impl FittedModel for FittedHoltModel {
    fn predict(&self, horizon_days: usize) -> Result<Forecast> {
        let timestamps = forecast_timestamps(&self.history, horizon_days)?;
        let last = self.history[self.history.len() - 1];
        let in_sample_band = self.z_score * self.sigma;

        let mut points: Vec<ForecastPoint> = self
            .history
            .iter()
            .zip(&self.in_sample)
            .map(|(&date, &estimate)| ForecastPoint::symmetric(date, estimate, in_sample_band))
            .collect();

        for &date in &timestamps[self.history.len()..] {
            let ahead = (date - last).num_days() as f64;
            let estimate = self.level + self.trend_per_day() * ahead;
            let steps = ahead / self.mean_gap_days;
            points.push(ForecastPoint::symmetric(
                date,
                estimate,
                in_sample_band * (1.0 + steps).sqrt(),
            ));
        }

        let trend = points.iter().map(|p| p.point_estimate).collect();
        Forecast::new(
            &self.name,
            last,
            horizon_days,
            points,
            Some(ComponentFrame {
                trend,
                weekly: None,
                yearly: None,
            }),
        )
    }

    fn name(&self) -> &str {
        &self.name
    }
}
