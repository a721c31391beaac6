//! Additive trend + seasonality model
//!
//! The point estimate is `trend(t) + weekly(t) + yearly(t)`: a linear trend in
//! scaled time plus Fourier series for each enabled cycle, fit jointly by ridge
//! least squares. The band width comes from the in-sample residual spread and
//! widens with distance past the last observation.

use crate::data::Series;
use crate::error::{ForecastError, Result};
use crate::models::{
    check_fit_policy, forecast_timestamps, interval_z_score, ComponentFrame, FittedModel, Forecast,
    ForecastModel, ForecastPoint,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use series_math::fourier::FourierBasis;
use series_math::regression::{predict_row, ridge_least_squares};
use series_math::stats::{max_abs, root_mean_square};

const MODEL_NAME: &str = "Additive seasonal-trend";

pub const WEEKLY_PERIOD: f64 = 7.0;
pub const YEARLY_PERIOD: f64 = 365.25;

/// Days from 0001-01-01 to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Ridge term applied to seasonal columns only
const SEASONAL_PENALTY: f64 = 1e-6;

/// Whether a seasonal cycle is modeled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seasonality {
    /// Modeled when the history spans at least two full periods
    #[default]
    Auto,
    /// Always modeled; fitting fails on a shorter history
    Enabled,
    /// Never modeled
    Disabled,
}

/// Additive model settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditiveConfig {
    pub weekly: Seasonality,
    pub yearly: Seasonality,
    /// Fourier pairs for the weekly cycle
    pub weekly_order: usize,
    /// Fourier pairs for the yearly cycle
    pub yearly_order: usize,
    /// Coverage of the uncertainty band, in (0, 1)
    pub interval_width: f64,
}

impl Default for AdditiveConfig {
    fn default() -> Self {
        Self {
            weekly: Seasonality::Auto,
            yearly: Seasonality::Auto,
            weekly_order: 3,
            yearly_order: 10,
            interval_width: 0.80,
        }
    }
}

/// Linear-growth additive seasonal model
#[derive(Debug, Clone)]
pub struct AdditiveSeasonalModel {
    config: AdditiveConfig,
    z_score: f64,
}

/// Fitted additive model
#[derive(Debug, Clone)]
pub struct FittedAdditiveModel {
    history: Vec<NaiveDate>,
    t0: NaiveDate,
    t_span: f64,
    y_scale: f64,
    weekly: Option<FourierBasis>,
    yearly: Option<FourierBasis>,
    coefficients: Vec<f64>,
    sigma: f64,
    z_score: f64,
}

impl AdditiveSeasonalModel {
    /// Create a model, validating the configuration
    pub fn new(config: AdditiveConfig) -> Result<Self> {
        if config.weekly_order == 0 || config.yearly_order == 0 {
            return Err(ForecastError::InvalidParameter(
                "Fourier orders must be at least 1".to_string(),
            ));
        }
        let z_score = interval_z_score(config.interval_width)?;

        Ok(Self { config, z_score })
    }

    pub fn config(&self) -> &AdditiveConfig {
        &self.config
    }

    /// Observations required before fitting is attempted
    ///
    /// Two full weekly periods whenever the weekly cycle may be modeled.
    pub fn min_observations(&self) -> usize {
        match self.config.weekly {
            Seasonality::Disabled => 2,
            _ => (2.0 * WEEKLY_PERIOD).ceil() as usize,
        }
    }

    fn resolve(
        &self,
        label: &str,
        mode: Seasonality,
        period: f64,
        order: usize,
        series: &Series,
    ) -> Result<Option<FourierBasis>> {
        let long_enough = series.span_days() as f64 >= 2.0 * period.floor();
        // A cycle shorter than the sampling interval can't be observed
        let resolvable = series.mean_gap_days() < period;

        let active = match mode {
            Seasonality::Disabled => false,
            Seasonality::Auto => long_enough && resolvable,
            Seasonality::Enabled if long_enough => true,
            Seasonality::Enabled => {
                return Err(ForecastError::ModelFit(format!(
                    "{} seasonality needs a history of at least {} days, got {}",
                    label,
                    2.0 * period.floor(),
                    series.span_days()
                )))
            }
        };

        if active {
            log::debug!("Modeling {} seasonality with order {}", label, order);
            Ok(Some(FourierBasis::new(period, order)?))
        } else {
            Ok(None)
        }
    }
}

impl ForecastModel for AdditiveSeasonalModel {
    type Fitted = FittedAdditiveModel;

    fn fit(&self, series: &Series) -> Result<Self::Fitted> {
        check_fit_policy(series, self.min_observations())?;

        let weekly = self.resolve(
            "weekly",
            self.config.weekly,
            WEEKLY_PERIOD,
            self.config.weekly_order,
            series,
        )?;
        let yearly = self.resolve(
            "yearly",
            self.config.yearly,
            YEARLY_PERIOD,
            self.config.yearly_order,
            series,
        )?;

        let history = series.timestamps();
        let values = series.values();
        let t0 = history[0];
        let t_span = series.span_days() as f64;
        let y_scale = max_abs(&values)?;

        let mut fitted = FittedAdditiveModel {
            history,
            t0,
            t_span,
            y_scale,
            weekly,
            yearly,
            coefficients: Vec::new(),
            sigma: 0.0,
            z_score: self.z_score,
        };

        let design: Vec<Vec<f64>> = fitted.history.iter().map(|d| fitted.design_row(*d)).collect();
        let scaled: Vec<f64> = values.iter().map(|v| v / y_scale).collect();
        let mut penalties = vec![SEASONAL_PENALTY; design[0].len()];
        penalties[0] = 0.0;
        penalties[1] = 0.0;

        fitted.coefficients = ridge_least_squares(&design, &scaled, &penalties)?;

        let residuals: Vec<f64> = design
            .iter()
            .zip(&values)
            .map(|(row, y)| y - predict_row(row, &fitted.coefficients) * y_scale)
            .collect();
        fitted.sigma = root_mean_square(&residuals)?;

        log::debug!(
            "Fit {} on {} points: slope/day {:.6}, residual sigma {:.6}",
            MODEL_NAME,
            fitted.history.len(),
            fitted.coefficients[1] * y_scale / t_span,
            fitted.sigma
        );

        Ok(fitted)
    }

    fn name(&self) -> &str {
        MODEL_NAME
    }
}

impl FittedAdditiveModel {
    fn epoch_days(date: NaiveDate) -> f64 {
        (date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE) as f64
    }

    fn design_row(&self, date: NaiveDate) -> Vec<f64> {
        let t = (date - self.t0).num_days() as f64 / self.t_span;
        let days = Self::epoch_days(date);

        let mut row = vec![1.0, t];
        for basis in [self.weekly, self.yearly].iter().flatten() {
            row.extend(basis.features(days));
        }
        row
    }

    /// (trend, weekly, yearly) at `date`, in price units
    fn components_at(&self, date: NaiveDate) -> (f64, Option<f64>, Option<f64>) {
        let row = self.design_row(date);
        let beta = &self.coefficients;

        let trend = (row[0] * beta[0] + row[1] * beta[1]) * self.y_scale;

        let mut offset = 2;
        let mut block = |basis: &Option<FourierBasis>| {
            basis.map(|b| {
                let end = offset + b.width();
                let value = predict_row(&row[offset..end], &beta[offset..end]) * self.y_scale;
                offset = end;
                value
            })
        };
        let weekly = block(&self.weekly);
        let yearly = block(&self.yearly);

        (trend, weekly, yearly)
    }

    /// Residual standard deviation of the in-sample fit
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Trend slope in price units per calendar day
    pub fn slope_per_day(&self) -> f64 {
        self.coefficients[1] * self.y_scale / self.t_span
    }

    pub fn has_weekly(&self) -> bool {
        self.weekly.is_some()
    }

    pub fn has_yearly(&self) -> bool {
        self.yearly.is_some()
    }
}

impl FittedModel for FittedAdditiveModel {
    fn predict(&self, horizon_days: usize) -> Result<Forecast> {
        let timestamps = forecast_timestamps(&self.history, horizon_days)?;
        let last = self.history[self.history.len() - 1];

        let mut points = Vec::with_capacity(timestamps.len());
        let mut trend = Vec::with_capacity(timestamps.len());
        let mut weekly = self.weekly.map(|_| Vec::with_capacity(timestamps.len()));
        let mut yearly = self.yearly.map(|_| Vec::with_capacity(timestamps.len()));

        for date in timestamps {
            let (tr, wk, yr) = self.components_at(date);
            let estimate = tr + wk.unwrap_or(0.0) + yr.unwrap_or(0.0);

            let ahead = (date - last).num_days().max(0) as f64;
            let half_width = self.z_score * self.sigma * (1.0 + ahead / self.t_span).sqrt();
            points.push(ForecastPoint::symmetric(date, estimate, half_width));

            trend.push(tr);
            if let (Some(col), Some(v)) = (weekly.as_mut(), wk) {
                col.push(v);
            }
            if let (Some(col), Some(v)) = (yearly.as_mut(), yr) {
                col.push(v);
            }
        }

        Forecast::new(
            MODEL_NAME,
            last,
            horizon_days,
            points,
            Some(ComponentFrame {
                trend,
                weekly,
                yearly,
            }),
        )
    }

    fn name(&self) -> &str {
        MODEL_NAME
    }
}
