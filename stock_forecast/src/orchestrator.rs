//! Drives one forecasting run: prepare, fit, predict, evaluate

use crate::data::{RawRow, Series, SeriesPreparer, SeriesSource};
use crate::error::{ForecastError, Result};
use crate::metrics::{MetricsEvaluator, MetricsReport};
use crate::models::{FittedModel, Forecast, ForecastModel};
use chrono::NaiveDate;
use serde::Serialize;

/// Everything one run produced, handed to presentation as-is
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRun {
    symbol: String,
    series: Series,
    forecast: Forecast,
    metrics: MetricsReport,
    horizon_days: usize,
}

impl ForecastRun {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn forecast(&self) -> &Forecast {
        &self.forecast
    }

    pub fn metrics(&self) -> &MetricsReport {
        &self.metrics
    }

    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// Serialize the whole run for downstream consumers
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parameters of a source-backed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub symbol: String,
    /// Inclusive
    pub start: NaiveDate,
    /// Exclusive
    pub end: NaiveDate,
    pub horizon_days: usize,
}

/// Coordinates the pipeline stages for a single model
#[derive(Debug, Clone)]
pub struct ForecastOrchestrator<M: ForecastModel> {
    model: M,
    preparer: SeriesPreparer,
    evaluator: MetricsEvaluator,
}

impl<M: ForecastModel> ForecastOrchestrator<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            preparer: SeriesPreparer::new(),
            evaluator: MetricsEvaluator::new(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the pipeline on rows already in hand
    ///
    /// Fits and predicts exactly once. Any stage error is returned unchanged
    /// and no partial run is produced.
    pub fn run(&self, symbol: &str, raw_rows: &[RawRow], horizon_days: usize) -> Result<ForecastRun> {
        log::info!(
            "Forecasting {} over {} day(s) with {}",
            symbol,
            horizon_days,
            self.model.name()
        );

        let series = self.preparer.prepare(raw_rows)?;
        log::debug!(
            "{}: {} observations from {:?} to {:?}",
            symbol,
            series.len(),
            series.first_timestamp(),
            series.last_timestamp()
        );

        let fitted = self.model.fit(&series)?;
        let forecast = fitted.predict(horizon_days)?;
        log::debug!(
            "{}: {} forecast points ({} future)",
            symbol,
            forecast.len(),
            forecast.future().len()
        );

        let metrics = self
            .evaluator
            .score_points(series.points(), forecast.historical())?;
        log::info!(
            "{}: MAE {:.4}, RMSE {:.4} over {} points",
            symbol,
            metrics.mean_absolute_error,
            metrics.root_mean_squared_error,
            metrics.matched_points
        );

        Ok(ForecastRun {
            symbol: symbol.to_string(),
            series,
            forecast,
            metrics,
            horizon_days,
        })
    }

    /// Fetch rows for the request, then [`run`](Self::run)
    pub fn run_from_source<S: SeriesSource + ?Sized>(
        &self,
        source: &S,
        request: &ForecastRequest,
    ) -> Result<ForecastRun> {
        if request.symbol.trim().is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Symbol must not be empty".to_string(),
            ));
        }

        log::debug!(
            "Fetching {} from {} to {}",
            request.symbol,
            request.start,
            request.end
        );
        let rows = source.fetch(&request.symbol, request.start, request.end)?;
        self.run(&request.symbol, &rows, request.horizon_days)
    }
}
