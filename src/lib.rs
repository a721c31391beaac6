//! # stock_forecast_workspace
//!
//! Umbrella crate re-exporting the forecasting pipeline and its numeric
//! helpers, so downstream code can depend on a single package.
//!
//! ## Example
//!
//! ```
//! use stock_forecast_workspace::prelude::*;
//! use chrono::{Days, NaiveDate};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let rows: Vec<RawRow> = (0..20u64)
//!     .map(|i| RawRow::new(start + Days::new(i), 50.0 + 0.5 * i as f64))
//!     .collect();
//!
//! let model = HoltLinearModel::new(HoltConfig::default())?;
//! let run = ForecastOrchestrator::new(model).run("DEMO", &rows, 7)?;
//! assert_eq!(run.forecast().future().len(), 7);
//! # Ok::<(), stock_forecast_workspace::ForecastError>(())
//! ```

pub use series_math;
pub use stock_forecast;

pub use stock_forecast::{ForecastError, Result};

/// Commonly used types in one import
pub mod prelude {
    pub use stock_forecast::config::{ForecastConfig, HorizonPreset, ModelKind};
    pub use stock_forecast::data::{
        CsvSource, InMemorySource, RawRow, Series, SeriesPreparer, SeriesSource, SyntheticSource,
    };
    pub use stock_forecast::metrics::{MetricsEvaluator, MetricsReport};
    pub use stock_forecast::models::additive::{AdditiveConfig, AdditiveSeasonalModel, Seasonality};
    pub use stock_forecast::models::holt::{HoltConfig, HoltLinearModel};
    pub use stock_forecast::models::{FittedModel, Forecast, ForecastModel, ForecastPoint};
    pub use stock_forecast::orchestrator::{ForecastOrchestrator, ForecastRequest, ForecastRun};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_wires_a_source_run() {
        let source = SyntheticSource::new(7);
        let request = ForecastRequest {
            symbol: "ABC".to_string(),
            start: chrono::NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            end: chrono::NaiveDate::from_ymd_opt(2022, 4, 1).unwrap(),
            horizon_days: 14,
        };
        let model = HoltLinearModel::new(HoltConfig::default()).unwrap();
        let run = ForecastOrchestrator::new(model)
            .run_from_source(&source, &request)
            .unwrap();

        assert_eq!(run.symbol(), "ABC");
        assert_eq!(run.forecast().future().len(), 14);
    }

    #[test]
    fn test_numeric_helpers_reexported() {
        let rms = crate::series_math::stats::root_mean_square(&[3.0, -4.0]).unwrap();
        assert!((rms - 12.5f64.sqrt()).abs() < 1e-12);
    }
}
