//! # Stock Forecast
//!
//! A Rust library for forecasting a single stock price series and scoring the
//! forecast against the observed history.
//!
//! ## Features
//!
//! - Series preparation: sorting, gap dropping and duplicate resolution
//! - Pluggable forecasting models behind the [`ForecastModel`] trait
//!   (additive trend + weekly/yearly seasonality, Holt linear smoothing)
//! - Uncertainty bands around every prediction
//! - In-sample accuracy metrics (MAE, MSE, RMSE) on matched timestamps
//! - CSV, in-memory and synthetic data sources
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{Days, NaiveDate};
//! use stock_forecast::models::additive::{AdditiveConfig, AdditiveSeasonalModel};
//! use stock_forecast::{ForecastOrchestrator, RawRow};
//!
//! let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//! let rows: Vec<RawRow> = (0..60u64)
//!     .map(|i| RawRow::new(start + Days::new(i), 100.0 + 0.5 * i as f64))
//!     .collect();
//!
//! let model = AdditiveSeasonalModel::new(AdditiveConfig::default())?;
//! let run = ForecastOrchestrator::new(model).run("RACE", &rows, 30)?;
//!
//! assert_eq!(run.forecast().future().len(), 30);
//! assert!(run.metrics().mean_absolute_error < 1e-6);
//! # Ok::<(), stock_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod orchestrator;

// Re-export commonly used types
pub use crate::config::{ForecastConfig, HorizonPreset, ModelKind};
pub use crate::data::{ObservedPoint, RawRow, Series, SeriesPreparer, SeriesSource};
pub use crate::error::{ForecastError, Result};
pub use crate::metrics::{MetricsEvaluator, MetricsReport};
pub use crate::models::{FittedModel, Forecast, ForecastModel, ForecastPoint};
pub use crate::orchestrator::{ForecastOrchestrator, ForecastRequest, ForecastRun};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
