use chrono::{Days, NaiveDate};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use stock_forecast::data::{InMemorySource, RawRow, Series, SyntheticSource};
use stock_forecast::models::additive::{AdditiveConfig, AdditiveSeasonalModel, FittedAdditiveModel};
use stock_forecast::models::holt::{FittedHoltModel, HoltConfig, HoltLinearModel};
use stock_forecast::models::{FittedModel, Forecast, ForecastModel};
use stock_forecast::{ForecastError, ForecastOrchestrator, ForecastRequest, ForecastRun, Result};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 3).unwrap()
}

fn linear_rows(n: u64) -> Vec<RawRow> {
    (0..n)
        .map(|i| RawRow::new(start() + Days::new(i), 120.0 + 0.25 * i as f64))
        .collect()
}

fn additive() -> AdditiveSeasonalModel {
    AdditiveSeasonalModel::new(AdditiveConfig::default()).unwrap()
}

#[test]
fn test_full_forecast_workflow() {
    let orchestrator = ForecastOrchestrator::new(additive());
    let run = orchestrator.run("RACE", &linear_rows(365), 30).unwrap();

    assert_eq!(run.symbol(), "RACE");
    assert_eq!(run.horizon_days(), 30);
    assert_eq!(run.series().len(), 365);
    assert_eq!(run.forecast().len(), 395);
    assert_eq!(run.forecast().future().len(), 30);

    let metrics = run.metrics();
    assert_eq!(metrics.matched_points, 365);
    assert!(metrics.mean_absolute_error < 1e-6);
    assert!(metrics.mean_squared_error < 1e-9);
    assert!(metrics.root_mean_squared_error < 1e-6);

    let last = run.forecast().future().last().unwrap();
    let expected = 120.0 + 0.25 * 394.0;
    assert!((last.point_estimate - expected).abs() < 1e-4);
}

#[test]
fn test_run_with_holt_model() {
    let model = HoltLinearModel::new(HoltConfig::default()).unwrap();
    let run = ForecastOrchestrator::new(model)
        .run("RACE", &linear_rows(100), 10)
        .unwrap();

    assert_eq!(run.forecast().future().len(), 10);
    assert!(run.metrics().mean_absolute_error < 1e-9);
}

#[test]
fn test_run_propagates_empty_series() {
    let orchestrator = ForecastOrchestrator::new(additive());
    let rows = vec![RawRow::new(start(), 1.0)];

    assert!(matches!(
        orchestrator.run("RACE", &rows, 30),
        Err(ForecastError::EmptySeries { observations: 1 })
    ));
}

#[test]
fn test_run_propagates_model_fit_error() {
    let orchestrator = ForecastOrchestrator::new(additive());
    let rows: Vec<RawRow> = (0..30)
        .map(|i| RawRow::new(start() + Days::new(i), 50.0))
        .collect();

    assert!(matches!(
        orchestrator.run("RACE", &rows, 30),
        Err(ForecastError::ModelFit(_))
    ));
}

#[test]
fn test_run_from_source() {
    let source = InMemorySource::new().with_symbol("RACE", linear_rows(200));
    let request = ForecastRequest {
        symbol: "RACE".to_string(),
        start: start(),
        end: start() + Days::new(100),
        horizon_days: 7,
    };

    let run = ForecastOrchestrator::new(additive())
        .run_from_source(&source, &request)
        .unwrap();

    assert_eq!(run.series().len(), 100);
    assert_eq!(run.forecast().future().len(), 7);
}

#[test]
fn test_run_from_source_propagates_unavailable_data() {
    let source = InMemorySource::new();
    let request = ForecastRequest {
        symbol: "NOPE".to_string(),
        start: start(),
        end: start() + Days::new(100),
        horizon_days: 7,
    };

    assert!(matches!(
        ForecastOrchestrator::new(additive()).run_from_source(&source, &request),
        Err(ForecastError::DataUnavailable { .. })
    ));
}

#[test]
fn test_synthetic_run_serializes() {
    let source = SyntheticSource::new(1);
    let request = ForecastRequest {
        symbol: "RACE".to_string(),
        start: start(),
        end: start() + Days::new(3 * 365),
        horizon_days: 365,
    };

    let run = ForecastOrchestrator::new(additive())
        .run_from_source(&source, &request)
        .unwrap();
    let json = run.to_json().unwrap();

    assert!(json.contains("\"symbol\": \"RACE\""));
    assert!(json.contains("\"root_mean_squared_error\""));
    assert!(run.metrics().root_mean_squared_error > 0.0);
}

#[derive(Debug, Clone, Default)]
struct CountingModel {
    fits: std::rc::Rc<Cell<usize>>,
    predictions: std::rc::Rc<Cell<usize>>,
}

#[derive(Debug)]
struct CountingFitted {
    inner: <AdditiveSeasonalModel as ForecastModel>::Fitted,
    predictions: std::rc::Rc<Cell<usize>>,
}

impl ForecastModel for CountingModel {
    type Fitted = CountingFitted;

    fn fit(&self, series: &Series) -> Result<Self::Fitted> {
        self.fits.set(self.fits.get() + 1);
        Ok(CountingFitted {
            inner: additive().fit(series)?,
            predictions: self.predictions.clone(),
        })
    }

    fn name(&self) -> &str {
        "counting"
    }
}

impl FittedModel for CountingFitted {
    fn predict(&self, horizon_days: usize) -> Result<Forecast> {
        self.predictions.set(self.predictions.get() + 1);
        self.inner.predict(horizon_days)
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn test_run_fits_and_predicts_once() {
    let model = CountingModel::default();
    let orchestrator = ForecastOrchestrator::new(model.clone());

    orchestrator.run("RACE", &linear_rows(60), 5).unwrap();

    assert_eq!(model.fits.get(), 1);
    assert_eq!(model.predictions.get(), 1);
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_pipeline_types_are_send_sync() {
    assert_send_sync::<ForecastRun>();
    assert_send_sync::<Forecast>();
    assert_send_sync::<Series>();
    assert_send_sync::<FittedAdditiveModel>();
    assert_send_sync::<FittedHoltModel>();
    assert_send_sync::<AdditiveSeasonalModel>();
    assert_send_sync::<HoltLinearModel>();
    assert_send_sync::<ForecastOrchestrator<AdditiveSeasonalModel>>();
    assert_send_sync::<ForecastError>();
}
