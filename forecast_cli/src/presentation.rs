//! Text and JSON rendering of a finished run

use polars::prelude::*;
use stock_forecast::{Forecast, ForecastRun};

/// Forecast rows as a `ds, yhat, yhat_lower, yhat_upper` frame
pub fn forecast_frame(forecast: &Forecast) -> PolarsResult<DataFrame> {
    let points = forecast.points();
    let ds: Vec<String> = points.iter().map(|p| p.timestamp.to_string()).collect();
    let yhat: Vec<f64> = points.iter().map(|p| p.point_estimate).collect();
    let lower: Vec<f64> = points.iter().map(|p| p.lower_bound).collect();
    let upper: Vec<f64> = points.iter().map(|p| p.upper_bound).collect();

    DataFrame::new(vec![
        Series::new("ds", ds),
        Series::new("yhat", yhat),
        Series::new("yhat_lower", lower),
        Series::new("yhat_upper", upper),
    ])
}

/// Additive components as a frame; `None` for models that expose none
pub fn components_frame(forecast: &Forecast) -> PolarsResult<Option<DataFrame>> {
    let components = match forecast.components() {
        Some(c) => c,
        None => return Ok(None),
    };

    let ds: Vec<String> = forecast
        .points()
        .iter()
        .map(|p| p.timestamp.to_string())
        .collect();
    let mut columns = vec![
        Series::new("ds", ds),
        Series::new("trend", components.trend.clone()),
    ];
    if let Some(weekly) = &components.weekly {
        columns.push(Series::new("weekly", weekly.clone()));
    }
    if let Some(yearly) = &components.yearly {
        columns.push(Series::new("yearly", yearly.clone()));
    }

    DataFrame::new(columns).map(Some)
}

/// Human-readable report: forecast head and tail, components, then metrics
pub fn render_text(run: &ForecastRun, rows: usize) -> PolarsResult<String> {
    let forecast = run.forecast();
    let frame = forecast_frame(forecast)?;
    let mut out = format!(
        "{} | {} | {} observations, {} day horizon\n",
        run.symbol(),
        forecast.model_name(),
        run.series().len(),
        run.horizon_days()
    );
    out.push_str("\nForecast Data\n");
    out.push_str(&format!("{}\n{}\n", frame.head(Some(rows)), frame.tail(Some(rows))));

    if let Some(components) = components_frame(forecast)? {
        out.push_str("\nForecast Components\n");
        out.push_str(&format!("{}\n", components.tail(Some(rows))));
    }

    out.push_str(&format!("\n{}\n", run.metrics()));
    Ok(out)
}
