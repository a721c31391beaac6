//! `stock-forecast`: fit a model to a price history and print the result

mod cli;
mod presentation;

use anyhow::{bail, Context};
use clap::Parser;
use cli::Cli;
use std::process::ExitCode;
use stock_forecast::config::parse_horizon_days;
use stock_forecast::data::{CsvSource, SyntheticSource};
use stock_forecast::{
    ForecastConfig, ForecastOrchestrator, ForecastRequest, ForecastRun, ModelKind, SeriesSource,
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = match &cli.config {
        Some(path) => ForecastConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ForecastConfig::default(),
    };

    let kind = match &cli.model {
        Some(name) => name.parse::<ModelKind>()?,
        None => config.model,
    };
    let horizon_days = match &cli.horizon {
        Some(text) => parse_horizon_days(text)?,
        None => config.default_horizon.days(),
    };
    let end = cli
        .end
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let source: Box<dyn SeriesSource> = if cli.synthetic {
        log::info!("Using synthetic prices (seed {})", cli.seed);
        Box::new(SyntheticSource::new(cli.seed))
    } else if let Some(dir) = &cli.data_dir {
        log::info!("Reading prices from {}", dir.display());
        Box::new(CsvSource::new(dir))
    } else {
        bail!("No data source given, pass --data-dir <DIR> or --synthetic");
    };

    let request = ForecastRequest {
        symbol: cli.symbol.clone(),
        start: cli.start,
        end,
        horizon_days,
    };

    let run = execute(kind, &config, source.as_ref(), &request)?;

    if cli.json {
        Ok(run.to_json()?)
    } else {
        Ok(presentation::render_text(&run, cli.rows)?)
    }
}

fn execute(
    kind: ModelKind,
    config: &ForecastConfig,
    source: &dyn SeriesSource,
    request: &ForecastRequest,
) -> anyhow::Result<ForecastRun> {
    let run = match kind {
        ModelKind::Additive => {
            ForecastOrchestrator::new(config.additive_model()?).run_from_source(source, request)?
        }
        ModelKind::Holt => {
            ForecastOrchestrator::new(config.holt_model()?).run_from_source(source, request)?
        }
    };
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn synthetic_cli(extra: &[&str]) -> Cli {
        let mut args = vec![
            "stock-forecast",
            "--synthetic",
            "--start",
            "2021-01-01",
            "--end",
            "2023-01-01",
        ];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_synthetic_json_run() {
        let cli = synthetic_cli(&["--horizon", "30", "--json"]);
        let output = run(&cli).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["symbol"], "RACE");
        assert_eq!(value["horizon_days"], 30);
    }

    #[test]
    fn test_holt_text_run() {
        let cli = synthetic_cli(&["--model", "holt", "--horizon", "1 year"]);
        let output = run(&cli).unwrap();

        assert!(output.contains("Holt linear"));
        assert!(output.contains("Performance Metrics"));
    }

    #[test]
    fn test_missing_source_fails() {
        let cli = Cli::try_parse_from(["stock-forecast"]).unwrap();
        assert!(run(&cli).is_err());
    }

    #[test]
    fn test_horizon_beyond_calendar_fails() {
        let cli = synthetic_cli(&["--horizon", "18446744073709551615"]);
        assert!(run(&cli).is_err());
    }

    #[test]
    fn test_unknown_model_fails() {
        let cli = synthetic_cli(&["--model", "arima"]);
        assert!(run(&cli).is_err());
    }
}
