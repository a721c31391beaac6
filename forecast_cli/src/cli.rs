//! Command line arguments

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Forecast a stock price series and report in-sample accuracy
#[derive(Parser, Debug, Clone)]
#[command(name = "stock-forecast", version, about)]
pub struct Cli {
    /// Ticker symbol, e.g. AAPL
    #[arg(long, default_value = "RACE")]
    pub symbol: String,

    /// First day of history (YYYY-MM-DD)
    #[arg(long, default_value = "2015-01-01")]
    pub start: NaiveDate,

    /// Day after the last day of history (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Forecast horizon: 1 year, 2 years, 3 years, 5 years, or a number of days
    #[arg(long)]
    pub horizon: Option<String>,

    /// Directory holding <SYMBOL>.csv files with a date,price header
    #[arg(long, conflicts_with = "synthetic")]
    pub data_dir: Option<PathBuf>,

    /// Use the seeded synthetic price generator instead of files
    #[arg(long, default_value_t = false)]
    pub synthetic: bool,

    /// Seed for --synthetic
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Model to fit (additive or holt); overrides the config file
    #[arg(long)]
    pub model: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the whole run as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Rows shown at each end of the forecast table
    #[arg(long, default_value_t = 5)]
    pub rows: usize,
}
