//! Market data sources
//!
//! The pipeline treats retrieval as a black box behind [`SeriesSource`]. Sources
//! return rows in the half-open range `[start, end)` and never retry or cache.

use super::RawRow;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Supplies a date-indexed price series for a symbol
pub trait SeriesSource {
    /// Fetch rows with `start <= timestamp < end`
    ///
    /// Fails with [`ForecastError::DataUnavailable`] when the symbol is unknown
    /// or the range yields no rows.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawRow>>;
}

fn within_range(
    symbol: &str,
    rows: impl IntoIterator<Item = RawRow>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<RawRow>> {
    let rows: Vec<RawRow> = rows
        .into_iter()
        .filter(|r| r.timestamp >= start && r.timestamp < end)
        .collect();

    if rows.is_empty() {
        return Err(ForecastError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: format!("no rows between {} and {}", start, end),
        });
    }

    Ok(rows)
}

/// Reads `<dir>/<SYMBOL>.csv` files with a `date,price` header
#[derive(Debug, Clone)]
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the file backing `symbol`
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol.to_uppercase()))
    }

    /// Load every row of a CSV file
    pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut rows = Vec::new();
        for record in reader.deserialize::<RawRow>() {
            rows.push(record?);
        }

        Ok(rows)
    }
}

impl SeriesSource for CsvSource {
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawRow>> {
        let path = self.path_for(symbol);
        log::debug!("Reading {} from {}", symbol, path.display());

        let rows = match Self::read_rows(&path) {
            Ok(rows) => rows,
            Err(ForecastError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(ForecastError::DataUnavailable {
                    symbol: symbol.to_string(),
                    reason: format!("no data file at {}", path.display()),
                })
            }
            Err(e) => return Err(e),
        };

        within_range(symbol, rows, start, end)
    }
}

/// Symbol-keyed rows held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rows: HashMap<String, Vec<RawRow>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the rows for a symbol
    pub fn with_symbol(mut self, symbol: &str, rows: Vec<RawRow>) -> Self {
        self.rows.insert(symbol.to_uppercase(), rows);
        self
    }
}

impl SeriesSource for InMemorySource {
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawRow>> {
        let rows = self
            .rows
            .get(&symbol.to_uppercase())
            .ok_or_else(|| ForecastError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "unknown symbol".to_string(),
            })?;

        within_range(symbol, rows.iter().copied(), start, end)
    }
}
