//! Price series handling for forecasting
//!
//! Raw rows come from a [`SeriesSource`] in whatever order and quality the
//! provider returns them. [`SeriesPreparer`] turns them into a [`Series`]:
//! chronologically ordered, one point per date, finite values only.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod source;
pub mod synthetic;

pub use source::{CsvSource, InMemorySource, SeriesSource};
pub use synthetic::SyntheticSource;

/// A row as supplied by a data source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Trading date
    #[serde(alias = "date", alias = "ds")]
    pub timestamp: NaiveDate,
    /// Adjusted close, absent when the provider has a hole
    #[serde(alias = "y", alias = "adj_close")]
    pub price: Option<f64>,
}

impl RawRow {
    /// Row with a price
    pub fn new(timestamp: NaiveDate, price: f64) -> Self {
        Self {
            timestamp,
            price: Some(price),
        }
    }

    /// Row without a price
    pub fn missing(timestamp: NaiveDate) -> Self {
        Self {
            timestamp,
            price: None,
        }
    }
}

/// A single observation of the series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObservedPoint {
    pub timestamp: NaiveDate,
    pub value: f64,
}

/// Chronologically ordered observations for one symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    points: Vec<ObservedPoint>,
}

impl Series {
    /// Build a series from points that already satisfy the ordering invariants
    ///
    /// Timestamps must be strictly increasing and every value finite.
    pub fn from_points(points: Vec<ObservedPoint>) -> Result<Self> {
        if let Some(bad) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(ForecastError::InvalidParameter(format!(
                "Non-finite value {} at {}",
                bad.value, bad.timestamp
            )));
        }
        if let Some(pair) = points
            .windows(2)
            .find(|w| w[0].timestamp >= w[1].timestamp)
        {
            return Err(ForecastError::InvalidParameter(format!(
                "Timestamps must be strictly increasing: {} is followed by {}",
                pair[0].timestamp, pair[1].timestamp
            )));
        }

        Ok(Self { points })
    }

    /// The observations in chronological order
    pub fn points(&self) -> &[ObservedPoint] {
        &self.points
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the timestamps as a vector
    pub fn timestamps(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    /// Get the values as a vector
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Earliest timestamp
    pub fn first_timestamp(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.timestamp)
    }

    /// Latest timestamp
    pub fn last_timestamp(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.timestamp)
    }

    /// Calendar days between the first and last observation
    pub fn span_days(&self) -> i64 {
        match (self.first_timestamp(), self.last_timestamp()) {
            (Some(first), Some(last)) => (last - first).num_days(),
            _ => 0,
        }
    }

    /// Mean number of calendar days between consecutive observations
    pub fn mean_gap_days(&self) -> f64 {
        if self.points.len() < 2 {
            return 1.0;
        }
        self.span_days() as f64 / (self.points.len() - 1) as f64
    }
}

/// What the preparer discarded while building a series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PreparationReport {
    /// Rows received from the source
    pub input_rows: usize,
    /// Rows with a missing, NaN or infinite price
    pub dropped_invalid: usize,
    /// Rows superseded by a later row with the same timestamp
    pub dropped_duplicates: usize,
}

/// Normalizes raw source rows into a [`Series`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesPreparer;

impl SeriesPreparer {
    /// Smallest series a model can be fit on
    pub const MIN_OBSERVATIONS: usize = 2;

    pub fn new() -> Self {
        Self
    }

    /// Sort, clean and de-duplicate raw rows
    ///
    /// Rows without a finite price are dropped first. When several remaining
    /// rows share a timestamp the one that came last in the input wins.
    pub fn prepare(&self, raw_rows: &[RawRow]) -> Result<Series> {
        self.prepare_with_report(raw_rows).map(|(series, _)| series)
    }

    /// Same as [`prepare`](Self::prepare), also returning what was dropped
    pub fn prepare_with_report(&self, raw_rows: &[RawRow]) -> Result<(Series, PreparationReport)> {
        let mut rows: Vec<ObservedPoint> = raw_rows
            .iter()
            .filter_map(|row| match row.price {
                Some(value) if value.is_finite() => Some(ObservedPoint {
                    timestamp: row.timestamp,
                    value,
                }),
                _ => None,
            })
            .collect();
        let dropped_invalid = raw_rows.len() - rows.len();

        // Stable, so equal timestamps keep their input order
        rows.sort_by_key(|p| p.timestamp);

        let valid_rows = rows.len();
        let mut points: Vec<ObservedPoint> = Vec::with_capacity(valid_rows);
        for point in rows {
            match points.last_mut() {
                Some(last) if last.timestamp == point.timestamp => *last = point,
                _ => points.push(point),
            }
        }

        let report = PreparationReport {
            input_rows: raw_rows.len(),
            dropped_invalid,
            dropped_duplicates: valid_rows - points.len(),
        };
        log::debug!(
            "Prepared {} of {} rows ({} invalid, {} duplicate)",
            points.len(),
            report.input_rows,
            report.dropped_invalid,
            report.dropped_duplicates
        );
        if report.dropped_invalid > 0 || report.dropped_duplicates > 0 {
            log::warn!(
                "Dropped {} row(s) without a usable price and {} duplicate row(s)",
                report.dropped_invalid,
                report.dropped_duplicates
            );
        }

        if points.len() < Self::MIN_OBSERVATIONS {
            return Err(ForecastError::EmptySeries {
                observations: points.len(),
            });
        }

        Ok((Series { points }, report))
    }
}
