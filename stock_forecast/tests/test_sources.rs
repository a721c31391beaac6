use chrono::{Datelike, NaiveDate, Weekday};
use pretty_assertions::assert_eq;
use std::fs::File;
use std::io::Write;
use stock_forecast::data::{CsvSource, InMemorySource, RawRow, SeriesSource, SyntheticSource};
use stock_forecast::ForecastError;
use tempfile::tempdir;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn write_csv(dir: &std::path::Path, symbol: &str, lines: &[&str]) {
    let mut file = File::create(dir.join(format!("{}.csv", symbol))).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
}

#[test]
fn test_csv_source_reads_range() {
    let dir = tempdir().unwrap();
    write_csv(
        dir.path(),
        "RACE",
        &[
            "date,price",
            "2023-01-02,100.0",
            "2023-01-03,",
            "2023-01-04,102.5",
            "2023-01-05,103.0",
        ],
    );

    let source = CsvSource::new(dir.path());
    let rows = source
        .fetch("race", date("2023-01-02"), date("2023-01-05"))
        .unwrap();

    assert_eq!(
        rows,
        vec![
            RawRow::new(date("2023-01-02"), 100.0),
            RawRow::missing(date("2023-01-03")),
            RawRow::new(date("2023-01-04"), 102.5),
        ]
    );
}

#[test]
fn test_csv_source_unknown_symbol() {
    let dir = tempdir().unwrap();
    let source = CsvSource::new(dir.path());

    let result = source.fetch("NOPE", date("2023-01-01"), date("2024-01-01"));
    assert!(matches!(result, Err(ForecastError::DataUnavailable { .. })));
}

#[test]
fn test_csv_source_empty_range() {
    let dir = tempdir().unwrap();
    write_csv(dir.path(), "RACE", &["date,price", "2023-01-02,100.0"]);

    let source = CsvSource::new(dir.path());
    let result = source.fetch("RACE", date("2024-01-01"), date("2024-02-01"));
    assert!(matches!(result, Err(ForecastError::DataUnavailable { .. })));
}

#[test]
fn test_csv_source_malformed_file() {
    let dir = tempdir().unwrap();
    write_csv(dir.path(), "BAD", &["date,price", "not-a-date,abc"]);

    let source = CsvSource::new(dir.path());
    let result = source.fetch("BAD", date("2023-01-01"), date("2024-01-01"));
    assert!(matches!(result, Err(ForecastError::Csv(_))));
}

#[test]
fn test_in_memory_source() {
    let rows = vec![
        RawRow::new(date("2023-01-02"), 1.0),
        RawRow::new(date("2023-01-03"), 2.0),
    ];
    let source = InMemorySource::new().with_symbol("AAPL", rows.clone());

    assert_eq!(
        source
            .fetch("AAPL", date("2023-01-01"), date("2023-02-01"))
            .unwrap(),
        rows
    );
    assert!(matches!(
        source.fetch("MSFT", date("2023-01-01"), date("2023-02-01")),
        Err(ForecastError::DataUnavailable { .. })
    ));
    // End is exclusive
    assert!(matches!(
        source.fetch("AAPL", date("2023-01-01"), date("2023-01-02")),
        Err(ForecastError::DataUnavailable { .. })
    ));
}

#[test]
fn test_synthetic_source_is_deterministic() {
    let source = SyntheticSource::new(11);
    let a = source
        .fetch("RACE", date("2022-01-01"), date("2022-03-01"))
        .unwrap();
    let b = source
        .fetch("RACE", date("2022-01-01"), date("2022-03-01"))
        .unwrap();
    let other = source
        .fetch("AAPL", date("2022-01-01"), date("2022-03-01"))
        .unwrap();

    assert_eq!(a, b);
    assert_ne!(a, other);
    assert!(a
        .iter()
        .all(|r| !matches!(r.timestamp.weekday(), Weekday::Sat | Weekday::Sun)));
}

#[test]
fn test_synthetic_source_weekend_only_range() {
    let source = SyntheticSource::default();
    // 2023-01-07 is a Saturday
    let result = source.fetch("RACE", date("2023-01-07"), date("2023-01-09"));
    assert!(matches!(result, Err(ForecastError::DataUnavailable { .. })));
}
