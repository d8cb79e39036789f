//! Tests for CSV ingestion and coercion

use super::*;
use crate::dataset::loader::{parse_date, read_records};
use crate::error::DashboardError;
use std::fs;

#[test]
fn test_parse_date_formats() {
    let expected = NaiveDate::from_ymd_opt(2020, 3, 14).unwrap();
    assert_eq!(parse_date("14-03-2020"), Some(expected));
    assert_eq!(parse_date("2020-03-14"), Some(expected));
    assert_eq!(parse_date("14/03/2020"), Some(expected));
    assert_eq!(parse_date("2020/03/14"), Some(expected));
    assert_eq!(parse_date("14.03.2020"), Some(expected));
    assert_eq!(parse_date("2020-03-14 08:30:00"), Some(expected));
    assert_eq!(parse_date(" 14-03-2020 "), Some(expected));
}

#[test]
fn test_parse_date_rejects_garbage() {
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("not a date"), None);
    assert_eq!(parse_date("31-02-2020"), None);
}

#[test]
fn test_load_drops_invalid_dates() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        &[
            "05-01-2020,Testland,Testville,10,20,30,40,5,0.5,50",
            "bogus,Testland,Testville,11,20,30,40,5,0.5,50",
            "06-01-2020,Testland,Testville,12,20,30,40,5,0.5,55",
        ],
    );

    let dataset = Dataset::load(&path).unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.load_stats().rows_read, 3);
    assert_eq!(dataset.load_stats().dropped_invalid_date, 1);
    assert_eq!(dataset.source(), Some(path.as_path()));
    assert!(dataset.records().iter().all(|r| r.year() == 2020));
}

#[test]
fn test_load_coerces_malformed_numbers_to_missing() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        &["05-01-2020,Testland,Testville,n/a,20,,40,5,0.5,high"],
    );

    let (records, stats) = read_records(&path).unwrap();

    assert_eq!(stats.rows_retained, 1);
    assert_eq!(records[0].pm25, None);
    assert_eq!(records[0].pm10, Some(20.0));
    assert_eq!(records[0].ozone, None);
    assert_eq!(records[0].aqi, None);
}

#[test]
fn test_load_drops_rows_without_location() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        &[
            "05-01-2020,,Testville,10,20,30,40,5,0.5,50",
            "05-01-2020,Testland,Testville,10,20,30,40,5,0.5,50",
        ],
    );

    let (records, stats) = read_records(&path).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(stats.dropped_missing_location, 1);
}

#[test]
fn test_missing_file_is_load_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = Dataset::load(&temp_dir.path().join("absent.csv"));

    assert!(matches!(result, Err(DashboardError::DataLoad { .. })));
}

#[test]
fn test_missing_required_column() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no_aqi.csv");
    fs::write(
        &path,
        "Date,Country,City,PM2.5,PM10,Ozone,NO2,SO2,CO\n05-01-2020,Testland,Testville,1,2,3,4,5,6\n",
    )
    .unwrap();

    match Dataset::load(&path) {
        Err(DashboardError::MissingColumn { column, .. }) => assert_eq!(column, "AQI"),
        other => panic!("expected missing column error, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn test_no_parseable_dates() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        &[
            "someday,Testland,Testville,10,20,30,40,5,0.5,50",
            "never,Testland,Testville,10,20,30,40,5,0.5,50",
        ],
    );

    match Dataset::load(&path) {
        Err(DashboardError::NoParseableDates { rows, .. }) => assert_eq!(rows, 2),
        other => panic!("expected no parseable dates, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn test_rows_without_location_reported_separately() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        &[
            "2020-01-05,,Testville,10,20,30,40,5,0.5,50",
            "2020-01-06,Testland,,10,20,30,40,5,0.5,50",
            "never,Testland,Testville,10,20,30,40,5,0.5,50",
        ],
    );

    match Dataset::load(&path) {
        Err(DashboardError::NoLocatedRows { rows, .. }) => assert_eq!(rows, 3),
        other => panic!("expected no located rows, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn test_loaded_frame_has_derived_columns() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        &["14-03-2020,Testland,Testville,10,20,30,40,5,0.5,50"],
    );

    let dataset = Dataset::load(&path).unwrap();
    let frame = dataset.frame();

    for name in [
        "Country", "City", "Year", "Month", "YearMonth", "Day", "PM2.5", "PM10", "Ozone", "NO2",
        "SO2", "CO", "AQI",
    ] {
        assert!(frame.get_column_index(name).is_some(), "missing {name}");
    }
    assert_eq!(frame.height(), 1);
}
