//! Tests for the dataset store
//!
//! Shared fixtures live here and are reused by the tab and dashboard tests.

pub mod loader_tests;
pub mod query_tests;

use crate::dataset::Dataset;
use crate::models::Record;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Header line matching the expected input schema
pub const CSV_HEADER: &str = "Date,Country,City,PM2.5,PM10,Ozone,NO2,SO2,CO,AQI";

/// Create a record with the given PM2.5 value and derived values elsewhere
pub fn record(country: &str, city: &str, year: i32, month: u32, day: u32, pm25: f64) -> Record {
    Record {
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        country: country.to_string(),
        city: city.to_string(),
        pm25: Some(pm25),
        pm10: Some(pm25 * 2.0),
        ozone: Some(30.0),
        no2: Some(20.0),
        so2: Some(5.0),
        co: Some(0.5),
        aqi: Some(pm25 * 3.0),
    }
}

/// Small multi-country, multi-year dataset
///
/// - Testland: Testville and Alphaburg, 2019-2021
/// - Otherland: Otherton, 2020-2021
/// - Farland: Farville, 2021 only
pub fn sample_records() -> Vec<Record> {
    vec![
        record("Testland", "Testville", 2019, 1, 5, 40.0),
        record("Testland", "Testville", 2019, 6, 5, 30.0),
        record("Testland", "Alphaburg", 2019, 1, 9, 20.0),
        record("Testland", "Testville", 2020, 1, 5, 10.0),
        record("Testland", "Testville", 2020, 1, 20, 20.0),
        record("Testland", "Alphaburg", 2020, 2, 3, 60.0),
        record("Otherland", "Otherton", 2020, 1, 7, 80.0),
        record("Otherland", "Otherton", 2020, 3, 7, 90.0),
        record("Testland", "Testville", 2021, 4, 1, 25.0),
        record("Otherland", "Otherton", 2021, 4, 2, 35.0),
        record("Farland", "Farville", 2021, 4, 3, 5.0),
    ]
}

pub fn sample_dataset() -> Dataset {
    Dataset::from_records(sample_records()).unwrap()
}

/// Write CSV rows (without header) to a temporary file
pub fn write_csv(temp_dir: &TempDir, rows: &[&str]) -> PathBuf {
    let path = temp_dir.path().join("air_quality.csv");
    let mut content = String::from(CSV_HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}
