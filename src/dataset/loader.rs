//! CSV ingestion with row coercion.
//!
//! Reads every column as text through the polars CSV reader, checks the
//! required schema, coerces numeric columns and dates, and drops rows whose
//! date (or location) cannot be recovered.

use crate::constants::{DATE_FORMATS, DATETIME_FORMATS, columns};
use crate::error::{DashboardError, Result};
use crate::models::{Pollutant, Record};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// Row accounting for a single load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows_read: usize,
    pub rows_retained: usize,
    pub dropped_invalid_date: usize,
    pub dropped_missing_location: usize,
}

impl LoadStats {
    pub fn rows_dropped(&self) -> usize {
        self.dropped_invalid_date + self.dropped_missing_location
    }
}

/// Read and coerce all records from a CSV file
pub fn read_records(path: &Path) -> Result<(Vec<Record>, LoadStats)> {
    if !path.is_file() {
        return Err(DashboardError::DataLoad {
            path: path.to_path_buf(),
            reason: "file not found or not a regular file".to_string(),
        });
    }

    // Schema inference is disabled so that every column arrives as text and
    // malformed cells are coerced per column instead of failing the read.
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| DashboardError::DataLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    for required in columns::REQUIRED {
        if frame.get_column_index(required).is_none() {
            return Err(DashboardError::MissingColumn {
                path: path.to_path_buf(),
                column: required.to_string(),
            });
        }
    }

    let dates = text_column(&frame, columns::DATE)?;
    let countries = text_column(&frame, columns::COUNTRY)?;
    let cities = text_column(&frame, columns::CITY)?;
    let mut pollutant_values = Vec::with_capacity(Pollutant::ALL.len());
    for pollutant in Pollutant::ALL {
        pollutant_values.push(numeric_column(&frame, pollutant.column())?);
    }
    let aqi = numeric_column(&frame, columns::AQI)?;

    let mut stats = LoadStats {
        rows_read: frame.height(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(frame.height());

    for row in 0..frame.height() {
        let Some(date) = dates[row].as_deref().and_then(parse_date) else {
            stats.dropped_invalid_date += 1;
            continue;
        };
        let (Some(country), Some(city)) = (non_blank(&countries[row]), non_blank(&cities[row]))
        else {
            stats.dropped_missing_location += 1;
            continue;
        };

        records.push(Record {
            date,
            country,
            city,
            pm25: pollutant_values[0][row],
            pm10: pollutant_values[1][row],
            ozone: pollutant_values[2][row],
            no2: pollutant_values[3][row],
            so2: pollutant_values[4][row],
            co: pollutant_values[5][row],
            aqi: aqi[row],
        });
    }

    stats.rows_retained = records.len();

    if records.is_empty() {
        let path = path.to_path_buf();
        let rows = stats.rows_read;
        return Err(if stats.dropped_missing_location > 0 {
            DashboardError::NoLocatedRows { path, rows }
        } else {
            DashboardError::NoParseableDates { path, rows }
        });
    }

    if stats.rows_dropped() > 0 {
        warn!(
            "Dropped {} of {} rows from {} ({} invalid dates, {} missing country/city)",
            stats.rows_dropped(),
            stats.rows_read,
            path.display(),
            stats.dropped_invalid_date,
            stats.dropped_missing_location
        );
    }
    debug!(
        "Read {} records from {}",
        stats.rows_retained,
        path.display()
    );

    Ok((records, stats))
}

/// Parse a textual date using the accepted formats
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn text_column(frame: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = frame.column(name)?.as_materialized_series();
    let values = series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

/// Non-strict cast to f64: unparseable and non-finite cells become missing
fn numeric_column(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = frame.column(name)?.as_materialized_series();
    let cast = series.cast(&DataType::Float64)?;
    let values = cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect();
    Ok(values)
}
