//! In-memory dataset store.
//!
//! Holds the loaded observations as typed records alongside a normalized
//! polars frame with derived calendar columns. The store is read-only after
//! load; every view model reads from it through [`Dataset::filtered`] or
//! [`Dataset::query`].

pub mod loader;
pub mod query;

#[cfg(test)]
pub mod tests;

pub use loader::LoadStats;
pub use query::RecordFilter;

use crate::constants::columns;
use crate::error::{DashboardError, Result};
use crate::models::{Pollutant, Record};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// Loaded air quality observations
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    frame: DataFrame,
    source: Option<PathBuf>,
    load_stats: LoadStats,
}

impl Dataset {
    /// Load and normalize a CSV file
    pub fn load(path: &Path) -> Result<Self> {
        let (records, load_stats) = loader::read_records(path)?;
        let mut dataset = Self::from_records(records)?;
        dataset.source = Some(path.to_path_buf());
        dataset.load_stats = load_stats;

        info!(
            "Loaded {} observations from {} ({} countries, {} cities, years {}-{})",
            dataset.len(),
            path.display(),
            dataset.countries().len(),
            dataset.cities().len(),
            dataset.min_year(),
            dataset.max_year()
        );

        Ok(dataset)
    }

    /// Build a dataset from already-parsed records
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        if records.is_empty() {
            return Err(DashboardError::DataLoad {
                path: PathBuf::from("<memory>"),
                reason: "dataset has no records".to_string(),
            });
        }

        let frame = build_frame(&records)?;
        let load_stats = LoadStats {
            rows_read: records.len(),
            rows_retained: records.len(),
            ..Default::default()
        };

        Ok(Self {
            records,
            frame,
            source: None,
            load_stats,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Normalized frame: Country, City, Year, Month, YearMonth, Day,
    /// the six pollutants and AQI
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn load_stats(&self) -> &LoadStats {
        &self.load_stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching the filter, in load order
    pub fn query(&self, filter: &RecordFilter) -> Vec<&Record> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Lazy view of the frame restricted by the filter
    pub fn filtered(&self, filter: &RecordFilter) -> LazyFrame {
        let lazy = self.frame.clone().lazy();
        match filter.to_expr() {
            Some(predicate) => lazy.filter(predicate),
            None => lazy,
        }
    }

    /// Distinct years, ascending
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(Record::year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn min_year(&self) -> i32 {
        self.records.iter().map(Record::year).min().unwrap_or_default()
    }

    pub fn max_year(&self) -> i32 {
        self.records.iter().map(Record::year).max().unwrap_or_default()
    }

    /// Distinct countries in first-appearance order
    pub fn countries(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|r| r.country.as_str()))
    }

    /// Distinct cities in first-appearance order
    pub fn cities(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|r| r.city.as_str()))
    }

    /// Distinct cities of one country in first-appearance order
    pub fn cities_of(&self, country: &str) -> Vec<String> {
        unique_in_order(
            self.records
                .iter()
                .filter(|r| r.country == country)
                .map(|r| r.city.as_str()),
        )
    }
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

fn build_frame(records: &[Record]) -> Result<DataFrame> {
    let countries: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
    let cities: Vec<&str> = records.iter().map(|r| r.city.as_str()).collect();
    let years: Vec<i32> = records.iter().map(Record::year).collect();
    let months: Vec<i32> = records.iter().map(|r| r.month() as i32).collect();
    let year_months: Vec<i32> = records.iter().map(|r| r.year_month().key()).collect();
    let days: Vec<i32> = records.iter().map(Record::day_number).collect();
    let aqi: Vec<Option<f64>> = records.iter().map(|r| r.aqi).collect();

    let mut frame = df!(
        columns::COUNTRY => countries,
        columns::CITY => cities,
        columns::YEAR => years,
        columns::MONTH => months,
        columns::YEAR_MONTH => year_months,
        columns::DAY => days,
    )?;

    for pollutant in Pollutant::ALL {
        let values: Vec<Option<f64>> = records.iter().map(|r| r.value(pollutant)).collect();
        frame.with_column(Series::new(pollutant.column().into(), values))?;
    }
    frame.with_column(Series::new(columns::AQI.into(), aqi))?;

    Ok(frame)
}
