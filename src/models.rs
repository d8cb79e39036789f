//! Core data structures for air quality observations.
//!
//! Defines pollutants and their units, the selectable map metrics, AQI
//! categories and the `Record` type held by the dataset store.

use crate::constants::{MONTH_ABBREVIATIONS, aqi_thresholds};
use crate::error::DashboardError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measured pollutants in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    Ozone,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "CO")]
    Co,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::Ozone,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
    ];

    /// Column name in the input file and dataset frame
    pub fn column(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::Ozone => "Ozone",
            Pollutant::No2 => "NO2",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => Unit::MicrogramsPerCubicMeter,
            Pollutant::Ozone | Pollutant::No2 | Pollutant::So2 => Unit::PartsPerBillion,
            Pollutant::Co => Unit::PartsPerMillion,
        }
    }

    /// Position in the canonical order
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Pollutant {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.column().eq_ignore_ascii_case(trimmed))
            .or_else(|| trimmed.eq_ignore_ascii_case("pm25").then_some(Pollutant::Pm25))
            .ok_or_else(|| DashboardError::UnknownPollutant {
                name: s.to_string(),
            })
    }
}

/// Concentration units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "µg/m³")]
    MicrogramsPerCubicMeter,
    #[serde(rename = "ppb")]
    PartsPerBillion,
    #[serde(rename = "ppm")]
    PartsPerMillion,
}

impl Unit {
    pub const ALL: [Unit; 3] = [
        Unit::MicrogramsPerCubicMeter,
        Unit::PartsPerBillion,
        Unit::PartsPerMillion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Unit::MicrogramsPerCubicMeter => "µg/m³",
            Unit::PartsPerBillion => "ppb",
            Unit::PartsPerMillion => "ppm",
        }
    }

    /// Pollutants measured in this unit, in canonical order
    pub fn pollutants(&self) -> Vec<Pollutant> {
        Pollutant::ALL
            .into_iter()
            .filter(|p| p.unit() == *self)
            .collect()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "µg/m³" | "ug/m3" | "ug/m^3" => Ok(Unit::MicrogramsPerCubicMeter),
            "ppb" => Ok(Unit::PartsPerBillion),
            "ppm" => Ok(Unit::PartsPerMillion),
            _ => Err(DashboardError::UnknownUnit {
                name: s.to_string(),
            }),
        }
    }
}

/// Value shown on the choropleth: a pollutant or the AQI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Pollutant(Pollutant),
    Aqi,
}

impl Metric {
    /// Selector order of the map tab
    pub const ALL: [Metric; 7] = [
        Metric::Pollutant(Pollutant::Pm25),
        Metric::Aqi,
        Metric::Pollutant(Pollutant::Pm10),
        Metric::Pollutant(Pollutant::Co),
        Metric::Pollutant(Pollutant::So2),
        Metric::Pollutant(Pollutant::No2),
        Metric::Pollutant(Pollutant::Ozone),
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Metric::Pollutant(p) => p.column(),
            Metric::Aqi => crate::constants::columns::AQI,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("aqi") {
            return Ok(Metric::Aqi);
        }
        s.parse::<Pollutant>()
            .map(Metric::Pollutant)
            .map_err(|_| DashboardError::UnknownMetric {
                name: s.to_string(),
            })
    }
}

impl From<Pollutant> for Metric {
    fn from(pollutant: Pollutant) -> Self {
        Metric::Pollutant(pollutant)
    }
}

/// AQI severity bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// Categorize an AQI value. Missing values fall into the last band.
    pub fn from_aqi(aqi: Option<f64>) -> Self {
        match aqi {
            Some(v) if v <= aqi_thresholds::GOOD => AqiCategory::Good,
            Some(v) if v <= aqi_thresholds::MODERATE => AqiCategory::Moderate,
            Some(v) if v <= aqi_thresholds::UNHEALTHY => AqiCategory::Unhealthy,
            Some(v) if v <= aqi_thresholds::VERY_UNHEALTHY => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }
}

/// Calendar month key used for monthly series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Compact sortable key: `year * 100 + month`
    pub fn key(&self) -> i32 {
        self.year * 100 + self.month as i32
    }

    pub fn from_key(key: i32) -> Self {
        Self {
            year: key.div_euclid(100),
            month: key.rem_euclid(100) as u32,
        }
    }

    /// First day of the month, used as the x position of monthly points
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

/// Abbreviated month name for a month number (1-12)
pub fn month_abbrev(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_ABBREVIATIONS.get(i as usize))
        .copied()
        .unwrap_or("?")
}

/// One air quality observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub country: String,
    pub city: String,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub ozone: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
    pub co: Option<f64>,
    pub aqi: Option<f64>,
}

impl Record {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::new(self.year(), self.month())
    }

    /// Day number counted from the common era; the per-day group key
    pub fn day_number(&self) -> i32 {
        self.date.num_days_from_ce()
    }

    pub fn value(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::Ozone => self.ozone,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
        }
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Pollutant(p) => self.value(p),
            Metric::Aqi => self.aqi,
        }
    }
}

/// Convert a day number produced by [`Record::day_number`] back to a date
pub fn date_from_day_number(day: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(day)
}
