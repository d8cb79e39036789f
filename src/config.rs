//! Configuration management and validation.
//!
//! Provides the dashboard configuration: animation timing, scatter
//! sampling, widget defaults and the city-selection cap.

use crate::constants::{
    DEFAULT_ANIMATION_INTERVAL_MS, DEFAULT_GROUPED_BAR_COUNTRIES, DEFAULT_MAX_SELECTED_CITIES,
    DEFAULT_SCATTER_SAMPLE_SIZE, DEFAULT_SCATTER_SEED,
};
use crate::error::{DashboardError, Result};
use crate::models::Unit;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Global configuration for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Map animation tick interval in milliseconds
    pub animation_interval_ms: u64,

    /// Number of observations sampled for the scatter plot
    pub scatter_sample_size: usize,

    /// Seed for the scatter sample, so the sample is stable across restarts
    pub scatter_seed: u64,

    /// Maximum number of cities in the time-series selection
    pub max_selected_cities: usize,

    /// Countries preselected in the grouped bar chart
    pub grouped_bar_countries: Vec<String>,

    /// Unit shown first in the stacked area chart
    pub initial_unit: Unit,

    /// Cities preselected in the time-series chart
    pub time_series_cities: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            animation_interval_ms: DEFAULT_ANIMATION_INTERVAL_MS,
            scatter_sample_size: DEFAULT_SCATTER_SAMPLE_SIZE,
            scatter_seed: DEFAULT_SCATTER_SEED,
            max_selected_cities: DEFAULT_MAX_SELECTED_CITIES,
            grouped_bar_countries: DEFAULT_GROUPED_BAR_COUNTRIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            initial_unit: Unit::MicrogramsPerCubicMeter,
            time_series_cities: Vec::new(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Set the animation tick interval
    pub fn with_animation_interval(mut self, interval: Duration) -> Self {
        self.animation_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Set scatter sample size and seed
    pub fn with_scatter_sample(mut self, size: usize, seed: u64) -> Self {
        self.scatter_sample_size = size;
        self.scatter_seed = seed;
        self
    }

    /// Set the city-selection cap
    pub fn with_max_selected_cities(mut self, max: usize) -> Self {
        self.max_selected_cities = max;
        self
    }

    /// Set the preselected grouped bar countries
    pub fn with_grouped_bar_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grouped_bar_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Set the initial stacked area unit
    pub fn with_initial_unit(mut self, unit: Unit) -> Self {
        self.initial_unit = unit;
        self
    }

    /// Set the preselected time-series cities
    pub fn with_time_series_cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_series_cities = cities.into_iter().map(Into::into).collect();
        self
    }

    pub fn animation_interval(&self) -> Duration {
        Duration::from_millis(self.animation_interval_ms)
    }

    /// Reject settings the dashboard cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.animation_interval_ms == 0 {
            return Err(DashboardError::Configuration {
                message: "animation_interval_ms must be greater than zero".to_string(),
            });
        }
        if self.scatter_sample_size == 0 {
            return Err(DashboardError::Configuration {
                message: "scatter_sample_size must be greater than zero".to_string(),
            });
        }
        if self.max_selected_cities == 0 {
            return Err(DashboardError::Configuration {
                message: "max_selected_cities must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
