//! Error handling for dashboard operations.
//!
//! Provides error types with context for dataset loading, boundary parsing,
//! widget selections and chart data construction.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Failed to load dataset from {path}: {reason}")]
    DataLoad { path: PathBuf, reason: String },

    #[error("Dataset {path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Dataset {path} has no parseable dates ({rows} rows read)")]
    NoParseableDates { path: PathBuf, rows: usize },

    #[error("Dataset {path} has no rows with both a country and a city ({rows} rows read)")]
    NoLocatedRows { path: PathBuf, rows: usize },

    #[error("Unknown pollutant: {name}")]
    UnknownPollutant { name: String },

    #[error("Unknown unit: {name}")]
    UnknownUnit { name: String },

    #[error("Unknown metric: {name}")]
    UnknownMetric { name: String },

    #[error("Invalid selection for {widget}: '{value}' is not an available option")]
    InvalidSelection { widget: String, value: String },

    #[error("Column '{column}' has {found} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid boundary file {path}: {reason}")]
    Boundaries { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DashboardError {
    /// Create an invalid selection error for a named widget
    pub fn invalid_selection(widget: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidSelection {
            widget: widget.into(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
