//! Air-quality dashboard library
//!
//! Loads a tabular file of pollutant observations and serves an eight-tab
//! dashboard over it. Every widget change recomputes an aggregate view with
//! polars and rebinds the affected charts in one step:
//!
//! - Scatter of AQI against PM2.5 over a seeded sample
//! - Regional AQI trends per country
//! - Yearly and monthly country heatmaps
//! - Monthly time series for up to three cities
//! - Grouped bars of every pollutant per country
//! - Choropleth map with a year animation
//! - Monthly box plots per city
//! - Stacked daily areas per unit
//!
//! The [`Dashboard`] shell owns the tabs, the map animation and the reset
//! snapshot. Chart state is plain data ([`ChartBinding`]) that serializes
//! to JSON for any rendering front end.

pub mod animation;
pub mod binding;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod models;
pub mod selection;
pub mod stats;
pub mod tabs;
pub mod view;

pub use binding::{ChartBinding, ChartFrame};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardEvent, Effect, MapEvent};
pub use dataset::Dataset;
pub use error::{DashboardError, Result};
pub use geo::Boundaries;
pub use models::{Metric, Pollutant, Record, Unit};
pub use tabs::TabKind;
