//! Tests for the dashboard shell

pub mod player_tests;

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::dataset::tests::sample_dataset;

/// Dashboard over the sample dataset with shape-less map regions
pub fn sample_dashboard(config: DashboardConfig) -> Dashboard {
    Dashboard::new(sample_dataset(), config, None).unwrap()
}
