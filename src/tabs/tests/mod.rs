//! Tests for the dashboard tabs
//!
//! Every test builds its tab over the shared sample dataset from
//! `crate::dataset::tests`.

pub mod grouped_bar_tests;
pub mod heatmap_tests;
pub mod regional_tests;
pub mod scatter_tests;
pub mod time_series_tests;

use crate::tabs::TabKind;

#[test]
fn test_tab_kind_parses_slug_and_title() {
    assert_eq!("time-series".parse::<TabKind>().unwrap(), TabKind::TimeSeries);
    assert_eq!("Pollutants Map".parse::<TabKind>().unwrap(), TabKind::Map);
    assert_eq!(" BOX-PLOT ".parse::<TabKind>().unwrap(), TabKind::BoxPlot);
    assert!("pie".parse::<TabKind>().is_err());
}

#[test]
fn test_tab_kinds_in_display_order() {
    let titles: Vec<&str> = TabKind::ALL.iter().map(TabKind::title).collect();
    assert_eq!(
        titles,
        vec![
            "Scatter Plot",
            "Regional Trends",
            "Heatmap",
            "Time-Series Trends",
            "Grouped Bar Chart",
            "Pollutants Map",
            "Box Plot",
            "Stacked Area Chart",
        ]
    );
}
