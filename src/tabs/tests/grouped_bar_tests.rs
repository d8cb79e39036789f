//! Grouped bar tab tests

use crate::config::DashboardConfig;
use crate::dataset::tests::sample_dataset;
use crate::error::DashboardError;
use crate::tabs::{GroupedBarEvent, GroupedBarTab};

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_configured_countries_missing_from_dataset_are_dropped() {
    let dataset = sample_dataset();
    let tab = GroupedBarTab::new(&dataset, &DashboardConfig::default()).unwrap();

    assert!(tab.selection().countries.is_empty());
    assert_eq!(tab.selection().year, 2021);
    assert!(tab.binding().data().is_empty());
    assert_eq!(
        tab.binding().meta().title,
        "No data available for the selected countries in 2021"
    );
}

#[test]
fn test_year_without_data_for_selected_countries() {
    let dataset = sample_dataset();
    let config = DashboardConfig::default().with_grouped_bar_countries(["Farland"]);
    let mut tab = GroupedBarTab::new(&dataset, &config).unwrap();
    assert_eq!(tab.binding().meta().y_factors, vec!["Farland"]);

    tab.apply(&dataset, GroupedBarEvent::Year(2019)).unwrap();

    let binding = tab.binding();
    assert!(binding.data().is_empty());
    assert!(binding.meta().title.to_lowercase().contains("no data"));
    assert!(binding.meta().y_factors.is_empty());
    assert!(binding.meta().color_scale.is_none());
    assert_eq!(binding.renderers().len(), 6);

    tab.apply(&dataset, GroupedBarEvent::Year(2021)).unwrap();
    assert_eq!(
        tab.binding().meta().title,
        "Grouped Bar Chart: Pollutant Concentrations (2021)"
    );
}

#[test]
fn test_countries_sorted_by_pm25() {
    let dataset = sample_dataset();
    let config =
        DashboardConfig::default().with_grouped_bar_countries(["Testland", "Otherland", "Farland"]);
    let mut tab = GroupedBarTab::new(&dataset, &config).unwrap();

    assert_eq!(
        tab.binding().meta().y_factors,
        vec!["Otherland", "Testland", "Farland"]
    );
    assert_eq!(tab.binding().renderers().len(), 6);

    tab.apply(&dataset, GroupedBarEvent::Year(2020)).unwrap();

    let binding = tab.binding();
    assert_eq!(binding.meta().y_factors, vec!["Otherland", "Testland"]);
    assert_eq!(binding.data().numbers("PM2.5"), [Some(85.0), Some(30.0)]);
    assert_eq!(binding.data().numbers("CO"), [Some(0.5), Some(0.5)]);
}

#[test]
fn test_country_selection_event() {
    let dataset = sample_dataset();
    let mut tab = GroupedBarTab::new(&dataset, &DashboardConfig::default()).unwrap();

    tab.apply(&dataset, GroupedBarEvent::Countries(names(&["Farland", "Testland"])))
        .unwrap();

    assert_eq!(tab.binding().meta().y_factors, vec!["Testland", "Farland"]);

    let result = tab.apply(&dataset, GroupedBarEvent::Countries(names(&["Atlantis"])));
    assert!(matches!(result, Err(DashboardError::InvalidSelection { .. })));
    assert_eq!(tab.selection().countries, names(&["Farland", "Testland"]));
}

#[test]
fn test_year_outside_span_rejected() {
    let dataset = sample_dataset();
    let mut tab = GroupedBarTab::new(&dataset, &DashboardConfig::default()).unwrap();

    assert!(tab.apply(&dataset, GroupedBarEvent::Year(2030)).is_err());
    assert_eq!(tab.selection().year, 2021);
}
