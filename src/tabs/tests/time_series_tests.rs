//! Time-series tab tests

use crate::config::DashboardConfig;
use crate::dataset::Dataset;
use crate::dataset::tests::sample_dataset;
use crate::models::Unit;
use crate::tabs::{Tab, TimeSeriesEvent, TimeSeriesTab};
use chrono::NaiveDate;

fn cities(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn time_series_tab() -> (Dataset, TimeSeriesTab) {
    let dataset = sample_dataset();
    let tab = TimeSeriesTab::new(&dataset, &DashboardConfig::default()).unwrap();
    (dataset, tab)
}

#[test]
fn test_no_cities_means_no_lines() {
    let (_, tab) = time_series_tab();

    assert_eq!(tab.selection().year, 2021);
    assert!(tab.selection().cities.is_empty());
    assert!(tab.binding().renderers().is_empty());
    assert!(tab.binding().legend().is_empty());
    assert_eq!(
        tab.binding().meta().title,
        "No data available for the selected cities in 2021"
    );
}

#[test]
fn test_selected_city_without_rows_in_year() {
    let (dataset, mut tab) = time_series_tab();

    tab.apply(&dataset, TimeSeriesEvent::Cities(cities(&["Alphaburg"])))
        .unwrap();

    let binding = tab.binding();
    assert!(binding.data().is_empty());
    assert!(binding.renderers().is_empty());
    assert!(binding.meta().title.to_lowercase().contains("no data"));
    assert!(binding.meta().color_scale.is_none());
    assert!(binding.meta().y_range.is_none());

    tab.apply(&dataset, TimeSeriesEvent::Year(2020)).unwrap();
    assert_eq!(tab.binding().meta().title, "Time-Series Pollutant Trends");
    assert_eq!(tab.binding().renderers().len(), 6);
}

#[test]
fn test_line_per_pollutant_and_city() {
    let (dataset, mut tab) = time_series_tab();

    tab.apply(
        &dataset,
        TimeSeriesEvent::Cities(cities(&["Testville", "Otherton"])),
    )
    .unwrap();

    let binding = tab.binding();
    assert_eq!(binding.renderers().len(), 12);

    let legend: Vec<&str> = binding.legend().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(legend, vec!["µg/m³", "ppb", "ppm"]);
    assert_eq!(binding.legend()[0].renderer_ids.len(), 4);
    assert_eq!(binding.legend()[1].renderer_ids.len(), 6);

    let pm10 = binding.frame().renderer("PM10:Testville").unwrap();
    assert_eq!(pm10.dash.as_deref(), Some("dashed"));
    assert_eq!(pm10.label, "PM10 (Testville)");
    assert_ne!(
        pm10.color,
        binding.frame().renderer("PM10:Otherton").unwrap().color
    );
}

#[test]
fn test_legend_lists_only_checked_units() {
    let (dataset, mut tab) = time_series_tab();
    tab.apply(&dataset, TimeSeriesEvent::Cities(cities(&["Testville"])))
        .unwrap();

    tab.apply(&dataset, TimeSeriesEvent::Units(vec![Unit::PartsPerMillion]))
        .unwrap();

    let binding = tab.binding();
    assert_eq!(binding.renderers().len(), 1);
    assert_eq!(binding.legend().len(), 1);
    assert_eq!(binding.legend()[0].label, "ppm");
}

#[test]
fn test_city_without_data_gets_no_line() {
    let (dataset, mut tab) = time_series_tab();
    tab.apply(
        &dataset,
        TimeSeriesEvent::Cities(cities(&["Testville", "Otherton"])),
    )
    .unwrap();

    tab.apply(&dataset, TimeSeriesEvent::Year(2019)).unwrap();

    let binding = tab.binding();
    assert_eq!(binding.renderers().len(), 6);
    assert!(binding.renderers().iter().all(|r| r.id.ends_with(":Testville")));

    let line = binding.frame().renderer("PM2.5:Testville").unwrap();
    let crate::binding::RendererSource::Own(data) = &line.source else {
        panic!("line renderer should own its data");
    };
    let expected = [
        NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
    ];
    assert_eq!(data.column("x").unwrap().as_dates(), Some(&expected[..]));
    assert_eq!(data.numbers("y"), [Some(40.0), Some(30.0)]);
}

#[test]
fn test_fourth_city_is_capped() {
    let (dataset, mut tab) = time_series_tab();
    tab.apply(
        &dataset,
        TimeSeriesEvent::Cities(cities(&["Testville", "Otherton", "Farville"])),
    )
    .unwrap();

    tab.apply(
        &dataset,
        TimeSeriesEvent::Cities(cities(&["Testville", "Otherton", "Farville", "Alphaburg"])),
    )
    .unwrap();

    assert_eq!(
        tab.selection().cities.cities(),
        ["Testville", "Otherton", "Farville"]
    );
}

#[test]
fn test_unknown_city_rejected() {
    let (dataset, mut tab) = time_series_tab();

    let result = tab.apply(&dataset, TimeSeriesEvent::Cities(cities(&["Nowhere"])));

    assert!(result.is_err());
    assert!(tab.selection().cities.is_empty());
}

#[test]
fn test_legend_toggle_survives_recompute() {
    let (dataset, mut tab) = time_series_tab();

    tab.apply(&dataset, TimeSeriesEvent::ToggleLegend).unwrap();
    assert!(!tab.binding().meta().legend_visible);

    tab.apply(&dataset, TimeSeriesEvent::Year(2020)).unwrap();
    assert!(!tab.binding().meta().legend_visible);

    tab.apply(&dataset, TimeSeriesEvent::ToggleLegend).unwrap();
    assert!(tab.binding().meta().legend_visible);
}

#[test]
fn test_rebind_with_same_selection_keeps_renderers() {
    let (dataset, mut tab) = time_series_tab();
    tab.apply(&dataset, TimeSeriesEvent::Cities(cities(&["Otherton"])))
        .unwrap();
    let before = tab.binding().clone();

    tab.recompute(&dataset).unwrap();

    assert_eq!(tab.binding(), &before);
}
