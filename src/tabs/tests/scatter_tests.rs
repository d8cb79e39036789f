//! Scatter tab tests

use crate::config::DashboardConfig;
use crate::dataset::tests::sample_dataset;
use crate::error::DashboardError;
use crate::selection::Choice;
use crate::tabs::scatter::{AQI_CATEGORY, PM10_SCALED, build_sample};
use crate::tabs::{ScatterEvent, ScatterTab, Tab};

fn scatter_tab() -> (crate::dataset::Dataset, ScatterTab) {
    let dataset = sample_dataset();
    let tab = ScatterTab::new(&dataset, &DashboardConfig::default()).unwrap();
    (dataset, tab)
}

#[test]
fn test_initial_state_shows_whole_sample() {
    let (dataset, tab) = scatter_tab();

    assert_eq!(tab.selection().country, Choice::All);
    assert_eq!(tab.selection().city, Choice::All);
    assert_eq!(tab.country_options(), ["All", "Testland", "Otherland", "Farland"]);
    assert_eq!(tab.city_options(), ["All"]);
    assert_eq!(tab.binding().data().len(), dataset.len());
    assert_eq!(tab.binding().meta().title, "AQI vs PM2.5 Scatter Plot");
    assert_eq!(tab.binding().renderers().len(), 1);
}

#[test]
fn test_country_change_cascades_to_city() {
    let (dataset, mut tab) = scatter_tab();

    tab.apply(&dataset, ScatterEvent::Country("Testland".to_string()))
        .unwrap();
    assert_eq!(tab.city_options(), ["All", "Testville", "Alphaburg"]);
    assert_eq!(tab.binding().data().len(), 7);

    tab.apply(&dataset, ScatterEvent::City("Alphaburg".to_string()))
        .unwrap();
    assert_eq!(tab.binding().data().len(), 2);
    assert!(
        tab.binding()
            .data()
            .text("City")
            .iter()
            .all(|c| c == "Alphaburg")
    );

    tab.apply(&dataset, ScatterEvent::Country("Otherland".to_string()))
        .unwrap();
    assert_eq!(tab.selection().city, Choice::All);
    assert_eq!(tab.city_options(), ["All", "Otherton"]);
    assert_eq!(tab.binding().data().len(), 3);
}

#[test]
fn test_city_from_other_country_is_rejected() {
    let (dataset, mut tab) = scatter_tab();
    tab.apply(&dataset, ScatterEvent::Country("Testland".to_string()))
        .unwrap();
    let before = tab.binding().clone();

    let result = tab.apply(&dataset, ScatterEvent::City("Otherton".to_string()));

    assert!(matches!(result, Err(DashboardError::InvalidSelection { .. })));
    assert_eq!(tab.binding(), &before);
    assert_eq!(tab.selection().city, Choice::All);
}

#[test]
fn test_marker_size_scaled_from_pm10() {
    let (_, tab) = scatter_tab();
    let data = tab.binding().data();

    let sizes = data.numbers(PM10_SCALED);
    let cities = data.text("City");
    let farville = cities.iter().position(|c| c == "Farville").unwrap();

    // PM10 spans 10..180 across the sample
    assert_eq!(sizes[farville], Some(5.0));
    let largest = sizes.iter().flatten().copied().fold(f64::MIN, f64::max);
    assert!((largest - 15.0).abs() < 1e-9);
}

#[test]
fn test_aqi_categories() {
    let (_, tab) = scatter_tab();
    let data = tab.binding().data();

    let pm25 = data.numbers("PM2.5");
    let categories = data.text(AQI_CATEGORY);
    let category_of = |value: f64| {
        let row = pm25.iter().position(|v| *v == Some(value)).unwrap();
        categories[row].as_str()
    };

    assert_eq!(category_of(5.0), "Good");
    assert_eq!(category_of(20.0), "Moderate");
    assert_eq!(category_of(40.0), "Unhealthy");
    assert_eq!(category_of(60.0), "Very Unhealthy");
    assert_eq!(category_of(80.0), "Hazardous");
}

#[test]
fn test_sample_is_seeded() {
    let dataset = sample_dataset();

    let first = build_sample(&dataset, 4, 7).unwrap();
    let second = build_sample(&dataset, 4, 7).unwrap();

    assert_eq!(first.height(), 4);
    assert!(first.equals_missing(&second));
}

#[test]
fn test_recompute_is_idempotent() {
    let (dataset, mut tab) = scatter_tab();
    let before = tab.binding().clone();

    tab.recompute(&dataset).unwrap();

    assert_eq!(tab.binding(), &before);
}

#[test]
fn test_country_missing_from_sample_shows_no_data() {
    let dataset = sample_dataset();
    let config = DashboardConfig::default().with_scatter_sample(1, 7);
    let mut tab = ScatterTab::new(&dataset, &config).unwrap();
    let countries: Vec<String> = tab.country_options()[1..].to_vec();

    let mut empty_seen = 0;
    for country in countries {
        tab.apply(&dataset, ScatterEvent::Country(country.clone()))
            .unwrap();
        let meta = tab.binding().meta();
        let scale = meta.color_scale.as_ref().unwrap();

        if tab.binding().data().is_empty() {
            empty_seen += 1;
            assert_eq!(meta.title, format!("No data available for {country} / All"));
            assert_eq!((scale.low, scale.high), (0.0, 1.0));
            assert_eq!(scale.nan_color, "white");
        } else {
            assert_eq!(meta.title, "AQI vs PM2.5 Scatter Plot");
            assert_eq!(scale.low, scale.high);
        }
    }
    assert_eq!(empty_seen, 2);
}
