//! Regional trends tab tests

use crate::dataset::tests::sample_dataset;
use crate::tabs::{RegionalEvent, RegionalTab};

#[test]
fn test_one_row_per_country_and_year() {
    let dataset = sample_dataset();
    let view = RegionalTab::compute(&dataset).unwrap();

    assert_eq!(view.height(), 6);

    let countries = view.strings("Country").unwrap();
    let years = view.strings("Year").unwrap();
    let aqi = view.floats("AQI").unwrap();
    let row = (0..view.height())
        .find(|&r| countries[r] == "Testland" && years[r] == "2020")
        .unwrap();
    assert_eq!(aqi[row], Some(90.0));
}

#[test]
fn test_one_line_per_country() {
    let dataset = sample_dataset();
    let tab = RegionalTab::new(&dataset).unwrap();
    let binding = tab.binding();

    let ids: Vec<&str> = binding.renderers().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["Testland", "Otherland", "Farland"]);
    assert!(binding.renderers().iter().all(|r| r.visible));
    assert_eq!(binding.meta().x_factors, vec!["2019", "2020", "2021"]);
    assert_eq!(binding.meta().title, "Regional AQI Trends");
    assert_eq!(binding.legend().len(), 3);
}

#[test]
fn test_show_countries_hides_other_lines() {
    let dataset = sample_dataset();
    let mut tab = RegionalTab::new(&dataset).unwrap();

    tab.apply(
        &dataset,
        RegionalEvent::ShowCountries(vec!["Otherland".to_string()]),
    )
    .unwrap();

    let visible: Vec<&str> = tab
        .binding()
        .renderers()
        .iter()
        .filter(|r| r.visible)
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(visible, vec!["Otherland"]);
    assert_eq!(tab.binding().renderers().len(), 3);
}

#[test]
fn test_unknown_country_is_rejected() {
    let dataset = sample_dataset();
    let mut tab = RegionalTab::new(&dataset).unwrap();

    let result = tab.apply(
        &dataset,
        RegionalEvent::ShowCountries(vec!["Atlantis".to_string()]),
    );

    assert!(result.is_err());
    assert!(tab.selection().visible_countries.is_none());
}
