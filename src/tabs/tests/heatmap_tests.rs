//! Heatmap tab tests

use crate::dataset::tests::sample_dataset;
use crate::models::Pollutant;
use crate::tabs::heatmap::VALUE;
use crate::tabs::{HeatmapEvent, HeatmapSelection, HeatmapTab};

#[test]
fn test_monthly_mean_per_country() {
    let dataset = sample_dataset();
    let selection = HeatmapSelection {
        pollutant: Pollutant::Pm25,
        year: 2020,
        month: 1,
    };

    let view = HeatmapTab::compute_monthly(&dataset, &selection).unwrap();

    assert_eq!(view.strings("Country").unwrap(), vec!["Otherland", "Testland"]);
    assert_eq!(view.floats("PM2.5").unwrap(), vec![Some(80.0), Some(15.0)]);
}

#[test]
fn test_yearly_countries_ranked_by_mean() {
    let dataset = sample_dataset();
    let mut tab = HeatmapTab::new(&dataset).unwrap();

    tab.apply(&dataset, HeatmapEvent::Year(2020)).unwrap();

    let yearly = tab.yearly();
    assert_eq!(
        yearly.meta().title,
        "Yearly Pollutant Concentrations (PM2.5, 2020)"
    );
    assert_eq!(yearly.meta().y_factors, vec!["Otherland", "Testland"]);
    assert_eq!(yearly.data().text("Month"), ["Jan", "Mar", "Jan", "Feb"]);
    assert_eq!(
        yearly.data().numbers(VALUE),
        [Some(80.0), Some(90.0), Some(15.0), Some(60.0)]
    );
    assert_eq!(yearly.meta().x_factors.len(), 12);

    let scale = yearly.meta().color_scale.as_ref().unwrap();
    assert_eq!((scale.low, scale.high), (15.0, 90.0));
}

#[test]
fn test_month_without_data() {
    let dataset = sample_dataset();
    let mut tab = HeatmapTab::new(&dataset).unwrap();
    tab.apply(&dataset, HeatmapEvent::Year(2020)).unwrap();

    tab.apply(&dataset, HeatmapEvent::Month(12)).unwrap();

    let monthly = tab.monthly();
    assert_eq!(
        monthly.meta().title,
        "No Data Available for PM2.5 (2020, Dec)"
    );
    assert!(monthly.data().is_empty());
    assert!(monthly.meta().y_factors.is_empty());

    let scale = monthly.meta().color_scale.as_ref().unwrap();
    assert_eq!((scale.low, scale.high), (0.0, 1.0));

    // The yearly chart keeps its data
    assert_eq!(tab.yearly().data().len(), 4);
}

#[test]
fn test_invalid_month_and_year_rejected() {
    let dataset = sample_dataset();
    let mut tab = HeatmapTab::new(&dataset).unwrap();
    let before = tab.clone();

    assert!(tab.apply(&dataset, HeatmapEvent::Month(13)).is_err());
    assert!(tab.apply(&dataset, HeatmapEvent::Year(1999)).is_err());
    assert_eq!(tab, before);
}

#[test]
fn test_default_selection() {
    let dataset = sample_dataset();
    let tab = HeatmapTab::new(&dataset).unwrap();

    assert_eq!(tab.selection().year, 2019);
    assert_eq!(tab.selection().month, 1);
    assert_eq!(
        tab.monthly().meta().title,
        "Monthly Pollutant Concentrations (PM2.5, 2019, Jan)"
    );
    assert_eq!(tab.monthly().data().numbers(VALUE), [Some(30.0)]);
}
