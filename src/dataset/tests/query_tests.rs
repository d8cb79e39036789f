//! Tests for record queries and option lists

use super::*;
use crate::dataset::RecordFilter;

#[test]
fn test_query_by_country_and_year() {
    let dataset = sample_dataset();
    let filter = RecordFilter::new().with_country("Testland").with_year(2020);

    let records = dataset.query(&filter);

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.country == "Testland" && r.year() == 2020));
}

#[test]
fn test_query_by_month_and_year_range() {
    let dataset = sample_dataset();
    let filter = RecordFilter::new().with_month(1).with_year_range(2020, 2019);

    let records = dataset.query(&filter);

    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.month() == 1));
}

#[test]
fn test_query_with_sets() {
    let dataset = sample_dataset();

    let by_countries = RecordFilter::new().with_countries(["Otherland", "Farland"]);
    assert_eq!(dataset.query(&by_countries).len(), 4);

    let by_cities = RecordFilter::new().with_cities(["Alphaburg"]);
    assert_eq!(dataset.query(&by_cities).len(), 2);

    let empty_set = RecordFilter::new().with_countries(Vec::<String>::new());
    assert!(dataset.query(&empty_set).is_empty());
}

#[test]
fn test_unconstrained_query_returns_everything_in_order() {
    let dataset = sample_dataset();
    let filter = RecordFilter::new();

    assert!(filter.is_unconstrained());
    let records = dataset.query(&filter);
    assert_eq!(records.len(), dataset.len());
    assert_eq!(*records[0], dataset.records()[0]);
}

#[test]
fn test_query_is_deterministic() {
    let dataset = sample_dataset();
    let filter = RecordFilter::new().with_city("Testville");

    assert_eq!(dataset.query(&filter), dataset.query(&filter));
}

#[test]
fn test_lazy_filter_matches_record_filter() {
    let dataset = sample_dataset();
    let filters = [
        RecordFilter::new().with_country("Testland").with_year(2020),
        RecordFilter::new().with_month(4),
        RecordFilter::new().with_cities(["Otherton", "Farville"]),
        RecordFilter::new().with_year_range(2020, 2021).with_city("Testville"),
        RecordFilter::new().with_countries(Vec::<String>::new()),
    ];

    for filter in filters {
        let frame = dataset.filtered(&filter).collect().unwrap();
        assert_eq!(frame.height(), dataset.query(&filter).len(), "{filter:?}");
    }
}

#[test]
fn test_option_lists() {
    let dataset = sample_dataset();

    assert_eq!(dataset.years(), vec![2019, 2020, 2021]);
    assert_eq!(dataset.min_year(), 2019);
    assert_eq!(dataset.max_year(), 2021);
    assert_eq!(dataset.countries(), vec!["Testland", "Otherland", "Farland"]);
    assert_eq!(
        dataset.cities(),
        vec!["Testville", "Alphaburg", "Otherton", "Farville"]
    );
    assert_eq!(dataset.cities_of("Testland"), vec!["Testville", "Alphaburg"]);
    assert!(dataset.cities_of("Nowhere").is_empty());
}

#[test]
fn test_empty_record_list_is_rejected() {
    assert!(Dataset::from_records(Vec::new()).is_err());
}
