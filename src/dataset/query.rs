//! Record filtering for the dataset store.
//!
//! A `RecordFilter` expresses equality and range constraints on country,
//! city, year and month. The same constraints evaluate against materialized
//! records and translate to a polars predicate for lazy aggregation.

use crate::constants::columns;
use crate::models::Record;
use polars::prelude::*;

/// Equality/range constraints over records; unset fields do not constrain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub country: Option<String>,
    pub city: Option<String>,
    pub year: Option<i32>,
    pub year_range: Option<(i32, i32)>,
    pub month: Option<u32>,
    pub countries: Option<Vec<String>>,
    pub cities: Option<Vec<String>>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Constrain to an inclusive year range
    pub fn with_year_range(mut self, first: i32, last: i32) -> Self {
        self.year_range = Some((first.min(last), first.max(last)));
        self
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Constrain to a set of countries; an empty set matches nothing
    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = Some(countries.into_iter().map(Into::into).collect());
        self
    }

    /// Constrain to a set of cities; an empty set matches nothing
    pub fn with_cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cities = Some(cities.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// Check a single record against every constraint
    pub fn matches(&self, record: &Record) -> bool {
        self.country.as_ref().is_none_or(|c| record.country == *c)
            && self.city.as_ref().is_none_or(|c| record.city == *c)
            && self.year.is_none_or(|y| record.year() == y)
            && self
                .year_range
                .is_none_or(|(first, last)| (first..=last).contains(&record.year()))
            && self.month.is_none_or(|m| record.month() == m)
            && self
                .countries
                .as_ref()
                .is_none_or(|set| set.iter().any(|c| *c == record.country))
            && self
                .cities
                .as_ref()
                .is_none_or(|set| set.iter().any(|c| *c == record.city))
    }

    /// Polars predicate equivalent to [`RecordFilter::matches`]
    pub fn to_expr(&self) -> Option<Expr> {
        let mut predicates = Vec::new();

        if let Some(country) = &self.country {
            predicates.push(col(columns::COUNTRY).eq(lit(country.clone())));
        }
        if let Some(city) = &self.city {
            predicates.push(col(columns::CITY).eq(lit(city.clone())));
        }
        if let Some(year) = self.year {
            predicates.push(col(columns::YEAR).eq(lit(year)));
        }
        if let Some((first, last)) = self.year_range {
            predicates.push(
                col(columns::YEAR)
                    .gt_eq(lit(first))
                    .and(col(columns::YEAR).lt_eq(lit(last))),
            );
        }
        if let Some(month) = self.month {
            predicates.push(col(columns::MONTH).eq(lit(month as i32)));
        }
        if let Some(countries) = &self.countries {
            predicates.push(any_of(columns::COUNTRY, countries));
        }
        if let Some(cities) = &self.cities {
            predicates.push(any_of(columns::CITY, cities));
        }

        predicates.into_iter().reduce(|acc, p| acc.and(p))
    }
}

/// Membership predicate built from equality terms
fn any_of(column: &str, values: &[String]) -> Expr {
    values
        .iter()
        .map(|v| col(column).eq(lit(v.clone())))
        .reduce(|acc, p| acc.or(p))
        .unwrap_or_else(|| lit(false))
}
