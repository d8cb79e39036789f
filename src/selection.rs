//! Widget selection values shared by the tab control panels.

use crate::constants::ALL_OPTION;
use crate::error::{DashboardError, Result};
use serde::Serialize;
use std::fmt;

/// Select-box value where "All" leaves the field unconstrained
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    /// Interpret a widget value; "All" maps to [`Choice::All`]
    pub fn parse(value: &str) -> Self {
        if value == ALL_OPTION {
            Choice::All
        } else {
            Choice::Only(value.to_string())
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        match self {
            Choice::All => None,
            Choice::Only(value) => Some(value),
        }
    }

    pub fn label(&self) -> &str {
        self.as_option().unwrap_or(ALL_OPTION)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ensure a value is one of a widget's options
pub fn require_option<T>(widget: &str, value: &T, options: &[T]) -> Result<()>
where
    T: PartialEq + fmt::Display,
{
    if options.contains(value) {
        Ok(())
    } else {
        Err(DashboardError::invalid_selection(widget, value))
    }
}

/// Multi-select of cities limited to `cap` entries.
///
/// A request above the cap keeps the cities already selected, in their
/// existing order, and fills the remaining slots from the request in its
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitySelection {
    cities: Vec<String>,
    cap: usize,
}

impl CitySelection {
    pub fn new(cap: usize) -> Self {
        Self {
            cities: Vec::new(),
            cap,
        }
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Apply a requested selection, returning the cities actually selected.
    ///
    /// Duplicates are dropped first. A request within the cap replaces the
    /// selection as given. A request above the cap keeps the previously
    /// selected cities that are still requested, in their previous order,
    /// then fills the free slots from the request in request order. Previous
    /// cities missing from the request are never kept.
    pub fn select(&mut self, requested: Vec<String>) -> &[String] {
        let mut unique: Vec<String> = Vec::with_capacity(requested.len());
        for city in requested {
            if !unique.contains(&city) {
                unique.push(city);
            }
        }

        if unique.len() <= self.cap {
            self.cities = unique;
            return &self.cities;
        }

        let mut kept: Vec<String> = self
            .cities
            .iter()
            .filter(|c| unique.contains(c))
            .take(self.cap)
            .cloned()
            .collect();
        for city in unique {
            if kept.len() == self.cap {
                break;
            }
            if !kept.contains(&city) {
                kept.push(city);
            }
        }

        self.cities = kept;
        &self.cities
    }
}
