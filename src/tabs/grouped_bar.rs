//! Mean concentration of every pollutant for selected countries.
//!
//! Countries are ordered by descending PM2.5, the first pollutant of the
//! canonical list.

use super::{Tab, TabKind, require_all, require_year_in_span};
use crate::binding::{BoundData, ChartBinding, ChartFrame, ChartMeta, Renderer};
use crate::config::DashboardConfig;
use crate::constants::{CATEGORY20, columns};
use crate::dataset::{Dataset, RecordFilter};
use crate::error::Result;
use crate::models::Pollutant;
use crate::view::{AggregateView, mean_by, sort_descending};
use serde::Serialize;

/// Pollutant the countries are ranked by
pub const SORT_POLLUTANT: Pollutant = Pollutant::ALL[0];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedBarSelection {
    pub countries: Vec<String>,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupedBarEvent {
    Countries(Vec<String>),
    Year(i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBarTab {
    selection: GroupedBarSelection,
    country_options: Vec<String>,
    binding: ChartBinding,
}

impl GroupedBarTab {
    pub fn new(dataset: &Dataset, config: &DashboardConfig) -> Result<Self> {
        let country_options = dataset.countries();
        let countries = config
            .grouped_bar_countries
            .iter()
            .filter(|c| country_options.contains(c))
            .cloned()
            .collect();

        let mut tab = Self {
            selection: GroupedBarSelection {
                countries,
                year: dataset.max_year(),
            },
            country_options,
            binding: ChartBinding::new("grouped-bar"),
        };
        tab.recompute(dataset)?;
        Ok(tab)
    }

    pub fn selection(&self) -> &GroupedBarSelection {
        &self.selection
    }

    pub fn country_options(&self) -> &[String] {
        &self.country_options
    }

    pub fn binding(&self) -> &ChartBinding {
        &self.binding
    }

    pub fn apply(&mut self, dataset: &Dataset, event: GroupedBarEvent) -> Result<()> {
        match event {
            GroupedBarEvent::Countries(countries) => {
                require_all("Countries", &countries, &self.country_options)?;
                self.selection.countries = countries;
            }
            GroupedBarEvent::Year(year) => {
                require_year_in_span("Year", year, dataset)?;
                self.selection.year = year;
            }
        }
        self.recompute(dataset)
    }

    pub fn compute(dataset: &Dataset, selection: &GroupedBarSelection) -> Result<AggregateView> {
        let filter = RecordFilter::new()
            .with_year(selection.year)
            .with_countries(selection.countries.clone());
        let values: Vec<&str> = Pollutant::ALL.iter().map(Pollutant::column).collect();

        let lazy = mean_by(dataset.filtered(&filter), &[columns::COUNTRY], &values);
        AggregateView::collect(sort_descending(lazy, SORT_POLLUTANT.column()))
    }
}

impl Tab for GroupedBarTab {
    fn kind(&self) -> TabKind {
        TabKind::GroupedBar
    }

    fn recompute(&mut self, dataset: &Dataset) -> Result<()> {
        let view = Self::compute(dataset, &self.selection)?;

        let renderers = Pollutant::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| Renderer::shared(p.column(), p.column(), columns::COUNTRY, CATEGORY20[i]))
            .collect();
        let title = if view.is_empty() {
            format!(
                "No data available for the selected countries in {}",
                self.selection.year
            )
        } else {
            format!(
                "Grouped Bar Chart: Pollutant Concentrations ({})",
                self.selection.year
            )
        };
        let meta = ChartMeta::new(title)
        .with_labels("Average Concentration", "Country")
        .with_y_factors(view.strings(columns::COUNTRY)?);

        let frame = ChartFrame::new(BoundData::from_view(&view)?, meta).with_renderers(renderers);
        self.binding.rebind(frame);
        Ok(())
    }

    fn bindings(&self) -> Vec<&ChartBinding> {
        vec![&self.binding]
    }
}
