//! Mean AQI per country and year, one line per country.

use super::{Tab, TabKind, require_all};
use crate::binding::{BoundData, ChartBinding, ChartFrame, ChartMeta, ColumnValues, Renderer};
use crate::constants::{CATEGORY20, columns};
use crate::dataset::{Dataset, RecordFilter};
use crate::error::Result;
use crate::view::{AggregateView, mean_by};
use polars::prelude::*;
use serde::Serialize;

const TITLE: &str = "Regional AQI Trends";

/// Countries whose lines are shown; `None` shows every line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionalSelection {
    pub visible_countries: Option<Vec<String>>,
}

impl RegionalSelection {
    pub fn is_visible(&self, country: &str) -> bool {
        self.visible_countries
            .as_ref()
            .is_none_or(|set| set.iter().any(|c| c == country))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionalEvent {
    /// Multi-select of visible countries
    ShowCountries(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionalTab {
    selection: RegionalSelection,
    country_options: Vec<String>,
    binding: ChartBinding,
}

impl RegionalTab {
    pub fn new(dataset: &Dataset) -> Result<Self> {
        let mut tab = Self {
            selection: RegionalSelection::default(),
            country_options: dataset.countries(),
            binding: ChartBinding::new("regional"),
        };
        tab.recompute(dataset)?;
        Ok(tab)
    }

    pub fn selection(&self) -> &RegionalSelection {
        &self.selection
    }

    pub fn country_options(&self) -> &[String] {
        &self.country_options
    }

    pub fn binding(&self) -> &ChartBinding {
        &self.binding
    }

    pub fn apply(&mut self, dataset: &Dataset, event: RegionalEvent) -> Result<()> {
        match event {
            RegionalEvent::ShowCountries(countries) => {
                require_all("Countries", &countries, &self.country_options)?;
                self.selection.visible_countries = Some(countries);
                self.recompute(dataset)
            }
        }
    }

    /// Mean AQI by country and year, year as a categorical label
    pub fn compute(dataset: &Dataset) -> Result<AggregateView> {
        let lazy = mean_by(
            dataset.filtered(&RecordFilter::new()),
            &[columns::COUNTRY, columns::YEAR],
            &[columns::AQI],
        )
        .with_column(col(columns::YEAR).cast(DataType::String));
        AggregateView::collect(lazy)
    }
}

impl Tab for RegionalTab {
    fn kind(&self) -> TabKind {
        TabKind::Regional
    }

    fn recompute(&mut self, dataset: &Dataset) -> Result<()> {
        let view = Self::compute(dataset)?;
        let frame = regional_frame(&view, &self.country_options, &self.selection)?;
        self.binding.rebind(frame);
        Ok(())
    }

    fn bindings(&self) -> Vec<&ChartBinding> {
        vec![&self.binding]
    }
}

fn regional_frame(
    view: &AggregateView,
    countries: &[String],
    selection: &RegionalSelection,
) -> Result<ChartFrame> {
    let data = BoundData::from_view(view)?;
    let view_countries = view.strings(columns::COUNTRY)?;
    let years = view.strings(columns::YEAR)?;
    let aqi = view.floats(columns::AQI)?;

    let mut year_factors = years.clone();
    year_factors.sort();
    year_factors.dedup();

    let mut renderers = Vec::new();
    for (i, country) in countries.iter().enumerate() {
        let rows: Vec<usize> = (0..view_countries.len())
            .filter(|&r| view_countries[r] == *country)
            .collect();
        if rows.is_empty() {
            continue;
        }

        let line_data = BoundData::from_columns([
            (columns::YEAR, ColumnValues::Text(rows.iter().map(|&r| years[r].clone()).collect())),
            (columns::AQI, ColumnValues::Number(rows.iter().map(|&r| aqi[r]).collect())),
            (columns::COUNTRY, ColumnValues::Text(vec![country.clone(); rows.len()])),
        ])?;

        renderers.push(
            Renderer::owning(
                country.clone(),
                line_data,
                columns::YEAR,
                columns::AQI,
                CATEGORY20[i % CATEGORY20.len()],
            )
            .with_visible(selection.is_visible(country)),
        );
    }

    let meta = ChartMeta::new(TITLE)
        .with_labels("Year", "Average AQI")
        .with_x_factors(year_factors);

    Ok(ChartFrame::new(data, meta).with_renderers(renderers))
}
