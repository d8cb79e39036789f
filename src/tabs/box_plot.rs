//! Monthly distribution of one pollutant for a city and year.

use super::{Tab, TabKind};
use crate::binding::{
    AxisRange, BoundData, ChartBinding, ChartFrame, ChartMeta, ColumnValues, Renderer,
};
use crate::constants::{BOX_RANGE_HIGH_PAD, BOX_RANGE_LOW_PAD, columns};
use crate::dataset::{Dataset, RecordFilter};
use crate::error::Result;
use crate::models::{Pollutant, month_abbrev};
use crate::selection::require_option;
use crate::view::{AggregateView, sort_ascending};
use polars::prelude::*;
use serde::Serialize;

pub const LOWER: &str = "Lower";
pub const Q1: &str = "Q1";
pub const MEDIAN: &str = "Median";
pub const Q3: &str = "Q3";
pub const UPPER: &str = "Upper";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxPlotSelection {
    pub city: String,
    pub year: i32,
    pub pollutant: Pollutant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoxPlotEvent {
    City(String),
    Year(i32),
    Pollutant(Pollutant),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlotTab {
    selection: BoxPlotSelection,
    city_options: Vec<String>,
    year_options: Vec<i32>,
    binding: ChartBinding,
}

impl BoxPlotTab {
    pub fn new(dataset: &Dataset) -> Result<Self> {
        let mut city_options = dataset.cities();
        city_options.sort();

        let mut tab = Self {
            selection: BoxPlotSelection {
                city: city_options.first().cloned().unwrap_or_default(),
                year: dataset.min_year(),
                pollutant: Pollutant::Pm25,
            },
            city_options,
            year_options: dataset.years(),
            binding: ChartBinding::new("box-plot"),
        };
        tab.recompute(dataset)?;
        Ok(tab)
    }

    pub fn selection(&self) -> &BoxPlotSelection {
        &self.selection
    }

    pub fn city_options(&self) -> &[String] {
        &self.city_options
    }

    pub fn binding(&self) -> &ChartBinding {
        &self.binding
    }

    pub fn apply(&mut self, dataset: &Dataset, event: BoxPlotEvent) -> Result<()> {
        match event {
            BoxPlotEvent::City(city) => {
                require_option("City", &city, &self.city_options)?;
                self.selection.city = city;
            }
            BoxPlotEvent::Year(year) => {
                require_option("Year", &year, &self.year_options)?;
                self.selection.year = year;
            }
            BoxPlotEvent::Pollutant(pollutant) => self.selection.pollutant = pollutant,
        }
        self.recompute(dataset)
    }

    /// Five-number summary per calendar month with at least one value
    pub fn compute(dataset: &Dataset, selection: &BoxPlotSelection) -> Result<AggregateView> {
        let filter = RecordFilter::new()
            .with_city(selection.city.clone())
            .with_year(selection.year);
        let value = selection.pollutant.column();

        let lazy = dataset
            .filtered(&filter)
            .filter(col(value).is_not_null())
            .group_by_stable([col(columns::MONTH)])
            .agg([
                col(value).min().alias(LOWER),
                col(value)
                    .quantile(lit(0.25), QuantileMethod::Linear)
                    .alias(Q1),
                col(value).median().alias(MEDIAN),
                col(value)
                    .quantile(lit(0.75), QuantileMethod::Linear)
                    .alias(Q3),
                col(value).max().alias(UPPER),
            ]);
        AggregateView::collect(sort_ascending(lazy, &[columns::MONTH]))
    }
}

impl Tab for BoxPlotTab {
    fn kind(&self) -> TabKind {
        TabKind::BoxPlot
    }

    fn recompute(&mut self, dataset: &Dataset) -> Result<()> {
        let view = Self::compute(dataset, &self.selection)?;
        let frame = chart_frame(&view, &self.selection)?;
        self.binding.rebind(frame);
        Ok(())
    }

    fn bindings(&self) -> Vec<&ChartBinding> {
        vec![&self.binding]
    }
}

/// Chart state for a computed view; months are shown as abbreviations
pub fn chart_frame(view: &AggregateView, selection: &BoxPlotSelection) -> Result<ChartFrame> {
    let unit = selection.pollutant.unit();

    let low = view.value_range(LOWER)?.map(|(min, _)| min);
    let high = view.value_range(UPPER)?.map(|(_, max)| max);
    let y_range = match (low, high) {
        (Some(low), Some(high)) => AxisRange::new(low * BOX_RANGE_LOW_PAD, high * BOX_RANGE_HIGH_PAD),
        _ => AxisRange::new(0.0, 1.0),
    };

    let title = if view.is_empty() {
        format!(
            "No data available for {} in {} ({})",
            selection.pollutant, selection.city, selection.year
        )
    } else {
        format!(
            "{} ({}) Distribution by Month for {} ({})",
            selection.pollutant, unit, selection.city, selection.year
        )
    };

    let months: Vec<String> = view
        .integers(columns::MONTH)?
        .into_iter()
        .flatten()
        .map(|m| month_abbrev(m as u32).to_string())
        .collect();

    let data = BoundData::from_view(view)?
        .with_column(columns::MONTH, ColumnValues::Text(months.clone()))?;

    let meta = ChartMeta::new(title)
        .with_labels("Month", format!("Concentration ({unit})"))
        .with_x_factors(months)
        .with_y_range(y_range);

    let renderers = vec![
        Renderer::shared("boxes", columns::MONTH, Q3, "lightblue").with_group("Distribution"),
        Renderer::shared("whiskers", columns::MONTH, UPPER, "black").with_group("Distribution"),
        Renderer::shared("medians", columns::MONTH, MEDIAN, "red").with_group("Median"),
    ];

    Ok(ChartFrame::new(data, meta).with_renderers(renderers))
}
