//! Country by month heatmaps of one pollutant.
//!
//! Two charts share the pollutant and year selection: the yearly heatmap
//! shows every month of the year with countries ranked by their mean, the
//! monthly heatmap shows the selected month with countries ranked by value.

use super::{Tab, TabKind, require_year};
use crate::binding::{BoundData, ChartBinding, ChartFrame, ChartMeta, ColorScale, ColumnValues, Renderer};
use crate::constants::{MONTH_ABBREVIATIONS, SEQUENTIAL_PALETTE, columns};
use crate::dataset::{Dataset, RecordFilter};
use crate::error::{DashboardError, Result};
use crate::models::{Pollutant, month_abbrev};
use crate::view::{AggregateView, mean_by, sort_descending};
use polars::prelude::*;
use serde::Serialize;

pub const VALUE: &str = "Value";
const RANK: &str = "Rank";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapSelection {
    pub pollutant: Pollutant,
    pub year: i32,
    pub month: u32,
}

impl HeatmapSelection {
    pub fn month_name(&self) -> &'static str {
        month_abbrev(self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatmapEvent {
    Pollutant(Pollutant),
    Year(i32),
    Month(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapTab {
    selection: HeatmapSelection,
    yearly: ChartBinding,
    monthly: ChartBinding,
}

impl HeatmapTab {
    pub fn new(dataset: &Dataset) -> Result<Self> {
        let mut tab = Self {
            selection: HeatmapSelection {
                pollutant: Pollutant::Pm25,
                year: dataset.min_year(),
                month: 1,
            },
            yearly: ChartBinding::new("heatmap-yearly"),
            monthly: ChartBinding::new("heatmap-monthly"),
        };
        tab.recompute(dataset)?;
        Ok(tab)
    }

    pub fn selection(&self) -> &HeatmapSelection {
        &self.selection
    }

    pub fn yearly(&self) -> &ChartBinding {
        &self.yearly
    }

    pub fn monthly(&self) -> &ChartBinding {
        &self.monthly
    }

    pub fn apply(&mut self, dataset: &Dataset, event: HeatmapEvent) -> Result<()> {
        match event {
            HeatmapEvent::Pollutant(pollutant) => self.selection.pollutant = pollutant,
            HeatmapEvent::Year(year) => {
                require_year("Year", year, dataset)?;
                self.selection.year = year;
            }
            HeatmapEvent::Month(month) => {
                if !(1..=12).contains(&month) {
                    return Err(DashboardError::invalid_selection("Month", month));
                }
                self.selection.month = month;
            }
        }
        self.recompute(dataset)
    }

    /// Mean per country for the selected month, highest first
    pub fn compute_monthly(dataset: &Dataset, selection: &HeatmapSelection) -> Result<AggregateView> {
        let filter = RecordFilter::new()
            .with_year(selection.year)
            .with_month(selection.month);
        let pollutant = selection.pollutant.column();

        let lazy = mean_by(
            dataset.filtered(&filter),
            &[columns::COUNTRY, columns::MONTH],
            &[pollutant],
        );
        AggregateView::collect(sort_descending(lazy, pollutant))
    }

    /// Mean per country and month; countries ranked by their mean, then
    /// months in calendar order
    pub fn compute_yearly(dataset: &Dataset, selection: &HeatmapSelection) -> Result<AggregateView> {
        let filter = RecordFilter::new().with_year(selection.year);
        let pollutant = selection.pollutant.column();

        let cells = mean_by(
            dataset.filtered(&filter),
            &[columns::COUNTRY, columns::MONTH],
            &[pollutant],
        );
        let ranks = mean_by(cells.clone(), &[columns::COUNTRY], &[pollutant])
            .select([col(columns::COUNTRY), col(pollutant).alias(RANK)]);

        let lazy = cells
            .left_join(ranks, col(columns::COUNTRY), col(columns::COUNTRY))
            .sort_by_exprs(
                [col(RANK), col(columns::MONTH)],
                SortMultipleOptions::default()
                    .with_order_descending_multi([true, false])
                    .with_nulls_last(true)
                    .with_maintain_order(true),
            )
            .select([col(columns::COUNTRY), col(columns::MONTH), col(pollutant)]);
        AggregateView::collect(lazy)
    }
}

impl Tab for HeatmapTab {
    fn kind(&self) -> TabKind {
        TabKind::Heatmap
    }

    fn recompute(&mut self, dataset: &Dataset) -> Result<()> {
        let selection = self.selection;
        let p = selection.pollutant;

        let yearly = Self::compute_yearly(dataset, &selection)?;
        let title = if yearly.is_empty() {
            format!("No Data Available for {} ({})", p, selection.year)
        } else {
            format!("Yearly Pollutant Concentrations ({}, {})", p, selection.year)
        };
        let yearly_frame = heatmap_frame(&yearly, p, title)?;

        let monthly = Self::compute_monthly(dataset, &selection)?;
        let title = if monthly.is_empty() {
            format!(
                "No Data Available for {} ({}, {})",
                p,
                selection.year,
                selection.month_name()
            )
        } else {
            format!(
                "Monthly Pollutant Concentrations ({}, {}, {})",
                p,
                selection.year,
                selection.month_name()
            )
        };
        let monthly_frame = heatmap_frame(&monthly, p, title)?;

        self.yearly.rebind(yearly_frame);
        self.monthly.rebind(monthly_frame);
        Ok(())
    }

    fn bindings(&self) -> Vec<&ChartBinding> {
        vec![&self.yearly, &self.monthly]
    }
}

/// Month/Country/Value cells with countries as ordered y factors
fn heatmap_frame(view: &AggregateView, pollutant: Pollutant, title: String) -> Result<ChartFrame> {
    let countries = view.strings(columns::COUNTRY)?;
    let months: Vec<String> = view
        .integers(columns::MONTH)?
        .into_iter()
        .map(|m| month_abbrev(m.unwrap_or_default() as u32).to_string())
        .collect();
    let values = view.floats(pollutant.column())?;

    let mut country_factors: Vec<String> = Vec::new();
    for country in &countries {
        if !country_factors.contains(country) {
            country_factors.push(country.clone());
        }
    }

    let data = BoundData::from_columns([
        (columns::MONTH, ColumnValues::Text(months)),
        (columns::COUNTRY, ColumnValues::Text(countries)),
        (VALUE, ColumnValues::Number(values)),
    ])?;

    let scale = ColorScale::new(VALUE, SEQUENTIAL_PALETTE).with_range(view.value_range(pollutant.column())?);
    let meta = ChartMeta::new(title)
        .with_labels("Month", "Country")
        .with_x_factors(MONTH_ABBREVIATIONS.iter().map(|m| m.to_string()).collect())
        .with_y_factors(country_factors)
        .with_color_scale(scale);

    let cells = Renderer::shared("cells", columns::MONTH, columns::COUNTRY, SEQUENTIAL_PALETTE)
        .with_label(format!("{pollutant} Concentration"));

    Ok(ChartFrame::new(data, meta).with_renderers(vec![cells]))
}
