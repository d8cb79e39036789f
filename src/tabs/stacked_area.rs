//! Daily means of the pollutants of one unit, stacked over a year.

use super::{Tab, TabKind, dates_from_days, require_year};
use crate::binding::{BoundData, ChartBinding, ChartFrame, ChartMeta, ColumnValues, Renderer};
use crate::config::DashboardConfig;
use crate::constants::{POLLUTANT_COLORS, columns};
use crate::dataset::{Dataset, RecordFilter};
use crate::error::Result;
use crate::models::{Pollutant, Unit};
use crate::view::{AggregateView, mean_by, sort_ascending};
use polars::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StackedAreaSelection {
    pub unit: Unit,
    pub year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackedAreaEvent {
    Unit(Unit),
    Year(i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackedAreaTab {
    selection: StackedAreaSelection,
    binding: ChartBinding,
}

impl StackedAreaTab {
    pub fn new(dataset: &Dataset, config: &DashboardConfig) -> Result<Self> {
        let mut tab = Self {
            selection: StackedAreaSelection {
                unit: config.initial_unit,
                year: dataset.min_year(),
            },
            binding: ChartBinding::new("stacked-area"),
        };
        tab.recompute(dataset)?;
        Ok(tab)
    }

    pub fn selection(&self) -> &StackedAreaSelection {
        &self.selection
    }

    pub fn binding(&self) -> &ChartBinding {
        &self.binding
    }

    pub fn apply(&mut self, dataset: &Dataset, event: StackedAreaEvent) -> Result<()> {
        match event {
            StackedAreaEvent::Unit(unit) => self.selection.unit = unit,
            StackedAreaEvent::Year(year) => {
                require_year("Year", year, dataset)?;
                self.selection.year = year;
            }
        }
        self.recompute(dataset)
    }

    /// Mean per day of each pollutant of the unit; missing means become 0
    pub fn compute(dataset: &Dataset, selection: &StackedAreaSelection) -> Result<AggregateView> {
        let filter = RecordFilter::new().with_year(selection.year);
        let pollutants = selection.unit.pollutants();
        let values: Vec<&str> = pollutants.iter().map(Pollutant::column).collect();

        let filled: Vec<Expr> = values.iter().map(|v| col(*v).fill_null(lit(0.0))).collect();
        let lazy = mean_by(dataset.filtered(&filter), &[columns::DAY], &values).with_columns(filled);
        AggregateView::collect(sort_ascending(lazy, &[columns::DAY]))
    }
}

impl Tab for StackedAreaTab {
    fn kind(&self) -> TabKind {
        TabKind::StackedArea
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

/// Stacked series of the unit's pollutants; an empty view clears every
/// renderer and the legend
pub fn chart_frame(view: &AggregateView, selection: &StackedAreaSelection) -> Result<ChartFrame> {
    let StackedAreaSelection { unit, year } = *selection;

    if view.is_empty() {
        let mut data = BoundData::new().with_column(columns::DATE, ColumnValues::Date(Vec::new()))?;
        for pollutant in Pollutant::ALL {
            data = data.with_column(pollutant.column(), ColumnValues::Number(Vec::new()))?;
        }
        let meta = ChartMeta::new(format!("No data available for {unit} in {year}"))
            .with_labels("Date", "Concentration");
        return Ok(ChartFrame::new(data, meta));
    }

    let dates = dates_from_days(&view.integers(columns::DAY)?);
    let mut data = BoundData::new().with_column(columns::DATE, ColumnValues::Date(dates))?;
    let mut renderers = Vec::new();
    for pollutant in unit.pollutants() {
        let column = pollutant.column();
        data = data.with_column(column, ColumnValues::Number(view.floats(column)?))?;

        let label = format!("{pollutant} ({unit})");
        renderers.push(
            Renderer::shared(column, columns::DATE, column, POLLUTANT_COLORS[pollutant.index()])
                .with_label(label.clone())
                .with_group(label),
        );
    }

    let meta = ChartMeta::new(format!("Pollutant Concentrations Over Time ({year})"))
        .with_labels("Date", "Concentration");
    Ok(ChartFrame::new(data, meta).with_renderers(renderers))
}
