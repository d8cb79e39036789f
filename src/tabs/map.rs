//! Choropleth of one metric per country for a year.
//!
//! Country means are joined to the boundary set by exact name. Countries
//! without data, or with a mean of zero, carry no display value and render
//! with the no-data color. The year is also driven by the animation owned
//! by the dashboard.

use super::{Tab, TabKind, require_year_in_span};
use crate::binding::{BoundData, ChartBinding, ChartFrame, ChartMeta, ColorScale, ColumnValues, Renderer};
use crate::constants::{SEQUENTIAL_PALETTE, columns};
use crate::dataset::{Dataset, RecordFilter};
use crate::error::Result;
use crate::geo::Boundaries;
use crate::models::{Metric, Pollutant};
use crate::stats;
use crate::view::{AggregateView, mean_by, sort_ascending};
use polars::prelude::*;
use serde::Serialize;
use std::sync::Arc;

pub const DISPLAY_VALUE: &str = "display_value";
const ORDER: &str = "Order";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapSelection {
    pub metric: Metric,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapTab {
    selection: MapSelection,
    boundaries: Arc<Boundaries>,
    binding: ChartBinding,
}

impl MapTab {
    pub fn new(dataset: &Dataset, boundaries: Arc<Boundaries>) -> Result<Self> {
        let mut tab = Self {
            selection: MapSelection {
                metric: Metric::Pollutant(Pollutant::Pm25),
                year: dataset.min_year(),
            },
            boundaries,
            binding: ChartBinding::new("map"),
        };
        tab.recompute(dataset)?;
        Ok(tab)
    }

    pub fn selection(&self) -> &MapSelection {
        &self.selection
    }

    pub fn year(&self) -> i32 {
        self.selection.year
    }

    pub fn boundaries(&self) -> &Boundaries {
        &self.boundaries
    }

    pub fn binding(&self) -> &ChartBinding {
        &self.binding
    }

    pub fn set_metric(&mut self, dataset: &Dataset, metric: Metric) -> Result<()> {
        self.selection.metric = metric;
        self.recompute(dataset)
    }

    /// Move the year slider
    pub fn set_year(&mut self, dataset: &Dataset, year: i32) -> Result<()> {
        require_year_in_span("Year", year, dataset)?;
        self.selection.year = year;
        self.recompute(dataset)
    }

    /// Mean of every metric per boundary country, in boundary order
    pub fn compute(
        dataset: &Dataset,
        boundaries: &Boundaries,
        selection: &MapSelection,
    ) -> Result<AggregateView> {
        let filter = RecordFilter::new().with_year(selection.year);
        let metrics: Vec<&str> = Metric::ALL.iter().map(Metric::column).collect();
        let means = mean_by(dataset.filtered(&filter), &[columns::COUNTRY], &metrics);

        let names: Vec<&str> = boundaries.names().collect();
        let order: Vec<u32> = (0..names.len() as u32).collect();
        let countries = df!(
            columns::COUNTRY => names,
            ORDER => order,
        )?;

        let lazy = countries
            .lazy()
            .left_join(means, col(columns::COUNTRY), col(columns::COUNTRY));
        AggregateView::collect(sort_ascending(lazy, &[ORDER]))
    }
}

impl Tab for MapTab {
    fn kind(&self) -> TabKind {
        TabKind::Map
    }

    fn recompute(&mut self, dataset: &Dataset) -> Result<()> {
        let view = Self::compute(dataset, &self.boundaries, &self.selection)?;
        let frame = map_frame(&view, &self.boundaries, &self.selection)?;
        self.binding.rebind(frame);
        Ok(())
    }

    fn bindings(&self) -> Vec<&ChartBinding> {
        vec![&self.binding]
    }
}

fn map_frame(
    view: &AggregateView,
    boundaries: &Boundaries,
    selection: &MapSelection,
) -> Result<ChartFrame> {
    let shapes = boundaries.shapes();
    let mut data = BoundData::from_columns([
        (columns::COUNTRY, ColumnValues::Text(view.strings(columns::COUNTRY)?)),
        (
            "xs",
            ColumnValues::Shape(shapes.iter().map(|s| s.xs.clone()).collect()),
        ),
        (
            "ys",
            ColumnValues::Shape(shapes.iter().map(|s| s.ys.clone()).collect()),
        ),
        (
            columns::YEAR,
            ColumnValues::Integer(vec![Some(selection.year); shapes.len()]),
        ),
    ])?;

    for metric in Metric::ALL {
        data = data.with_column(metric.column(), ColumnValues::Number(view.floats(metric.column())?))?;
    }

    let display: Vec<Option<f64>> = view
        .floats(selection.metric.column())?
        .into_iter()
        .map(|v| v.filter(|x| *x != 0.0))
        .collect();
    let range = stats::value_range(display.iter().flatten().copied());
    let data = data.with_column(DISPLAY_VALUE, ColumnValues::Number(display))?;

    // Boundary rows are always present; the view is empty when no country has a value
    let title = if range.is_none() {
        format!(
            "No data available for {} in {}",
            selection.metric, selection.year
        )
    } else {
        format!("Interactive Map: {} in {}", selection.metric, selection.year)
    };
    let meta = ChartMeta::new(title).with_color_scale(ColorScale::new(DISPLAY_VALUE, SEQUENTIAL_PALETTE).with_range(range));

    let patches = Renderer::shared("patches", "xs", "ys", SEQUENTIAL_PALETTE).with_label("Pollutant Level");

    Ok(ChartFrame::new(data, meta).with_renderers(vec![patches]))
}
