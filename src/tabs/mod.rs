//! Dashboard tabs.
//!
//! Each tab pairs a view model (a pure function of the dataset and the
//! tab's own selection producing an [`AggregateView`]) with one or more
//! chart bindings and the widget options of its control panel. Widget
//! events validate against those options before anything is mutated, then
//! recompute the view and rebind the chart.
//!
//! [`AggregateView`]: crate::view::AggregateView

pub mod box_plot;
pub mod grouped_bar;
pub mod heatmap;
pub mod map;
pub mod regional;
pub mod scatter;
pub mod stacked_area;
pub mod time_series;

#[cfg(test)]
mod tests;

pub use box_plot::{BoxPlotEvent, BoxPlotSelection, BoxPlotTab};
pub use grouped_bar::{GroupedBarEvent, GroupedBarSelection, GroupedBarTab};
pub use heatmap::{HeatmapEvent, HeatmapSelection, HeatmapTab};
pub use map::{MapSelection, MapTab};
pub use regional::{RegionalEvent, RegionalSelection, RegionalTab};
pub use scatter::{ScatterEvent, ScatterSelection, ScatterTab};
pub use stacked_area::{StackedAreaEvent, StackedAreaSelection, StackedAreaTab};
pub use time_series::{TimeSeriesEvent, TimeSeriesSelection, TimeSeriesTab};

use crate::binding::ChartBinding;
use crate::dataset::Dataset;
use crate::error::{DashboardError, Result};
use crate::models::date_from_day_number;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Behaviour shared by every tab
pub trait Tab {
    fn kind(&self) -> TabKind;

    /// Recompute the view from the current selection and rebind the charts
    fn recompute(&mut self, dataset: &Dataset) -> Result<()>;

    fn bindings(&self) -> Vec<&ChartBinding>;
}

/// Tabs in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TabKind {
    Scatter,
    Regional,
    Heatmap,
    TimeSeries,
    GroupedBar,
    Map,
    BoxPlot,
    StackedArea,
}

impl TabKind {
    pub const ALL: [TabKind; 8] = [
        TabKind::Scatter,
        TabKind::Regional,
        TabKind::Heatmap,
        TabKind::TimeSeries,
        TabKind::GroupedBar,
        TabKind::Map,
        TabKind::BoxPlot,
        TabKind::StackedArea,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            TabKind::Scatter => "Scatter Plot",
            TabKind::Regional => "Regional Trends",
            TabKind::Heatmap => "Heatmap",
            TabKind::TimeSeries => "Time-Series Trends",
            TabKind::GroupedBar => "Grouped Bar Chart",
            TabKind::Map => "Pollutants Map",
            TabKind::BoxPlot => "Box Plot",
            TabKind::StackedArea => "Stacked Area Chart",
        }
    }

    /// Short command-line name
    pub fn slug(&self) -> &'static str {
        match self {
            TabKind::Scatter => "scatter",
            TabKind::Regional => "regional",
            TabKind::Heatmap => "heatmap",
            TabKind::TimeSeries => "time-series",
            TabKind::GroupedBar => "grouped-bar",
            TabKind::Map => "map",
            TabKind::BoxPlot => "box-plot",
            TabKind::StackedArea => "stacked-area",
        }
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for TabKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.slug().eq_ignore_ascii_case(trimmed) || k.title().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DashboardError::invalid_selection("tab", s))
    }
}

/// Check a year against the dataset's year options
pub(crate) fn require_year(widget: &str, year: i32, dataset: &Dataset) -> Result<()> {
    if dataset.years().contains(&year) {
        Ok(())
    } else {
        Err(DashboardError::invalid_selection(widget, year))
    }
}

/// Check a slider year against the dataset's year span
pub(crate) fn require_year_in_span(widget: &str, year: i32, dataset: &Dataset) -> Result<()> {
    if (dataset.min_year()..=dataset.max_year()).contains(&year) {
        Ok(())
    } else {
        Err(DashboardError::invalid_selection(widget, year))
    }
}

/// Check every value of a multi-select against its options
pub(crate) fn require_all(widget: &str, values: &[String], options: &[String]) -> Result<()> {
    match values.iter().find(|v| !options.contains(v)) {
        Some(unknown) => Err(DashboardError::invalid_selection(widget, unknown)),
        None => Ok(()),
    }
}

/// Calendar dates for a column of day numbers
pub(crate) fn dates_from_days(days: &[Option<i32>]) -> Vec<NaiveDate> {
    days.iter()
        .filter_map(|d| d.and_then(date_from_day_number))
        .collect()
}
