//! Monthly pollutant trends for up to three cities.
//!
//! One line renderer per (pollutant, city) pair with data, dashed by
//! pollutant and colored by city. Renderers are grouped by unit; the legend
//! lists a unit only when at least one of its lines was produced.

use super::{Tab, TabKind, require_all, require_year};
use crate::binding::{BoundData, ChartBinding, ChartFrame, ChartMeta, ColumnValues, Renderer};
use crate::config::DashboardConfig;
use crate::constants::{CITY_COLORS, LINE_DASHES, columns};
use crate::dataset::{Dataset, RecordFilter};
use crate::error::Result;
use crate::models::{Pollutant, Unit, YearMonth};
use crate::selection::CitySelection;
use crate::view::{AggregateView, mean_by, sort_ascending};
use serde::Serialize;
use tracing::debug;

const TITLE: &str = "Time-Series Pollutant Trends";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesSelection {
    pub year: i32,
    pub cities: CitySelection,
    pub units: Vec<Unit>,
    pub legend_visible: bool,
}

impl TimeSeriesSelection {
    /// Pollutants of the checked units, in canonical order
    pub fn active_pollutants(&self) -> Vec<Pollutant> {
        Pollutant::ALL
            .into_iter()
            .filter(|p| self.units.contains(&p.unit()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSeriesEvent {
    Year(i32),
    Cities(Vec<String>),
    Units(Vec<Unit>),
    ToggleLegend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTab {
    selection: TimeSeriesSelection,
    city_options: Vec<String>,
    /// Dataset cities in first-appearance order, for stable line colors
    color_order: Vec<String>,
    binding: ChartBinding,
}

impl TimeSeriesTab {
    pub fn new(dataset: &Dataset, config: &DashboardConfig) -> Result<Self> {
        let color_order = dataset.cities();
        let mut city_options = color_order.clone();
        city_options.sort();

        let mut cities = CitySelection::new(config.max_selected_cities);
        cities.select(
            config
                .time_series_cities
                .iter()
                .filter(|c| city_options.contains(c))
                .cloned()
                .collect(),
        );

        let mut tab = Self {
            selection: TimeSeriesSelection {
                year: dataset.max_year(),
                cities,
                units: Unit::ALL.to_vec(),
                legend_visible: true,
            },
            city_options,
            color_order,
            binding: ChartBinding::new("time-series"),
        };
        tab.recompute(dataset)?;
        Ok(tab)
    }

    pub fn selection(&self) -> &TimeSeriesSelection {
        &self.selection
    }

    pub fn city_options(&self) -> &[String] {
        &self.city_options
    }

    pub fn binding(&self) -> &ChartBinding {
        &self.binding
    }

    pub fn apply(&mut self, dataset: &Dataset, event: TimeSeriesEvent) -> Result<()> {
        match event {
            TimeSeriesEvent::Year(year) => {
                require_year("Year", year, dataset)?;
                self.selection.year = year;
            }
            TimeSeriesEvent::Cities(cities) => {
                require_all("Cities", &cities, &self.city_options)?;
                let selected = self.selection.cities.select(cities);
                debug!("Time-series cities: {:?}", selected);
            }
            TimeSeriesEvent::Units(units) => self.selection.units = units,
            TimeSeriesEvent::ToggleLegend => {
                self.selection.legend_visible = self.binding.toggle_legend();
                return Ok(());
            }
        }
        self.recompute(dataset)
    }

    /// Monthly means of the active pollutants per selected city
    pub fn compute(dataset: &Dataset, selection: &TimeSeriesSelection) -> Result<AggregateView> {
        let filter = RecordFilter::new()
            .with_year(selection.year)
            .with_cities(selection.cities.cities().to_vec());
        let pollutants = selection.active_pollutants();
        let values: Vec<&str> = pollutants.iter().map(Pollutant::column).collect();

        let lazy = mean_by(
            dataset.filtered(&filter),
            &[columns::CITY, columns::YEAR_MONTH],
            &values,
        );
        AggregateView::collect(sort_ascending(lazy, &[columns::YEAR_MONTH]))
    }

    fn city_color(&self, city: &str) -> &'static str {
        let index = self
            .color_order
            .iter()
            .position(|c| c == city)
            .unwrap_or_default();
        CITY_COLORS[index % CITY_COLORS.len()]
    }

    fn frame(&self, view: &AggregateView) -> Result<ChartFrame> {
        let view_cities = view.strings(columns::CITY)?;
        let months: Vec<Option<i32>> = view.integers(columns::YEAR_MONTH)?;

        let mut renderers = Vec::new();
        for pollutant in self.selection.active_pollutants() {
            let values = view.floats(pollutant.column())?;
            let unit = pollutant.unit();

            for city in self.selection.cities.cities() {
                let rows: Vec<usize> = (0..view_cities.len())
                    .filter(|&r| view_cities[r] == *city)
                    .collect();
                if rows.is_empty() {
                    continue;
                }

                let x = rows
                    .iter()
                    .filter_map(|&r| months[r].and_then(|k| YearMonth::from_key(k).first_day()))
                    .collect();
                let n = rows.len();
                let line_data = BoundData::from_columns([
                    ("x", ColumnValues::Date(x)),
                    ("y", ColumnValues::Number(rows.iter().map(|&r| values[r]).collect())),
                    ("pollutant", ColumnValues::Text(vec![pollutant.to_string(); n])),
                    ("city", ColumnValues::Text(vec![city.clone(); n])),
                    ("unit", ColumnValues::Text(vec![unit.to_string(); n])),
                ])?;

                renderers.push(
                    Renderer::owning(
                        format!("{pollutant}:{city}"),
                        line_data,
                        "x",
                        "y",
                        self.city_color(city),
                    )
                    .with_label(format!("{pollutant} ({city})"))
                    .with_group(unit.label())
                    .with_dash(LINE_DASHES[pollutant.index() % LINE_DASHES.len()]),
                );
            }
        }

        let title = if view.is_empty() {
            format!(
                "No data available for the selected cities in {}",
                self.selection.year
            )
        } else {
            TITLE.to_string()
        };
        let mut meta = ChartMeta::new(title).with_labels("Date", "Concentration");
        meta.legend_visible = self.selection.legend_visible;

        Ok(ChartFrame::new(BoundData::from_view(view)?, meta).with_renderers(renderers))
    }
}

impl Tab for TimeSeriesTab {
    fn kind(&self) -> TabKind {
        TabKind::TimeSeries
    }

    fn recompute(&mut self, dataset: &Dataset) -> Result<()> {
        let view = Self::compute(dataset, &self.selection)?;
        let frame = self.frame(&view)?;
        self.binding.rebind(frame);
        Ok(())
    }

    fn bindings(&self) -> Vec<&ChartBinding> {
        vec![&self.binding]
    }
}
