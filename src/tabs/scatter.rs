//! AQI vs PM2.5 scatter over a fixed random sample.
//!
//! The sample is drawn once at startup with a fixed seed and extended with
//! a marker size scaled from PM10 and the AQI category. Country and city
//! selects narrow the sample; changing the country rebuilds the city
//! options before the chart recomputes.

use super::{Tab, TabKind, dates_from_days};
use crate::binding::{BoundData, ChartBinding, ChartFrame, ChartMeta, ColorScale, ColumnValues, Renderer};
use crate::config::DashboardConfig;
use crate::constants::{
    ALL_OPTION, DIVERGING_PALETTE, SCATTER_MIN_SIZE, SCATTER_SIZE_SPAN, aqi_thresholds, columns,
};
use crate::dataset::{Dataset, RecordFilter};
use crate::error::Result;
use crate::models::{AqiCategory, Pollutant};
use crate::selection::{Choice, require_option};
use crate::view::AggregateView;
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

pub const PM10_SCALED: &str = "PM10_Scaled";
pub const AQI_CATEGORY: &str = "AQI_Category";
const TITLE: &str = "AQI vs PM2.5 Scatter Plot";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScatterSelection {
    pub country: Choice,
    pub city: Choice,
}

impl ScatterSelection {
    fn filter(&self) -> RecordFilter {
        let mut filter = RecordFilter::new();
        if let Some(country) = self.country.as_option() {
            filter = filter.with_country(country);
        }
        if let Some(city) = self.city.as_option() {
            filter = filter.with_city(city);
        }
        filter
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScatterEvent {
    Country(String),
    City(String),
}

#[derive(Debug, Clone)]
pub struct ScatterTab {
    selection: ScatterSelection,
    country_options: Vec<String>,
    city_options: Vec<String>,
    sample: DataFrame,
    binding: ChartBinding,
}

impl ScatterTab {
    pub fn new(dataset: &Dataset, config: &DashboardConfig) -> Result<Self> {
        let sample = build_sample(dataset, config.scatter_sample_size, config.scatter_seed)?;
        let mut country_options = vec![ALL_OPTION.to_string()];
        country_options.extend(dataset.countries());

        let mut tab = Self {
            selection: ScatterSelection::default(),
            country_options,
            city_options: vec![ALL_OPTION.to_string()],
            sample,
            binding: ChartBinding::new("scatter"),
        };
        tab.recompute(dataset)?;
        Ok(tab)
    }

    pub fn selection(&self) -> &ScatterSelection {
        &self.selection
    }

    pub fn country_options(&self) -> &[String] {
        &self.country_options
    }

    pub fn city_options(&self) -> &[String] {
        &self.city_options
    }

    pub fn sample(&self) -> &DataFrame {
        &self.sample
    }

    pub fn binding(&self) -> &ChartBinding {
        &self.binding
    }

    pub fn apply(&mut self, dataset: &Dataset, event: ScatterEvent) -> Result<()> {
        match event {
            ScatterEvent::Country(country) => {
                require_option("Country", &country, &self.country_options)?;
                let choice = Choice::parse(&country);

                // City options, then the city value, then the chart
                self.city_options = city_options_for(dataset, &choice);
                self.selection.city = Choice::All;
                self.selection.country = choice;
                self.recompute(dataset)
            }
            ScatterEvent::City(city) => {
                require_option("City", &city, &self.city_options)?;
                self.selection.city = Choice::parse(&city);
                self.recompute(dataset)
            }
        }
    }

    /// Rows of the sample matching the selection
    pub fn compute(&self) -> Result<AggregateView> {
        let lazy = self.sample.clone().lazy();
        let lazy = match self.selection.filter().to_expr() {
            Some(predicate) => lazy.filter(predicate),
            None => lazy,
        };
        AggregateView::collect(lazy)
    }
}

impl Tab for ScatterTab {
    fn kind(&self) -> TabKind {
        TabKind::Scatter
    }

    fn recompute(&mut self, _dataset: &Dataset) -> Result<()> {
        let view = self.compute()?;
        let frame = chart_frame(&view, &self.selection)?;
        self.binding.rebind(frame);
        Ok(())
    }

    fn bindings(&self) -> Vec<&ChartBinding> {
        vec![&self.binding]
    }
}

fn city_options_for(dataset: &Dataset, country: &Choice) -> Vec<String> {
    let mut options = vec![ALL_OPTION.to_string()];
    if let Some(country) = country.as_option() {
        options.extend(dataset.cities_of(country));
    }
    options
}

/// Seeded sample of the dataset with marker size and AQI category columns
pub fn build_sample(dataset: &Dataset, size: usize, seed: u64) -> Result<DataFrame> {
    let frame = dataset.frame();
    let sample = if size >= frame.height() {
        frame.clone()
    } else {
        frame.sample_n_literal(size, false, false, Some(seed))?
    };
    debug!("Scatter sample: {} of {} rows", sample.height(), frame.height());

    let pm10 = Pollutant::Pm10.column();
    let span = col(pm10).max() - col(pm10).min();
    let scaled = when(span.clone().gt(lit(0.0)))
        .then((col(pm10) - col(pm10).min()) / span * lit(SCATTER_SIZE_SPAN) + lit(SCATTER_MIN_SIZE))
        .otherwise(lit(SCATTER_MIN_SIZE));

    let frame = sample
        .lazy()
        .with_columns([scaled.alias(PM10_SCALED), aqi_category_expr().alias(AQI_CATEGORY)])
        .collect()?;
    Ok(frame)
}

/// AQI band label; missing AQI falls through to the last band
fn aqi_category_expr() -> Expr {
    let aqi = || col(columns::AQI);
    when(aqi().lt_eq(lit(aqi_thresholds::GOOD)))
        .then(lit(AqiCategory::Good.label()))
        .when(aqi().lt_eq(lit(aqi_thresholds::MODERATE)))
        .then(lit(AqiCategory::Moderate.label()))
        .when(aqi().lt_eq(lit(aqi_thresholds::UNHEALTHY)))
        .then(lit(AqiCategory::Unhealthy.label()))
        .when(aqi().lt_eq(lit(aqi_thresholds::VERY_UNHEALTHY)))
        .then(lit(AqiCategory::VeryUnhealthy.label()))
        .otherwise(lit(AqiCategory::Hazardous.label()))
}

/// Chart state for the filtered sample
pub fn chart_frame(view: &AggregateView, selection: &ScatterSelection) -> Result<ChartFrame> {
    let dates = dates_from_days(&view.integers(columns::DAY)?);
    let data = BoundData::from_view(view)?.with_column(columns::DATE, ColumnValues::Date(dates))?;

    let scale = ColorScale::new(columns::AQI, DIVERGING_PALETTE).with_range(view.value_range(columns::AQI)?);
    let title = if view.is_empty() {
        format!(
            "No data available for {} / {}",
            selection.country, selection.city
        )
    } else {
        TITLE.to_string()
    };
    let meta = ChartMeta::new(title)
        .with_labels(Pollutant::Pm25.column(), columns::AQI)
        .with_color_scale(scale);

    let points = Renderer::shared("points", Pollutant::Pm25.column(), columns::AQI, DIVERGING_PALETTE)
        .with_label("Observations");

    Ok(ChartFrame::new(data, meta).with_renderers(vec![points]))
}
