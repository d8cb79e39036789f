//! Chart bindings: the bound data, metadata and renderer set of one chart.
//!
//! A [`ChartBinding`] owns a [`ChartFrame`] and replaces it wholesale on
//! every recompute. The frame carries the column data the renderers read,
//! the chart metadata kept in sync with it (title, categorical axes, color
//! scale, value range) and the renderer set with its legend. Replacing the
//! frame is a single assignment, so observers never see a partially updated
//! chart.

use crate::constants::{DEFAULT_COLOR_HIGH, DEFAULT_COLOR_LOW, NO_DATA_COLOR};
use crate::error::{DashboardError, Result};
use crate::view::AggregateView;
use chrono::NaiveDate;
use polars::prelude::DataType;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Ordered values of one bound column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnValues {
    Text(Vec<String>),
    Number(Vec<Option<f64>>),
    Integer(Vec<Option<i32>>),
    Date(Vec<NaiveDate>),
    /// Patch coordinates; `None` separates polygon parts
    Shape(Vec<Vec<Option<f64>>>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Number(v) => v.len(),
            ColumnValues::Integer(v) => v.len(),
            ColumnValues::Date(v) => v.len(),
            ColumnValues::Shape(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            ColumnValues::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_numbers(&self) -> Option<&[Option<f64>]> {
        match self {
            ColumnValues::Number(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_integers(&self) -> Option<&[Option<i32>]> {
        match self {
            ColumnValues::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_dates(&self) -> Option<&[NaiveDate]> {
        match self {
            ColumnValues::Date(v) => Some(v),
            _ => None,
        }
    }
}

/// Column name to values; every column has the same length
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BoundData {
    columns: BTreeMap<String, ColumnValues>,
}

impl BoundData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from named columns, rejecting unequal lengths
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ColumnValues)>,
        S: Into<String>,
    {
        columns
            .into_iter()
            .try_fold(Self::new(), |data, (name, values)| data.with_column(name, values))
    }

    /// Every column of an aggregate view, typed by its polars dtype
    pub fn from_view(view: &AggregateView) -> Result<Self> {
        let mut data = Self::new();
        for column in view.frame().get_columns() {
            let name = column.name().to_string();
            let values = match column.dtype() {
                DataType::String => ColumnValues::Text(view.strings(&name)?),
                DataType::Float64 | DataType::Float32 => ColumnValues::Number(view.floats(&name)?),
                dtype if dtype.is_integer() => ColumnValues::Integer(view.integers(&name)?),
                _ => ColumnValues::Text(view.strings(&name)?),
            };
            data = data.with_column(name, values)?;
        }
        Ok(data)
    }

    /// Empty data with the given column names
    pub fn empty_text<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = names
            .into_iter()
            .map(|n| (n.into(), ColumnValues::Text(Vec::new())))
            .collect();
        Self { columns }
    }

    /// Add or replace a column
    pub fn with_column(mut self, name: impl Into<String>, values: ColumnValues) -> Result<Self> {
        let name = name.into();
        let expected = self
            .columns
            .iter()
            .find(|(existing, _)| **existing != name)
            .map(|(_, v)| v.len());

        if let Some(expected) = expected {
            if values.len() != expected {
                return Err(DashboardError::ColumnLengthMismatch {
                    column: name,
                    expected,
                    found: values.len(),
                });
            }
        }

        self.columns.insert(name, values);
        Ok(self)
    }

    /// Row count shared by all columns
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, ColumnValues::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column(&self, name: &str) -> Option<&ColumnValues> {
        self.columns.get(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Text column as borrowed strings, empty when absent
    pub fn text(&self, name: &str) -> &[String] {
        self.column(name).and_then(ColumnValues::as_text).unwrap_or(&[])
    }

    /// Numeric column, empty when absent
    pub fn numbers(&self, name: &str) -> &[Option<f64>] {
        self.column(name)
            .and_then(ColumnValues::as_numbers)
            .unwrap_or(&[])
    }
}

/// Linear color mapping over the active value column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    pub field: String,
    pub low: f64,
    pub high: f64,
    pub palette: String,
    pub nan_color: String,
}

impl ColorScale {
    pub fn new(field: impl Into<String>, palette: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            low: DEFAULT_COLOR_LOW,
            high: DEFAULT_COLOR_HIGH,
            palette: palette.into(),
            nan_color: NO_DATA_COLOR.to_string(),
        }
    }

    /// Bounds from an observed range; (0, 1) when nothing was observed
    pub fn with_range(mut self, range: Option<(f64, f64)>) -> Self {
        let (low, high) = range.unwrap_or((DEFAULT_COLOR_LOW, DEFAULT_COLOR_HIGH));
        self.low = low;
        self.high = high;
        self
    }
}

/// Numeric axis bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub start: f64,
    pub end: f64,
}

impl AxisRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Metadata kept in sync with the bound data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartMeta {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Categorical x axis, empty for continuous axes
    pub x_factors: Vec<String>,
    /// Categorical y axis, empty for continuous axes
    pub y_factors: Vec<String>,
    pub color_scale: Option<ColorScale>,
    pub y_range: Option<AxisRange>,
    pub legend_visible: bool,
}

impl ChartMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            x_factors: Vec::new(),
            y_factors: Vec::new(),
            color_scale: None,
            y_range: None,
            legend_visible: true,
        }
    }

    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_x_factors(mut self, factors: Vec<String>) -> Self {
        self.x_factors = factors;
        self
    }

    pub fn with_y_factors(mut self, factors: Vec<String>) -> Self {
        self.y_factors = factors;
        self
    }

    pub fn with_color_scale(mut self, scale: ColorScale) -> Self {
        self.color_scale = Some(scale);
        self
    }

    pub fn with_y_range(mut self, range: AxisRange) -> Self {
        self.y_range = Some(range);
        self
    }
}

impl Default for ChartMeta {
    fn default() -> Self {
        Self::new("")
    }
}

/// Where a renderer reads its values from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum RendererSource {
    /// The binding's bound data
    Shared,
    /// Data owned by this renderer
    Own(BoundData),
}

/// One glyph series drawn from bound data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Renderer {
    pub id: String,
    pub label: String,
    /// Legend group the renderer belongs to
    pub group: String,
    pub x_field: String,
    pub y_field: String,
    pub color: String,
    pub dash: Option<String>,
    pub visible: bool,
    pub source: RendererSource,
}

impl Renderer {
    /// Visible renderer over the shared bound data
    pub fn shared(
        id: impl Into<String>,
        x_field: impl Into<String>,
        y_field: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            group: id.clone(),
            id,
            x_field: x_field.into(),
            y_field: y_field.into(),
            color: color.into(),
            dash: None,
            visible: true,
            source: RendererSource::Shared,
        }
    }

    /// Visible renderer over its own data
    pub fn owning(
        id: impl Into<String>,
        data: BoundData,
        x_field: impl Into<String>,
        y_field: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            source: RendererSource::Own(data),
            ..Self::shared(id, x_field, y_field, color)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_dash(mut self, dash: impl Into<String>) -> Self {
        self.dash = Some(dash.into());
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Legend item covering the renderers of one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub renderer_ids: Vec<String>,
}

/// Everything a chart renders from, replaced as one value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartFrame {
    pub data: BoundData,
    pub meta: ChartMeta,
    pub renderers: Vec<Renderer>,
    pub legend: Vec<LegendEntry>,
}

impl ChartFrame {
    pub fn new(data: BoundData, meta: ChartMeta) -> Self {
        Self {
            data,
            meta,
            renderers: Vec::new(),
            legend: Vec::new(),
        }
    }

    /// Attach renderers and derive the legend from their groups.
    /// A group appears only if at least one renderer belongs to it.
    pub fn with_renderers(mut self, renderers: Vec<Renderer>) -> Self {
        self.legend = legend_for(&renderers);
        self.renderers = renderers;
        self
    }

    pub fn renderer(&self, id: &str) -> Option<&Renderer> {
        self.renderers.iter().find(|r| r.id == id)
    }
}

/// Legend entries grouped in first-appearance order
pub fn legend_for(renderers: &[Renderer]) -> Vec<LegendEntry> {
    let mut legend: Vec<LegendEntry> = Vec::new();
    for renderer in renderers {
        match legend.iter_mut().find(|e| e.label == renderer.group) {
            Some(entry) => entry.renderer_ids.push(renderer.id.clone()),
            None => legend.push(LegendEntry {
                label: renderer.group.clone(),
                renderer_ids: vec![renderer.id.clone()],
            }),
        }
    }
    legend
}

/// Renderer ids added, removed and kept by a rebind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RendererDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub retained: Vec<String>,
}

impl RendererDiff {
    pub fn between(old: &[Renderer], new: &[Renderer]) -> Self {
        let old_ids: BTreeSet<&str> = old.iter().map(|r| r.id.as_str()).collect();
        let new_ids: BTreeSet<&str> = new.iter().map(|r| r.id.as_str()).collect();

        Self {
            added: new
                .iter()
                .filter(|r| !old_ids.contains(r.id.as_str()))
                .map(|r| r.id.clone())
                .collect(),
            removed: old
                .iter()
                .filter(|r| !new_ids.contains(r.id.as_str()))
                .map(|r| r.id.clone())
                .collect(),
            retained: new
                .iter()
                .filter(|r| old_ids.contains(r.id.as_str()))
                .map(|r| r.id.clone())
                .collect(),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Live chart state of one panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBinding {
    name: String,
    frame: ChartFrame,
}

impl ChartBinding {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frame: ChartFrame::default(),
        }
    }

    /// Replace data, metadata, renderers and legend in one step
    pub fn rebind(&mut self, frame: ChartFrame) -> RendererDiff {
        let diff = RendererDiff::between(&self.frame.renderers, &frame.renderers);
        debug!(
            "Rebind {}: {} rows, {} renderers (+{} -{} ={})",
            self.name,
            frame.data.len(),
            frame.renderers.len(),
            diff.added.len(),
            diff.removed.len(),
            diff.retained.len()
        );
        self.frame = frame;
        diff
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> &ChartFrame {
        &self.frame
    }

    pub fn data(&self) -> &BoundData {
        &self.frame.data
    }

    pub fn meta(&self) -> &ChartMeta {
        &self.frame.meta
    }

    pub fn renderers(&self) -> &[Renderer] {
        &self.frame.renderers
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.frame.legend
    }

    /// Flip legend visibility, returning the new state
    pub fn toggle_legend(&mut self) -> bool {
        self.frame.meta.legend_visible = !self.frame.meta.legend_visible;
        self.frame.meta.legend_visible
    }

    /// Show only renderers whose group is in `groups`
    pub fn show_groups(&mut self, groups: &[String]) {
        for renderer in &mut self.frame.renderers {
            renderer.visible = groups.contains(&renderer.group);
        }
    }
}
