//! Aggregate views produced by the per-tab view models.
//!
//! An `AggregateView` wraps a collected polars frame with one row per group
//! key present in the filtered subset. Helper builders express the grouped
//! means and orderings shared by the tabs.

use crate::error::Result;
use crate::stats;
use polars::prelude::*;

/// Derived table recomputed in full on every selection change
#[derive(Debug, Clone)]
pub struct AggregateView {
    frame: DataFrame,
}

impl AggregateView {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Execute a lazy query into a view
    pub fn collect(lazy: LazyFrame) -> Result<Self> {
        Ok(Self::new(lazy.collect()?))
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Text column; missing cells become empty strings
    pub fn strings(&self, name: &str) -> Result<Vec<String>> {
        let series = self.frame.column(name)?.as_materialized_series();
        let cast = series.cast(&DataType::String)?;
        let values = cast
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();
        Ok(values)
    }

    /// Numeric column as optional floats; NaN becomes missing
    pub fn floats(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let series = self.frame.column(name)?.as_materialized_series();
        let cast = series.cast(&DataType::Float64)?;
        let values = cast
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(values)
    }

    /// Integer column; missing cells become `None`
    pub fn integers(&self, name: &str) -> Result<Vec<Option<i32>>> {
        let series = self.frame.column(name)?.as_materialized_series();
        let cast = series.cast(&DataType::Int32)?;
        let values = cast.i32()?.into_iter().collect();
        Ok(values)
    }

    /// Observed min/max of a numeric column, ignoring missing values
    pub fn value_range(&self, name: &str) -> Result<Option<(f64, f64)>> {
        Ok(stats::value_range(self.floats(name)?.into_iter().flatten()))
    }
}

/// Group by `keys` (first-appearance order) and average `values`.
/// Output columns keep the value column names.
pub fn mean_by(lazy: LazyFrame, keys: &[&str], values: &[&str]) -> LazyFrame {
    let key_exprs: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();
    let agg_exprs: Vec<Expr> = values.iter().map(|v| col(*v).mean()).collect();
    lazy.group_by_stable(key_exprs).agg(agg_exprs)
}

/// Stable descending sort on one column, missing values last
pub fn sort_descending(lazy: LazyFrame, column: &str) -> LazyFrame {
    lazy.sort_by_exprs(
        [col(column)],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_nulls_last(true)
            .with_maintain_order(true),
    )
}

/// Stable ascending sort on the given columns
pub fn sort_ascending(lazy: LazyFrame, columns: &[&str]) -> LazyFrame {
    let exprs: Vec<Expr> = columns.iter().map(|c| col(*c)).collect();
    lazy.sort_by_exprs(
        exprs,
        SortMultipleOptions::default()
            .with_nulls_last(true)
            .with_maintain_order(true),
    )
}
