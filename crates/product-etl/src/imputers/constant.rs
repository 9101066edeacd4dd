//! Constant-value imputation.
//!
//! Numeric columns get a numeric constant, everything else a text sentinel.

use crate::error::{EtlError, Result};
use crate::utils::{DtypeCategory, fill_numeric_nulls, fill_string_nulls, series_dtype_category};
use polars::prelude::*;
use tracing::debug;

/// Which fill was applied to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    /// Nulls replaced with the numeric constant.
    Numeric,
    /// Column cast to String and nulls replaced with the text sentinel.
    Text,
}

/// Fills nulls with fixed values chosen by column type.
#[derive(Debug, Clone)]
pub struct ConstantImputer {
    text_fill: String,
    numeric_fill: f64,
}

impl ConstantImputer {
    pub fn new(text_fill: impl Into<String>, numeric_fill: f64) -> Self {
        Self {
            text_fill: text_fill.into(),
            numeric_fill,
        }
    }

    /// Fill every null in `col_name`, replacing the column in place.
    pub fn fill_column(&self, df: &mut DataFrame, col_name: &str) -> Result<FillKind> {
        let series = df
            .column(col_name)
            .map_err(|_| EtlError::ColumnNotFound(col_name.to_string()))?
            .as_materialized_series()
            .clone();

        let (filled, kind) = match series_dtype_category(&series) {
            DtypeCategory::Numeric => (
                fill_numeric_nulls(&series, self.numeric_fill)?,
                FillKind::Numeric,
            ),
            DtypeCategory::String | DtypeCategory::Other => (
                fill_string_nulls(&series, &self.text_fill)?,
                FillKind::Text,
            ),
        };

        debug!(
            "Filled {} missing values in '{}' ({:?})",
            series.null_count(),
            col_name,
            kind
        );
        df.replace(col_name, filled)?;
        Ok(kind)
    }
}

impl Default for ConstantImputer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TEXT_FILL, 0.0)
    }
}
