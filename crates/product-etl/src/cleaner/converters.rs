//! Type conversion functions for data cleaning.

use crate::error::Result;
use crate::utils::{DtypeCategory, parse_numeric_string, series_dtype_category};
use polars::prelude::*;

/// Reinterpret a series as numbers, turning anything unparseable into null.
///
/// Numeric series pass through untouched. Text series are parsed cell by
/// cell with [`parse_numeric_string`] into `Float64`. Other dtypes use a
/// non-strict cast to `Float64`.
pub(crate) fn coerce_to_numeric(series: &Series) -> Result<Series> {
    match series_dtype_category(series) {
        DtypeCategory::Numeric => Ok(series.clone()),
        DtypeCategory::String => {
            let as_str = series.cast(&DataType::String)?;
            let parsed: Float64Chunked = as_str
                .str()?
                .into_iter()
                .map(|opt_val| opt_val.and_then(parse_numeric_string))
                .collect();

            Ok(parsed.with_name(series.name().clone()).into_series())
        }
        DtypeCategory::Other => Ok(series.cast(&DataType::Float64)?),
    }
}

/// Number of cells that held a value before coercion but are null after it.
pub(crate) fn values_lost(before: &Series, after: &Series) -> usize {
    after.null_count().saturating_sub(before.null_count())
}
