//! Shared utilities for the cleaning stages.
//!
//! Column-type classification, strict numeric parsing and null filling live
//! here so the cleaner and the imputer agree on what "numeric" means.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a data type for fill and coercion purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// String/text type (including categoricals)
    String,
    /// Boolean, temporal and anything else
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::String
    } else {
        DtypeCategory::Other
    }
}

/// Get the dtype category of a Series.
pub fn series_dtype_category(series: &Series) -> DtypeCategory {
    get_dtype_category(series.dtype())
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Parse a cell as a number, accepting nothing but a plain float literal.
///
/// Surrounding whitespace is ignored. Currency symbols, thousands separators
/// and NaN are rejected, so `"₹40"`, `"1,200"` and `"nan"` all yield `None`.
///
/// # Example
///
/// ```rust,ignore
/// use product_etl::utils::parse_numeric_string;
///
/// assert_eq!(parse_numeric_string(" 40 "), Some(40.0));
/// assert_eq!(parse_numeric_string("abc"), None);
/// ```
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Names of the columns holding at least one null, in column order.
pub fn columns_with_nulls(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| col.null_count() > 0)
        .map(|col| col.name().to_string())
        .collect()
}

/// Fill null values in a numeric Series with a specific value.
///
/// The fill happens in the series' own dtype, so present values are never
/// round-tripped through `f64`. Integer series are widened to `Float64` only
/// when `fill_value` is fractional or out of the dtype's range.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    macro_rules! fill_int {
        ($ca:expr, $ty:ty) => {
            if fill_value.fract() == 0.0
                && fill_value >= <$ty>::MIN as f64
                && fill_value <= <$ty>::MAX as f64
            {
                return Ok($ca.fill_null_with_values(fill_value as $ty)?.into_series());
            }
        };
    }

    match series.dtype() {
        DataType::Int8 => fill_int!(series.i8()?, i8),
        DataType::Int16 => fill_int!(series.i16()?, i16),
        DataType::Int32 => fill_int!(series.i32()?, i32),
        DataType::Int64 => fill_int!(series.i64()?, i64),
        DataType::UInt8 => fill_int!(series.u8()?, u8),
        DataType::UInt16 => fill_int!(series.u16()?, u16),
        DataType::UInt32 => fill_int!(series.u32()?, u32),
        DataType::UInt64 => fill_int!(series.u64()?, u64),
        DataType::Float32 => {
            return Ok(series
                .f32()?
                .fill_null_with_values(fill_value as f32)?
                .into_series());
        }
        _ => {}
    }

    let as_float = series.cast(&DataType::Float64)?;
    Ok(as_float
        .f64()?
        .fill_null_with_values(fill_value)?
        .into_series())
}

/// Fill null values with `fill_value`, casting the Series to String first.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let as_str = series.cast(&DataType::String)?;
    let filled: StringChunked = as_str
        .str()?
        .into_iter()
        .map(|val| Some(val.unwrap_or(fill_value)))
        .collect();

    Ok(filled.with_name(series.name().clone()).into_series())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_dtype_category() {
        assert_eq!(get_dtype_category(&DataType::Int64), DtypeCategory::Numeric);
        assert_eq!(get_dtype_category(&DataType::Float64), DtypeCategory::Numeric);
        assert_eq!(get_dtype_category(&DataType::String), DtypeCategory::String);
        assert_eq!(get_dtype_category(&DataType::Boolean), DtypeCategory::Other);
        assert_eq!(get_dtype_category(&DataType::Date), DtypeCategory::Other);
    }

    #[test]
    fn test_parse_numeric_string() {
        assert_eq!(parse_numeric_string("40"), Some(40.0));
        assert_eq!(parse_numeric_string(" 12.5 "), Some(12.5));
        assert_eq!(parse_numeric_string("-3"), Some(-3.0));
        assert_eq!(parse_numeric_string("1e3"), Some(1000.0));
        assert_eq!(parse_numeric_string(""), None);
        assert_eq!(parse_numeric_string("abc"), None);
        assert_eq!(parse_numeric_string("1,200"), None);
        assert_eq!(parse_numeric_string("₹40"), None);
        assert_eq!(parse_numeric_string("NaN"), None);
    }

    #[test]
    fn test_columns_with_nulls() {
        let df = df![
            "a" => [Some(1), None],
            "b" => [Some("x"), Some("y")],
            "c" => [None::<&str>, Some("z")],
        ]
        .unwrap();

        assert_eq!(columns_with_nulls(&df), vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_fill_numeric_nulls_keeps_integer_dtype() {
        let series = Series::new("qty".into(), &[Some(1i64), None, Some(3)]);
        let filled = fill_numeric_nulls(&series, 0.0).unwrap();

        assert_eq!(filled.dtype(), &DataType::Int64);
        assert_eq!(filled.null_count(), 0);
        assert_eq!(filled.i64().unwrap().get(1), Some(0));
    }

    #[test]
    fn test_fill_numeric_nulls_keeps_large_integers_exact() {
        let id = 9_007_199_254_740_993i64;
        let series = Series::new("ProductId".into(), &[Some(id), None]);
        let filled = fill_numeric_nulls(&series, 0.0).unwrap();

        assert_eq!(filled.dtype(), &DataType::Int64);
        assert_eq!(filled.i64().unwrap().get(0), Some(id));
        assert_eq!(filled.i64().unwrap().get(1), Some(0));
    }

    #[test]
    fn test_fill_numeric_nulls_unsigned_out_of_range_widens() {
        let series = Series::new("stock".into(), &[Some(5u32), None]);
        let filled = fill_numeric_nulls(&series, -1.0).unwrap();

        assert_eq!(filled.dtype(), &DataType::Float64);
        assert_eq!(filled.f64().unwrap().get(0), Some(5.0));
        assert_eq!(filled.f64().unwrap().get(1), Some(-1.0));
    }

    #[test]
    fn test_fill_numeric_nulls_float32_stays_float32() {
        let series = Series::new("weight".into(), &[Some(0.5f32), None]);
        let filled = fill_numeric_nulls(&series, 0.0).unwrap();

        assert_eq!(filled.dtype(), &DataType::Float32);
        assert_eq!(filled.f32().unwrap().get(1), Some(0.0));
    }

    #[test]
    fn test_fill_numeric_nulls_fractional_widens() {
        let series = Series::new("qty".into(), &[Some(1i64), None]);
        let filled = fill_numeric_nulls(&series, 0.5).unwrap();

        assert_eq!(filled.dtype(), &DataType::Float64);
        assert_eq!(filled.f64().unwrap().get(1), Some(0.5));
    }

    #[test]
    fn test_fill_string_nulls() {
        let series = Series::new("brand".into(), &[Some("Amul"), None]);
        let filled = fill_string_nulls(&series, "Unknown").unwrap();

        assert_eq!(filled.name().as_str(), "brand");
        assert_eq!(filled.str().unwrap().get(1), Some("Unknown"));
    }

    #[test]
    fn test_fill_string_nulls_casts_booleans() {
        let series = Series::new("organic".into(), &[Some(true), None]);
        let filled = fill_string_nulls(&series, "Unknown").unwrap();

        assert_eq!(filled.dtype(), &DataType::String);
        assert_eq!(filled.str().unwrap().get(0), Some("true"));
        assert_eq!(filled.str().unwrap().get(1), Some("Unknown"));
    }
}
