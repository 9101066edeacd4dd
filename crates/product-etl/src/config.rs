//! Configuration types for the product ETL.
//!
//! This module provides configuration options using the builder pattern.
//! Every field has a default, so an empty JSON object `{}` is a valid
//! configuration file and reproduces the stock paths.

use crate::error::{EtlError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the raw product export.
pub const DEFAULT_INPUT_PATH: &str = "data/raw/bigbasket_products.csv";

/// Default location of the cleaned dataset.
pub const DEFAULT_OUTPUT_PATH: &str = "data/processed/cleaned_bigbasket_products.csv";

/// Column coerced to numeric after filling.
pub const DEFAULT_PRICE_COLUMN: &str = "Price";

/// Substitute for missing values in text columns.
pub const DEFAULT_TEXT_FILL: &str = "Unknown";

/// Cell contents read as missing, on top of empty fields.
///
/// The usual spellings spreadsheet and dataframe exports use for "no value".
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Configuration for an ETL run.
///
/// Use [`EtlConfig::builder()`] to create a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use product_etl::config::EtlConfig;
///
/// let config = EtlConfig::builder()
///     .input_path("exports/products.csv")
///     .output_path("exports/products_clean.csv")
///     .price_column("MRP")
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    /// Delimited file to read.
    /// Default: "data/raw/bigbasket_products.csv"
    pub input_path: PathBuf,

    /// Delimited file to write. Overwritten if it exists.
    /// Default: "data/processed/cleaned_bigbasket_products.csv"
    pub output_path: PathBuf,

    /// Field separator used for both reading and writing.
    /// Default: ','
    pub separator: char,

    /// Number of rows used for schema inference. `None` scans every row.
    /// Default: None
    pub infer_schema_length: Option<usize>,

    /// Cell contents treated as missing when reading. Empty fields are
    /// always missing.
    /// Default: [`DEFAULT_NULL_VALUES`]
    pub null_values: Vec<String>,

    /// Name of the column coerced to numeric.
    /// Default: "Price"
    pub price_column: String,

    /// Value written into missing cells of non-numeric columns.
    /// Default: "Unknown"
    pub text_fill_value: String,

    /// Value written into missing cells of numeric columns.
    /// Default: 0.0
    pub numeric_fill_value: f64,

    /// Whether to drop exact duplicate rows.
    /// Default: true
    pub remove_duplicates: bool,

    /// Whether the price column takes part in the generic missing-value fill.
    ///
    /// When true, missing prices are filled by the generic rule (`0` for a
    /// numeric column, the text sentinel otherwise) and only then coerced.
    /// When false, missing prices stay missing after coercion, which makes
    /// cleaning idempotent for the price column too.
    /// Default: true
    pub fill_price_column: bool,

    /// Whether to create the output file's parent directory.
    /// Default: true
    pub create_output_dir: bool,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            separator: ',',
            infer_schema_length: None,
            null_values: DEFAULT_NULL_VALUES.iter().map(|v| v.to_string()).collect(),
            price_column: DEFAULT_PRICE_COLUMN.to_string(),
            text_fill_value: DEFAULT_TEXT_FILL.to_string(),
            numeric_fill_value: 0.0,
            remove_duplicates: true,
            fill_price_column: true,
            create_output_dir: true,
        }
    }
}

impl EtlConfig {
    /// Create a new configuration builder.
    pub fn builder() -> EtlConfigBuilder {
        EtlConfigBuilder::default()
    }

    /// Read a configuration from a JSON file and validate it.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .context(format!("Failed to read config file {}", path.display()))?;
        let config: EtlConfig = serde_json::from_str(&raw)
            .map_err(|e| EtlError::from(e).with_context(format!("Invalid config file {}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Separator as the byte polars expects.
    ///
    /// Only meaningful after [`EtlConfig::validate`] has accepted the config.
    pub fn separator_byte(&self) -> u8 {
        self.separator as u8
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path"));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("output_path"));
        }

        if self.input_path == self.output_path {
            return Err(ConfigValidationError::OutputOverwritesInput(
                self.input_path.clone(),
            ));
        }

        if !self.separator.is_ascii() || matches!(self.separator, '"' | '\n' | '\r') {
            return Err(ConfigValidationError::InvalidSeparator(self.separator));
        }

        if self.price_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyPriceColumn);
        }

        if self.text_fill_value.is_empty() {
            return Err(ConfigValidationError::EmptyTextFill);
        }

        if self.null_values.contains(&self.text_fill_value) {
            return Err(ConfigValidationError::TextFillIsNullValue(
                self.text_fill_value.clone(),
            ));
        }

        if !self.numeric_fill_value.is_finite() {
            return Err(ConfigValidationError::NonFiniteNumericFill(
                self.numeric_fill_value,
            ));
        }

        if self.infer_schema_length == Some(0) {
            return Err(ConfigValidationError::ZeroInferSchemaLength);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("'{0}' must not be empty")]
    EmptyPath(&'static str),

    #[error("Output path {} would overwrite the input file", .0.display())]
    OutputOverwritesInput(PathBuf),

    #[error("Invalid separator {0:?} (must be a single ASCII character other than a quote or newline)")]
    InvalidSeparator(char),

    #[error("Price column name must not be empty")]
    EmptyPriceColumn,

    #[error("Text fill value must not be empty")]
    EmptyTextFill,

    #[error("Text fill value '{0}' is also listed in null_values")]
    TextFillIsNullValue(String),

    #[error("Numeric fill value must be finite, got {0}")]
    NonFiniteNumericFill(f64),

    #[error("infer_schema_length must be at least 1 (use null to scan all rows)")]
    ZeroInferSchemaLength,
}

/// Builder for [`EtlConfig`] with fluent API.
///
/// Starts from [`EtlConfig::default()`] or from an existing config via
/// [`EtlConfigBuilder::from_config`], so CLI flags can be layered on top of a
/// config file.
#[derive(Debug, Default)]
pub struct EtlConfigBuilder {
    base: Option<EtlConfig>,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    separator: Option<char>,
    infer_schema_length: Option<Option<usize>>,
    null_values: Option<Vec<String>>,
    price_column: Option<String>,
    text_fill_value: Option<String>,
    numeric_fill_value: Option<f64>,
    remove_duplicates: Option<bool>,
    fill_price_column: Option<bool>,
    create_output_dir: Option<bool>,
}

impl EtlConfigBuilder {
    /// Start from an existing configuration instead of the defaults.
    pub fn from_config(config: EtlConfig) -> Self {
        Self {
            base: Some(config),
            ..Self::default()
        }
    }

    /// Set the input file path.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the output file path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Set the field separator.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Limit schema inference to the first `rows` rows (`None` = all rows).
    pub fn infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Replace the list of cell contents read as missing.
    pub fn null_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the name of the column coerced to numeric.
    pub fn price_column(mut self, name: impl Into<String>) -> Self {
        self.price_column = Some(name.into());
        self
    }

    /// Set the fill value for non-numeric columns.
    pub fn text_fill_value(mut self, value: impl Into<String>) -> Self {
        self.text_fill_value = Some(value.into());
        self
    }

    /// Set the fill value for numeric columns.
    pub fn numeric_fill_value(mut self, value: f64) -> Self {
        self.numeric_fill_value = Some(value);
        self
    }

    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = Some(remove);
        self
    }

    /// Include the price column in the generic missing-value fill.
    pub fn fill_price_column(mut self, fill: bool) -> Self {
        self.fill_price_column = Some(fill);
        self
    }

    /// Enable or disable creating the output directory.
    pub fn create_output_dir(mut self, create: bool) -> Self {
        self.create_output_dir = Some(create);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `EtlConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<EtlConfig, ConfigValidationError> {
        let base = self.base.unwrap_or_default();
        let config = EtlConfig {
            input_path: self.input_path.unwrap_or(base.input_path),
            output_path: self.output_path.unwrap_or(base.output_path),
            separator: self.separator.unwrap_or(base.separator),
            infer_schema_length: self.infer_schema_length.unwrap_or(base.infer_schema_length),
            null_values: self.null_values.unwrap_or(base.null_values),
            price_column: self.price_column.unwrap_or(base.price_column),
            text_fill_value: self.text_fill_value.unwrap_or(base.text_fill_value),
            numeric_fill_value: self.numeric_fill_value.unwrap_or(base.numeric_fill_value),
            remove_duplicates: self.remove_duplicates.unwrap_or(base.remove_duplicates),
            fill_price_column: self.fill_price_column.unwrap_or(base.fill_price_column),
            create_output_dir: self.create_output_dir.unwrap_or(base.create_output_dir),
        };

        config.validate()?;
        Ok(config)
    }
}
