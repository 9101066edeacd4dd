//! Loading delimited files into a [`DataFrame`].

use crate::config::EtlConfig;
use crate::error::{EtlError, Result, ResultExt};
use polars::io::csv::read::{CsvReadOptions, NullValues};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Reads a delimited file with a header row.
///
/// Empty fields and any cell matching one of the configured null tokens are
/// read as null, and schema inference ignores them.
#[derive(Debug, Clone)]
pub struct DataLoader {
    separator: u8,
    infer_schema_length: Option<usize>,
    null_values: Vec<String>,
}

impl DataLoader {
    pub fn new(config: &EtlConfig) -> Self {
        Self {
            separator: config.separator_byte(),
            infer_schema_length: config.infer_schema_length,
            null_values: config.null_values.clone(),
        }
    }

    /// Load `path`, logging the outcome either way.
    pub fn load(&self, path: &Path) -> Result<DataFrame> {
        match self.read(path) {
            Ok(df) => {
                info!(
                    "Dataset loaded successfully with {} rows and {} columns.",
                    df.height(),
                    df.width()
                );
                Ok(df)
            }
            Err(e) => {
                error!("Error loading dataset: {}", e);
                Err(e)
            }
        }
    }

    /// Like [`DataLoader::load`], but collapses any failure into `None`.
    pub fn load_or_none(&self, path: &Path) -> Option<DataFrame> {
        self.load(path).ok()
    }

    fn read(&self, path: &Path) -> Result<DataFrame> {
        if !path.is_file() {
            return Err(EtlError::InputNotFound(path.to_path_buf()));
        }

        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .with_parse_options(
                CsvParseOptions::default()
                    .with_separator(self.separator)
                    .with_quote_char(Some(b'"'))
                    .with_null_values(self.null_values()),
            )
            .try_into_reader_with_file_path(Some(PathBuf::from(path)))
            .and_then(|reader| reader.finish())
            .context(format!("Failed to read {}", path.display()))
    }
}

impl DataLoader {
    fn null_values(&self) -> Option<NullValues> {
        if self.null_values.is_empty() {
            return None;
        }
        Some(NullValues::AllColumns(
            self.null_values.iter().map(|v| v.as_str().into()).collect(),
        ))
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(&EtlConfig::default())
    }
}
