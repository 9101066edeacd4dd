//! Data cleaning module for product datasets.
//!
//! Cleaning runs three steps in a fixed order:
//! 1. Removing exact duplicate rows (first occurrence wins)
//! 2. Filling missing values by column type
//! 3. Coercing the price column to numbers

mod converters;

use crate::config::EtlConfig;
use crate::error::{Result, ResultExt};
use crate::imputers::ConstantImputer;
use crate::types::CleaningReport;
use crate::utils::columns_with_nulls;
use polars::prelude::*;
use tracing::{debug, info};

/// Data cleaner for the dedupe → fill → coerce sequence.
#[derive(Debug, Clone)]
pub struct DataCleaner {
    imputer: ConstantImputer,
    price_column: String,
    remove_duplicates: bool,
    fill_price_column: bool,
}

impl DataCleaner {
    /// Build a cleaner from the cleaning-related fields of `config`.
    pub fn new(config: &EtlConfig) -> Self {
        Self {
            imputer: ConstantImputer::new(config.text_fill_value.clone(), config.numeric_fill_value),
            price_column: config.price_column.clone(),
            remove_duplicates: config.remove_duplicates,
            fill_price_column: config.fill_price_column,
        }
    }

    /// Clean a dataset, returning a new frame and a report of what changed.
    ///
    /// The input frame is left untouched.
    pub fn clean(&self, df: &DataFrame) -> Result<(DataFrame, CleaningReport)> {
        let mut report = CleaningReport {
            rows_before: df.height(),
            ..CleaningReport::default()
        };

        // 1. Remove duplicate rows
        let mut df = if self.remove_duplicates {
            Self::drop_duplicates(df).context("Failed to remove duplicate rows")?
        } else {
            df.clone()
        };
        report.duplicates_removed = report.rows_before - df.height();
        report.rows_after = df.height();
        info!("Removed duplicates. Remaining rows: {}", df.height());

        // 2. Fill missing values; the column list is fixed before any fill
        report.filled_columns = columns_with_nulls(&df)
            .into_iter()
            .filter(|name| self.fill_price_column || *name != self.price_column)
            .collect();
        for col_name in &report.filled_columns {
            self.imputer
                .fill_column(&mut df, col_name)
                .context(format!("Failed to fill missing values in '{}'", col_name))?;
        }
        info!(
            "Handled missing values in columns: {:?}",
            report.filled_columns
        );

        // 3. Coerce the price column
        if let Ok(column) = df.column(&self.price_column) {
            let before = column.as_materialized_series().clone();
            let coerced = converters::coerce_to_numeric(&before)
                .context(format!("Failed to coerce '{}' to numeric", self.price_column))?;
            report.price_values_coerced_to_null = converters::values_lost(&before, &coerced);
            report.price_column = Some(self.price_column.clone());
            df.replace(&self.price_column, coerced)?;
            debug!(
                "Coerced '{}' to numeric ({} unparseable values)",
                self.price_column, report.price_values_coerced_to_null
            );
        } else {
            debug!("No '{}' column; skipping price coercion", self.price_column);
        }

        Ok((df, report))
    }

    /// Drop rows identical to an earlier row across every column.
    ///
    /// Keeps the first occurrence and the original relative order.
    pub fn drop_duplicates(df: &DataFrame) -> PolarsResult<DataFrame> {
        df.clone()
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new(&EtlConfig::default())
    }
}
