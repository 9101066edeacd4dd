//! Product Dataset Cleaning Library
//!
//! A small batch ETL for product catalogue exports, built on Polars.
//!
//! # Overview
//!
//! A run goes through three stages:
//!
//! - **Loading**: read a delimited file with a header row into a `DataFrame`
//! - **Cleaning**: drop exact duplicate rows, fill missing values by column
//!   type, and coerce the price column to numbers
//! - **Saving**: write the result back out as a delimited file
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use product_etl::{EtlConfig, Pipeline};
//!
//! let config = EtlConfig::builder()
//!     .input_path("data/raw/bigbasket_products.csv")
//!     .output_path("data/processed/cleaned_bigbasket_products.csv")
//!     .build()?;
//!
//! let summary = Pipeline::builder().config(config).build()?.run();
//! println!("Run {}", summary.status);
//! ```
//!
//! # Using the stages directly
//!
//! ```rust,ignore
//! use product_etl::{DataCleaner, DataLoader, DatasetWriter};
//!
//! let df = DataLoader::default().load("products.csv".as_ref())?;
//! let (mut cleaned, report) = DataCleaner::default().clean(&df)?;
//! DatasetWriter::default().save(&mut cleaned, "products_clean.csv".as_ref())?;
//! println!("Filled: {:?}", report.filled_columns);
//! ```
//!
//! # Missing values
//!
//! Empty cells and the usual "no value" tokens (`NA`, `N/A`, `null`, ...) are
//! read as missing. Numeric columns are filled with `0` and every other
//! column with `"Unknown"`, the price column included. The price column is
//! then coerced, so a text price that was missing or does not parse ends up
//! null. Set [`EtlConfig::fill_price_column`] to `false` to leave missing
//! prices out of the fill entirely.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod loader;
pub mod pipeline;
pub mod types;
pub mod utils;
pub mod writer;

// Re-exports for convenient access
pub use cleaner::DataCleaner;
pub use config::{ConfigValidationError, EtlConfig, EtlConfigBuilder};
pub use error::{EtlError, Result as EtlResult, ResultExt};
pub use imputers::{ConstantImputer, FillKind};
pub use loader::DataLoader;
pub use pipeline::{
    ClosureProgressReporter, Pipeline, PipelineBuilder, PipelineStage, ProgressReporter,
    ProgressUpdate,
};
pub use types::{CleaningReport, RunStatus, RunSummary};
pub use utils::{DtypeCategory, get_dtype_category, is_numeric_dtype, parse_numeric_string};
pub use writer::DatasetWriter;
