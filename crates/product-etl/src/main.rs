//! CLI entry point for the product dataset cleaner.

use anyhow::{Result, anyhow};
use clap::Parser;
use product_etl::{EtlConfig, EtlConfigBuilder, Pipeline};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Clean a product catalogue CSV export",
    long_about = "Loads a delimited product file, removes duplicate rows, fills missing values \
                  (text columns with \"Unknown\", numeric columns with 0), coerces the price \
                  column to numbers and writes the result.\n\n\
                  EXAMPLES:\n  \
                  # Stock paths (data/raw -> data/processed)\n  \
                  product-etl\n\n  \
                  # Explicit paths, semicolon separated\n  \
                  product-etl -i exports/products.csv -o exports/clean.csv --separator ';'\n\n  \
                  # Machine-readable summary\n  \
                  product-etl --json | jq .status"
)]
struct Args {
    /// Path to the delimited file to clean
    ///
    /// Defaults to data/raw/bigbasket_products.csv
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path of the cleaned file (overwritten if present)
    ///
    /// Defaults to data/processed/cleaned_bigbasket_products.csv
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file; flags given on the command line take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name of the column coerced to numeric
    #[arg(long)]
    price_column: Option<String>,

    /// Field separator for both input and output
    #[arg(long)]
    separator: Option<char>,

    /// Leave missing prices out of the generic fill so they stay empty
    #[arg(long)]
    no_price_fill: bool,

    /// Keep exact duplicate rows
    #[arg(long)]
    keep_duplicates: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only show warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Print the run summary as JSON to stdout instead of logging
    #[arg(long)]
    json: bool,

    /// Exit with an error status when loading or saving fails
    #[arg(long)]
    strict: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only carries
/// the JSON summary.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Merge the config file (if any) with command line overrides.
fn build_config(args: &Args) -> Result<EtlConfig> {
    let base = match &args.config {
        Some(path) => {
            debug!("Reading configuration from {}", path.display());
            EtlConfig::from_json_file(path)?
        }
        None => EtlConfig::default(),
    };

    let mut builder = EtlConfigBuilder::from_config(base);

    if let Some(ref input) = args.input {
        builder = builder.input_path(input);
    }
    if let Some(ref output) = args.output {
        builder = builder.output_path(output);
    }
    if let Some(ref price_column) = args.price_column {
        builder = builder.price_column(price_column);
    }
    if let Some(separator) = args.separator {
        builder = builder.separator(separator);
    }
    if args.no_price_fill {
        builder = builder.fill_price_column(false);
    }
    if args.keep_duplicates {
        builder = builder.remove_duplicates(false);
    }

    Ok(builder.build()?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    info!(
        "Cleaning {} -> {}",
        config.input_path.display(),
        config.output_path.display()
    );

    let summary = Pipeline::builder().config(config).build()?.run();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    if args.strict && !summary.status.is_success() {
        return Err(anyhow!(
            "Run {}: {}",
            summary.status,
            summary.error.as_deref().unwrap_or("unknown error")
        ));
    }

    Ok(())
}
