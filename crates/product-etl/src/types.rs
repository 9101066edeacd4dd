//! Result types shared across the ETL.
//!
//! [`CleaningReport`] describes one cleaning pass and [`RunSummary`] one
//! pipeline run. Both serialize to JSON for `--json` output.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a single [`DataCleaner::clean`](crate::cleaner::DataCleaner::clean) call did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub duplicates_removed: usize,
    pub rows_after: usize,
    /// Columns that received fills, in column order.
    pub filled_columns: Vec<String>,
    /// Price column, when the dataset has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_column: Option<String>,
    /// Non-null price values that failed to parse.
    pub price_values_coerced_to_null: usize,
}

/// Final state of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    LoadFailed,
    /// Only reachable on an internal polars failure; nothing is written.
    CleanFailed,
    SaveFailed,
}

impl RunStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Completed => "completed",
            Self::LoadFailed => "load failed",
            Self::CleanFailed => "clean failed",
            Self::SaveFailed => "save failed",
        };
        f.write_str(s)
    }
}

/// Summary of one load → clean → save run, suitable for `--json` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub status: RunStatus,
    pub rows_loaded: usize,
    pub columns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning: Option<CleaningReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&RunStatus::LoadFailed).unwrap();
        assert_eq!(json, "\"load_failed\"");
        assert!(RunStatus::Completed.is_success());
        assert!(!RunStatus::SaveFailed.is_success());
    }

    #[test]
    fn test_summary_skips_empty_fields() {
        let summary = RunSummary {
            input_path: PathBuf::from("in.csv"),
            output_path: PathBuf::from("out.csv"),
            status: RunStatus::LoadFailed,
            rows_loaded: 0,
            columns: 0,
            cleaning: None,
            error: None,
            duration_ms: 1,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("cleaning"));
        assert!(!json.contains("error"));
        assert!(json.contains("\"status\":\"load_failed\""));
    }
}
