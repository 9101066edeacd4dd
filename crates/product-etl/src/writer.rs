//! Writing a [`DataFrame`] back out as a delimited file.

use crate::config::EtlConfig;
use crate::error::{Result, ResultExt};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Serializes datasets to delimited text with a header row and no index.
///
/// Output goes to a sibling temp file that is renamed over the destination,
/// so an existing file is only replaced by a complete one.
#[derive(Debug, Clone)]
pub struct DatasetWriter {
    separator: u8,
    create_output_dir: bool,
}

impl DatasetWriter {
    pub fn new(config: &EtlConfig) -> Self {
        Self {
            separator: config.separator_byte(),
            create_output_dir: config.create_output_dir,
        }
    }

    /// Save `df` to `path`, logging the outcome either way.
    pub fn save(&self, df: &mut DataFrame, path: &Path) -> Result<PathBuf> {
        match self.write(df, path) {
            Ok(()) => {
                info!("Cleaned dataset saved to {}", path.display());
                Ok(path.to_path_buf())
            }
            Err(e) => {
                error!("Error saving cleaned dataset: {}", e);
                Err(e)
            }
        }
    }

    fn write(&self, df: &mut DataFrame, path: &Path) -> Result<()> {
        if self.create_output_dir
            && let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)
                .context(format!("Failed to create directory {}", parent.display()))?;
        }

        let temp_path = temp_path_for(path);
        let result = self.write_csv(df, &temp_path).and_then(|()| {
            fs::rename(&temp_path, path).context(format!(
                "Failed to move {} into place",
                temp_path.display()
            ))
        });

        if result.is_err() && temp_path.exists() {
            debug!("Removing partial output {}", temp_path.display());
            remove_partial_output(&temp_path);
        }
        result
    }

    fn write_csv(&self, df: &mut DataFrame, path: &Path) -> Result<()> {
        let mut file =
            File::create(path).context(format!("Failed to create {}", path.display()))?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(self.separator)
            .with_quote_char(b'"')
            .finish(df)
            .context(format!("Failed to write {}", path.display()))?;

        file.sync_all()
            .context(format!("Failed to flush {}", path.display()))
    }
}

impl Default for DatasetWriter {
    fn default() -> Self {
        Self::new(&EtlConfig::default())
    }
}

fn remove_partial_output(temp_path: &Path) {
    if let Err(e) = fs::remove_file(temp_path) {
        warn!(
            "Failed to remove partial output {}: {}",
            temp_path.display(),
            e
        );
    }
}

/// `dir/.name.tmp` next to the destination, so the final rename stays on
/// one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df![
            "Name" => ["Milk", "Bread, brown"],
            "Price" => [Some(40.0), None],
        ]
        .unwrap()
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed/nested/out.csv");

        let saved = DatasetWriter::default().save(&mut sample(), &path).unwrap();

        assert_eq!(saved, path);
        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("Name,Price"));
        assert_eq!(lines.next(), Some("Milk,40.0"));
        assert_eq!(lines.next(), Some("\"Bread, brown\","));
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale\n").unwrap();

        DatasetWriter::default().save(&mut sample(), &path).unwrap();

        assert!(fs::read_to_string(&path).unwrap().starts_with("Name,Price"));
    }

    #[test]
    fn test_save_fails_without_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/out.csv");
        let config = EtlConfig::builder().create_output_dir(false).build().unwrap();

        let err = DatasetWriter::new(&config).save(&mut sample(), &path).unwrap_err();

        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_rename_cleans_up_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = DatasetWriter::default().save(&mut sample(), &path).unwrap_err();

        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(!temp_path_for(&path).exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_remove_partial_output_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        remove_partial_output(&dir.path().join(".gone.csv.tmp"));
    }

    #[test]
    fn test_temp_path_for() {
        assert_eq!(
            temp_path_for(Path::new("data/processed/out.csv")),
            PathBuf::from("data/processed/.out.csv.tmp")
        );
    }
}
