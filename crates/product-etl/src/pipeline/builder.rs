//! Main ETL pipeline module.
//!
//! This module provides the `Pipeline` struct and builder that run the
//! load → clean → save sequence once.

use crate::cleaner::DataCleaner;
use crate::config::EtlConfig;
use crate::error::{EtlError, Result};
use crate::loader::DataLoader;
use crate::pipeline::progress::{
    ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate,
};
use crate::types::{RunStatus, RunSummary};
use crate::writer::DatasetWriter;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span, warn};

/// The load → clean → save pipeline.
///
/// Use [`Pipeline::builder()`] to create a pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use product_etl::{EtlConfig, Pipeline};
///
/// let summary = Pipeline::builder()
///     .config(EtlConfig::builder().input_path("products.csv").build()?)
///     .build()?
///     .run();
///
/// println!("{}", summary.status);
/// ```
pub struct Pipeline {
    config: EtlConfig,
    loader: DataLoader,
    cleaner: DataCleaner,
    writer: DatasetWriter,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &EtlConfig {
        &self.config
    }

    /// Run the pipeline once.
    ///
    /// Load and save failures are reported in the returned summary rather
    /// than as errors. A failed load skips cleaning and saving entirely.
    pub fn run(&self) -> RunSummary {
        let start_time = Instant::now();
        let mut summary = RunSummary {
            input_path: self.config.input_path.clone(),
            output_path: self.config.output_path.clone(),
            status: RunStatus::Completed,
            rows_loaded: 0,
            columns: 0,
            cleaning: None,
            error: None,
            duration_ms: 0,
        };

        if let Err((status, e)) = self.run_stages(&mut summary) {
            self.report_progress(ProgressUpdate::new(PipelineStage::Failed, e.to_string()));
            warn!("Pipeline stopped: {}", status);
            summary.status = status;
            summary.error = Some(e.to_string());
        } else {
            self.report_progress(ProgressUpdate::new(
                PipelineStage::Complete,
                format!("Wrote {}", self.config.output_path.display()),
            ));
        }

        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        summary
    }

    fn run_stages(
        &self,
        summary: &mut RunSummary,
    ) -> std::result::Result<(), (RunStatus, EtlError)> {
        let df = {
            let _span = info_span!("load").entered();
            self.report_progress(ProgressUpdate::new(
                PipelineStage::Loading,
                format!("Reading {}", self.config.input_path.display()),
            ));
            self.loader
                .load(&self.config.input_path)
                .map_err(|e| (RunStatus::LoadFailed, e))?
        };
        summary.rows_loaded = df.height();
        summary.columns = df.width();

        let (mut cleaned, report) = {
            let _span = info_span!("clean").entered();
            self.report_progress(ProgressUpdate::new(
                PipelineStage::Cleaning,
                format!("Cleaning {} rows", df.height()),
            ));
            self.cleaner
                .clean(&df)
                .map_err(|e| (RunStatus::CleanFailed, e))?
        };
        summary.cleaning = Some(report);

        let _span = info_span!("save").entered();
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Writing,
            format!("Writing {}", self.config.output_path.display()),
        ));
        self.writer
            .save(&mut cleaned, &self.config.output_path)
            .map_err(|e| (RunStatus::SaveFailed, e))?;

        info!(
            "Pipeline finished: {} rows in, {} rows out",
            df.height(),
            cleaned.height()
        );
        Ok(())
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<EtlConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: EtlConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving stage transitions.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            loader: DataLoader::new(&config),
            cleaner: DataCleaner::new(&config),
            writer: DatasetWriter::new(&config),
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn config_in(dir: &std::path::Path) -> EtlConfig {
        EtlConfig::builder()
            .input_path(dir.join("raw.csv"))
            .output_path(dir.join("processed/clean.csv"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = EtlConfig {
            separator: '\n',
            ..EtlConfig::default()
        };
        let err = Pipeline::builder().config(config).build().err().unwrap();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_run_completed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("raw.csv"), "Name,Price\nMilk,40\nMilk,40\n").unwrap();

        let summary = Pipeline::builder()
            .config(config_in(dir.path()))
            .build()
            .unwrap()
            .run();

        assert_eq!(summary.status, RunStatus::Completed);
        assert_eq!(summary.rows_loaded, 2);
        assert_eq!(summary.columns, 2);
        assert_eq!(summary.cleaning.unwrap().rows_after, 1);
        assert!(dir.path().join("processed/clean.csv").exists());
    }

    #[test]
    fn test_run_load_failed_skips_rest() {
        let dir = tempfile::tempdir().unwrap();
        let stages = Arc::new(Mutex::new(Vec::new()));
        let seen = stages.clone();

        let summary = Pipeline::builder()
            .config(config_in(dir.path()))
            .on_progress(move |update| seen.lock().unwrap().push(update.stage))
            .build()
            .unwrap()
            .run();

        assert_eq!(summary.status, RunStatus::LoadFailed);
        assert!(summary.cleaning.is_none());
        assert!(summary.error.is_some());
        assert!(!dir.path().join("processed/clean.csv").exists());
        assert_eq!(
            *stages.lock().unwrap(),
            vec![PipelineStage::Loading, PipelineStage::Failed]
        );
    }

    #[test]
    fn test_run_reports_all_stages() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("raw.csv"), "Name\nMilk\n").unwrap();
        let stages = Arc::new(Mutex::new(Vec::new()));
        let seen = stages.clone();

        Pipeline::builder()
            .config(config_in(dir.path()))
            .on_progress(move |update| seen.lock().unwrap().push(update.stage))
            .build()
            .unwrap()
            .run();

        assert_eq!(
            *stages.lock().unwrap(),
            vec![
                PipelineStage::Loading,
                PipelineStage::Cleaning,
                PipelineStage::Writing,
                PipelineStage::Complete,
            ]
        );
    }
}
