//! Pipeline module.
//!
//! This module provides the load → clean → save orchestrator and its stage
//! reporting.

mod builder;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder};
pub use progress::{ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate};
