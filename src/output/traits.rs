//! Output handler traits and types

use crate::output::formats::ReportFormat;
use crate::output::stats::RunStats;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Turns settled run statistics into report files
///
/// Callers must only pass stats of a finished run.
pub trait ReportRenderer {
    /// Writes one file per requested format and returns where each landed
    fn render(
        &self,
        base: &str,
        stats: &RunStats,
        formats: &BTreeSet<ReportFormat>,
    ) -> OutputResult<BTreeMap<ReportFormat, PathBuf>>;
}
