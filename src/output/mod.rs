//! Output module for persisting scan results
//!
//! This module handles:
//! - Writing per-domain artifacts (`.txt`, `.json`, `.html`)
//! - Aggregating run statistics
//! - Rendering the run report in txt, csv, json and html

mod artifacts;
mod formats;
mod report;
pub mod stats;
mod traits;

pub use artifacts::{domain_dir, write_artifacts};
pub use formats::{ArtifactFormat, ReportFormat};
pub use report::{
    format_csv_report, format_html_report, format_json_report, format_text_report,
    render_report, FileReportRenderer, TIMESTAMP_FORMAT,
};
pub use stats::{print_statistics, RunStats, StatsCollector};
pub use traits::{OutputError, OutputResult, ReportRenderer};
