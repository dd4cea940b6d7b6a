//! Run report generation
//!
//! Writes `{base}-report.{txt,csv,json,html}` next to the per-domain
//! artifacts, each carrying the base name, a timestamp and the four counters.

use crate::output::artifacts::domain_dir;
use crate::output::formats::ReportFormat;
use crate::output::stats::RunStats;
use crate::output::traits::{OutputError, OutputResult, ReportRenderer};
use chrono::Local;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Layout of the report timestamp (local time)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders reports into `<output_dir>/<base>/`
#[derive(Debug, Clone)]
pub struct FileReportRenderer {
    output_dir: PathBuf,
}

impl FileReportRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl ReportRenderer for FileReportRenderer {
    fn render(
        &self,
        base: &str,
        stats: &RunStats,
        formats: &BTreeSet<ReportFormat>,
    ) -> OutputResult<BTreeMap<ReportFormat, PathBuf>> {
        render_report(&self.output_dir, base, stats, formats)
    }
}

/// Writes one report file per requested format
///
/// # Returns
///
/// * `Ok(BTreeMap)` - Format to written path
/// * `Err(OutputError)` - Directory creation or a write failed
pub fn render_report(
    output_dir: &Path,
    base: &str,
    stats: &RunStats,
    formats: &BTreeSet<ReportFormat>,
) -> OutputResult<BTreeMap<ReportFormat, PathBuf>> {
    let dir = domain_dir(output_dir, base);
    fs::create_dir_all(&dir)?;

    let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

    let mut paths = BTreeMap::new();
    for format in formats {
        let contents = match format {
            ReportFormat::Txt => format_text_report(base, &timestamp, stats),
            ReportFormat::Csv => format_csv_report(base, &timestamp, stats)?,
            ReportFormat::Json => format_json_report(base, &timestamp, stats)?,
            ReportFormat::Html => format_html_report(base, &timestamp, stats),
        };
        let path = dir.join(format!("{}-report.{}", base, format.extension()));
        fs::write(&path, contents)?;
        tracing::debug!("Wrote {} report to {}", format, path.display());
        paths.insert(*format, path);
    }

    Ok(paths)
}

/// Formats the plain-text report
pub fn format_text_report(base: &str, timestamp: &str, stats: &RunStats) -> String {
    [
        format!("Scrape report for '{}':", base),
        format!("Timestamp: {}", timestamp),
        format!("Total pinged: {}", stats.total_pinged),
        format!("Saved: {}", stats.saved),
        format!("Failed to scrape: {}", stats.failed),
        format!("Not useful scrape: {}", stats.not_useful),
    ]
    .join("\n")
}

/// Formats the CSV report: a header row and one data row
pub fn format_csv_report(base: &str, timestamp: &str, stats: &RunStats) -> OutputResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record([
        "base",
        "timestamp",
        "total_pinged",
        "saved",
        "failed",
        "not_useful",
    ])?;
    writer.write_record([
        base.to_string(),
        timestamp.to_string(),
        stats.total_pinged.to_string(),
        stats.saved.to_string(),
        stats.failed.to_string(),
        stats.not_useful.to_string(),
    ])?;

    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::Write(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| OutputError::Write(e.to_string()))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    base: &'a str,
    timestamp: &'a str,
    #[serde(flatten)]
    stats: &'a RunStats,
}

/// Formats the JSON report
pub fn format_json_report(base: &str, timestamp: &str, stats: &RunStats) -> OutputResult<String> {
    let report = JsonReport {
        base,
        timestamp,
        stats,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Formats the HTML report
pub fn format_html_report(base: &str, timestamp: &str, stats: &RunStats) -> String {
    let base = html_escape::encode_text(base);
    let mut html = String::new();

    html.push_str("<html><head><meta charset='utf-8'>");
    html.push_str(&format!("<title>Scrape report for '{}'</title></head><body>\n", base));
    html.push_str(&format!("<h2>Scrape report for '{}'</h2>\n", base));
    html.push_str("<ul>\n");
    html.push_str(&format!("<li><b>Timestamp:</b> {}</li>\n", timestamp));
    html.push_str(&format!("<li><b>Total pinged:</b> {}</li>\n", stats.total_pinged));
    html.push_str(&format!("<li><b>Saved:</b> {}</li>\n", stats.saved));
    html.push_str(&format!("<li><b>Failed to scrape:</b> {}</li>\n", stats.failed));
    html.push_str(&format!(
        "<li><b>Not useful scrape:</b> {}</li>\n",
        stats.not_useful
    ));
    html.push_str("</ul>\n</body></html>\n");

    html
}
