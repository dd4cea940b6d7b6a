//! Report rendering into a temporary output directory

use domain_sweep::output::{FileReportRenderer, ReportFormat, ReportRenderer, RunStats};
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn sample_stats() -> RunStats {
    RunStats {
        total_pinged: 4,
        saved: 2,
        failed: 1,
        not_useful: 1,
    }
}

#[test]
fn test_renders_every_format() {
    let dir = TempDir::new().unwrap();
    let renderer = FileReportRenderer::new(dir.path());
    let formats: BTreeSet<ReportFormat> = ReportFormat::all().into_iter().collect();

    let written = renderer.render("nrk", &sample_stats(), &formats).unwrap();

    assert_eq!(written.len(), 4);
    for format in ReportFormat::all() {
        let path = &written[&format];
        assert_eq!(
            path,
            &dir.path()
                .join("nrk")
                .join(format!("nrk-report.{}", format.extension()))
        );
        assert!(path.exists());
    }

    let text = fs::read_to_string(&written[&ReportFormat::Txt]).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Scrape report for 'nrk':");
    assert!(lines[1].starts_with("Timestamp: "));
    assert_eq!(lines[2], "Total pinged: 4");
    assert_eq!(lines[3], "Saved: 2");
    assert_eq!(lines[4], "Failed to scrape: 1");
    assert_eq!(lines[5], "Not useful scrape: 1");

    let csv = fs::read_to_string(&written[&ReportFormat::Csv]).unwrap();
    assert!(csv.starts_with("base,timestamp,total_pinged,saved,failed,not_useful"));
    assert!(csv.contains(",4,2,1,1"));

    let json = fs::read_to_string(&written[&ReportFormat::Json]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["base"], "nrk");
    assert_eq!(value["saved"], 2);
}

#[test]
fn test_renders_only_requested_formats() {
    let dir = TempDir::new().unwrap();
    let renderer = FileReportRenderer::new(dir.path());
    let formats: BTreeSet<ReportFormat> = [ReportFormat::Csv].into_iter().collect();

    let written = renderer.render("nrk", &sample_stats(), &formats).unwrap();

    assert_eq!(written.len(), 1);
    let base_dir = dir.path().join("nrk");
    assert!(base_dir.join("nrk-report.csv").exists());
    assert!(!base_dir.join("nrk-report.txt").exists());
    assert!(!base_dir.join("nrk-report.html").exists());
}
