//! Per-domain artifact persistence
//!
//! Files land in `<output_dir>/<base>/` and are named
//! `{base}-{suffix-without-dot}.{ext}`.

use crate::domain::ReachableDomain;
use crate::extract::DocumentRecord;
use crate::output::formats::ArtifactFormat;
use crate::output::traits::OutputResult;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding every file of a run: `<output_dir>/<base>`
pub fn domain_dir(output_dir: &Path, base: &str) -> PathBuf {
    output_dir.join(base)
}

/// Writes the requested artifacts for one domain
///
/// The directory is created if absent. Formats are written in a fixed order
/// (txt, json, html) and each at most once.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the written files
/// * `Err(OutputError)` - The first write that failed
pub fn write_artifacts(
    output_dir: &Path,
    base: &str,
    domain: &ReachableDomain,
    record: &DocumentRecord,
    formats: &[ArtifactFormat],
) -> OutputResult<Vec<PathBuf>> {
    let dir = domain_dir(output_dir, base);
    fs::create_dir_all(&dir)?;

    let stem = domain.file_stem(base);
    let formats: BTreeSet<ArtifactFormat> = formats.iter().copied().collect();

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = dir.join(format!("{}.{}", stem, format.extension()));
        let contents = match format {
            ArtifactFormat::Txt => record.summary_lines().join("\n"),
            ArtifactFormat::Json => serde_json::to_string_pretty(record)?,
            ArtifactFormat::Html => record.raw_html.clone(),
        };
        fs::write(&path, contents)?;
        written.push(path);
    }

    Ok(written)
}
