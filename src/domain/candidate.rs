use serde::Serialize;
use std::collections::HashSet;

/// A base + suffix combination that has not been probed yet
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// The suffix, always starting with '.'
    pub suffix: String,

    /// `https://{base}{suffix}`
    pub url: String,
}

impl Candidate {
    /// Builds a candidate from a base and an already normalized suffix
    pub fn new(base: &str, suffix: &str) -> Self {
        Self {
            suffix: suffix.to_string(),
            url: format!("https://{}{}", base, suffix),
        }
    }
}

/// A candidate that answered HTTP 200 within the probe timeout
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReachableDomain {
    pub suffix: String,
    pub url: String,
}

impl ReachableDomain {
    pub fn new(suffix: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            url: url.into(),
        }
    }

    /// Promotes a probed candidate
    pub fn confirmed(candidate: Candidate) -> Self {
        Self {
            suffix: candidate.suffix,
            url: candidate.url,
        }
    }

    /// Suffix without its leading dot ("no" for ".no")
    pub fn bare_suffix(&self) -> &str {
        self.suffix.trim_start_matches('.')
    }

    /// Artifact file stem: `{base}-{suffix-without-dot}`
    pub fn file_stem(&self, base: &str) -> String {
        format!("{}-{}", base, self.bare_suffix())
    }
}

/// Normalizes a raw suffix so that it starts with exactly one '.'
///
/// Returns None for blank input.
///
/// # Examples
///
/// ```
/// use domain_sweep::domain::normalize_suffix;
///
/// assert_eq!(normalize_suffix("no"), Some(".no".to_string()));
/// assert_eq!(normalize_suffix(" .COM "), Some(".com".to_string()));
/// assert_eq!(normalize_suffix("  "), None);
/// ```
pub fn normalize_suffix(raw: &str) -> Option<String> {
    let bare = raw.trim().trim_start_matches('.');
    if bare.is_empty() {
        return None;
    }
    Some(format!(".{}", bare.to_lowercase()))
}

/// Enumerates the candidates for a base, normalizing and de-duplicating suffixes
///
/// The first occurrence of a suffix wins; input order is preserved.
pub fn build_candidates<S: AsRef<str>>(base: &str, suffixes: &[S]) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    suffixes
        .iter()
        .filter_map(|s| normalize_suffix(s.as_ref()))
        .filter(|suffix| seen.insert(suffix.clone()))
        .map(|suffix| Candidate::new(base, &suffix))
        .collect()
}
