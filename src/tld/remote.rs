use crate::fetch::{FetchResult, Transport};
use crate::tld::TldSource;
use crate::SweepError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Extracts the first column of every non-blank, non-comment line
///
/// # Examples
///
/// ```
/// use domain_sweep::tld::parse_tld_csv;
///
/// let csv = "# header\n.no,Norway\n\n.com,Commercial\n";
/// assert_eq!(parse_tld_csv(csv), vec![".no", ".com"]);
/// ```
pub fn parse_tld_csv(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split(',').next())
        .map(|first| first.trim().trim_matches('"').to_string())
        .filter(|tld| !tld.is_empty())
        .collect()
}

/// Downloads the TLD list on every call
pub struct RemoteTldSource {
    transport: Arc<dyn Transport>,
    url: String,
    timeout: Duration,
}

impl RemoteTldSource {
    pub fn new(transport: Arc<dyn Transport>, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            transport,
            url: url.into(),
            timeout,
        }
    }

    /// Fetches and parses the list, reporting why it failed
    pub async fn fetch(&self) -> Result<Vec<String>, SweepError> {
        match self.transport.get(&self.url, self.timeout).await {
            FetchResult::Success { body, .. } => Ok(parse_tld_csv(&body)),
            other => Err(SweepError::Tld(format!(
                "Failed to fetch TLD list from {}: {}",
                self.url,
                other.describe()
            ))),
        }
    }
}

#[async_trait]
impl TldSource for RemoteTldSource {
    async fn list_tlds(&self) -> Vec<String> {
        match self.fetch().await {
            Ok(tlds) => tlds,
            Err(e) => {
                tracing::warn!("{}", e);
                Vec::new()
            }
        }
    }
}
