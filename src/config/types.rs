use crate::output::{ArtifactFormat, ReportFormat};
use crate::ConfigError;
use serde::Deserialize;

/// Public TLD list used when no other source is configured
pub const DEFAULT_TLD_LIST_URL: &str =
    "https://raw.githubusercontent.com/incognico/list-of-top-level-domains/master/tlds.csv";

/// Main configuration structure for Domain-Sweep
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub prober: ProberConfig,
    pub pipeline: PipelineSettings,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(rename = "tld-source")]
    pub tld_source: TldSourceConfig,
}

/// Liveness probing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProberConfig {
    /// Number of candidates probed at the same time
    pub concurrency: u32,

    /// Timeout for a single probe request (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for ProberConfig {
    fn default() -> Self {
        Self {
            concurrency: 20,
            timeout_ms: 5_000,
        }
    }
}

/// Fetch-extract-persist configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Maximum number of in-flight fetches
    pub concurrency: u32,

    /// Cool-down after every attempt before the slot is released (milliseconds)
    #[serde(rename = "rate-limit-ms")]
    pub rate_limit_ms: u64,

    /// Maximum attempts per domain
    pub retries: u32,

    /// Pause between a failed attempt and the next one (milliseconds)
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,

    /// Timeout for a single page fetch (milliseconds)
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,

    /// Artifacts written for every useful page
    pub formats: Vec<ArtifactFormat>,

    /// Structural tags the extractor considers (None = h1-h6 and p)
    pub tags: Option<Vec<String>>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            concurrency: 10,
            rate_limit_ms: 500,
            retries: 3,
            retry_backoff_ms: 1_000,
            request_timeout_ms: 10_000,
            formats: vec![ArtifactFormat::Txt],
            tags: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the tool as sent in the User-Agent header
    #[serde(rename = "agent-name")]
    pub agent_name: String,

    /// Version of the tool as sent in the User-Agent header
    #[serde(rename = "agent-version")]
    pub agent_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            agent_name: "DomainScraper".to_string(),
            agent_version: "1.0".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    pub fn header_value(&self) -> String {
        format!(
            "Mozilla/5.0 (compatible; {}/{})",
            self.agent_name, self.agent_version
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory; artifacts land in `<directory>/<base>/`
    pub directory: String,

    /// Formats of the run report
    #[serde(rename = "report-formats")]
    pub report_formats: Vec<ReportFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            report_formats: ReportFormat::all().to_vec(),
        }
    }
}

/// TLD list source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TldSourceConfig {
    /// CSV list of TLDs, first column per line
    pub url: String,

    /// Cache file for the downloaded list (None disables caching)
    #[serde(rename = "cache-path")]
    pub cache_path: Option<String>,

    /// How long the cached list stays fresh
    #[serde(rename = "max-age-hours")]
    pub max_age_hours: u64,
}

impl Default for TldSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TLD_LIST_URL.to_string(),
            cache_path: Some("tld_cache.json".to_string()),
            max_age_hours: 24,
        }
    }
}

impl TldSourceConfig {
    /// Freshness window of the cache file
    pub fn max_age(&self) -> Result<chrono::Duration, ConfigError> {
        i64::try_from(self.max_age_hours)
            .ok()
            .and_then(chrono::Duration::try_hours)
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "tld-source.max-age-hours is out of range: {}",
                    self.max_age_hours
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.prober.concurrency, 20);
        assert_eq!(config.pipeline.retries, 3);
        assert_eq!(config.pipeline.formats, vec![ArtifactFormat::Txt]);
        assert_eq!(config.output.report_formats.len(), 4);
        assert!(config.pipeline.tags.is_none());
        assert_eq!(
            config.tld_source.max_age().unwrap(),
            chrono::Duration::hours(24)
        );
    }

    #[test]
    fn test_user_agent_header() {
        let ua = UserAgentConfig::default();
        assert_eq!(
            ua.header_value(),
            "Mozilla/5.0 (compatible; DomainScraper/1.0)"
        );
    }

    #[test]
    fn test_max_age_out_of_range() {
        let config = TldSourceConfig {
            max_age_hours: 4_000_000_000_000_000,
            ..TldSourceConfig::default()
        };
        assert!(matches!(config.max_age(), Err(ConfigError::Validation(_))));
    }
}
