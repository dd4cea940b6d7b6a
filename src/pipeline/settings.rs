use crate::config::PipelineSettings;
use crate::output::ArtifactFormat;
use crate::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Everything one pipeline run needs, passed by value into [`Pipeline::run`]
///
/// [`Pipeline::run`]: crate::pipeline::Pipeline::run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum simultaneous in-flight fetches
    pub concurrency: usize,

    /// Cool-down after every attempt, taken before the slot is released
    pub rate_limit: Duration,

    /// Maximum attempts per domain
    pub retries: u32,

    /// Pause between a failed attempt and the next one
    pub retry_backoff: Duration,

    /// Bound on a single fetch
    pub request_timeout: Duration,

    /// Artifacts to persist for useful pages
    pub formats: Vec<ArtifactFormat>,

    /// Structural tags the extractor considers; None = default set
    pub tags_to_scrape: Option<Vec<String>>,

    /// Root of the output; files go to `output_dir/<base>/`
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_settings(&PipelineSettings::default(), ".")
    }
}

impl PipelineConfig {
    /// Builds the run configuration from the `[pipeline]` table
    pub fn from_settings(settings: &PipelineSettings, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            concurrency: settings.concurrency as usize,
            rate_limit: Duration::from_millis(settings.rate_limit_ms),
            retries: settings.retries,
            retry_backoff: Duration::from_millis(settings.retry_backoff_ms),
            request_timeout: Duration::from_millis(settings.request_timeout_ms),
            formats: settings.formats.clone(),
            tags_to_scrape: settings.tags.clone(),
            output_dir: output_dir.into(),
        }
    }

    /// Checks the bounds a run relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency < 1 || self.concurrency > 100 {
            return Err(ConfigError::Validation(format!(
                "pipeline concurrency must be between 1 and 100, got {}",
                self.concurrency
            )));
        }

        if self.retries < 1 {
            return Err(ConfigError::Validation(format!(
                "pipeline retries must be >= 1, got {}",
                self.retries
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "pipeline request timeout must be greater than 0".to_string(),
            ));
        }

        if self.formats.is_empty() {
            return Err(ConfigError::Validation(
                "pipeline needs at least one artifact format".to_string(),
            ));
        }

        Ok(())
    }
}
