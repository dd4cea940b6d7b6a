use crate::config::types::{
    Config, OutputConfig, PipelineSettings, ProberConfig, TldSourceConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Upper bound shared by both worker pools
const MAX_CONCURRENCY: u32 = 100;

/// Longest accepted TLD cache freshness window (one year)
pub const MAX_CACHE_AGE_HOURS: u64 = 24 * 365;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_prober_config(&config.prober)?;
    validate_pipeline_config(&config.pipeline)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_tld_source_config(&config.tld_source)?;
    Ok(())
}

fn validate_concurrency(name: &str, value: u32) -> Result<(), ConfigError> {
    if value < 1 || value > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_CONCURRENCY, value
        )));
    }
    Ok(())
}

/// Validates liveness probing configuration
fn validate_prober_config(config: &ProberConfig) -> Result<(), ConfigError> {
    validate_concurrency("prober.concurrency", config.concurrency)?;

    if config.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "prober.timeout-ms must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates fetch pipeline configuration
fn validate_pipeline_config(config: &PipelineSettings) -> Result<(), ConfigError> {
    validate_concurrency("pipeline.concurrency", config.concurrency)?;

    if config.retries < 1 {
        return Err(ConfigError::Validation(format!(
            "pipeline.retries must be >= 1, got {}",
            config.retries
        )));
    }

    if config.request_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "pipeline.request-timeout-ms must be greater than 0".to_string(),
        ));
    }

    if config.formats.is_empty() {
        return Err(ConfigError::Validation(
            "pipeline.formats must name at least one artifact format".to_string(),
        ));
    }

    if let Some(tags) = &config.tags {
        for tag in tags {
            validate_tag_name(tag)?;
        }
    }

    Ok(())
}

/// Validates a structural tag name (e.g. "h1", "p", "li")
pub(crate) fn validate_tag_name(tag: &str) -> Result<(), ConfigError> {
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::Validation(format!(
            "Tag name must be non-empty ASCII alphanumeric, got '{}'",
            tag
        )));
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.agent_name.is_empty() {
        return Err(ConfigError::Validation(
            "agent-name cannot be empty".to_string(),
        ));
    }

    if !config
        .agent_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "agent-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.agent_name
        )));
    }

    if config.agent_version.is_empty() {
        return Err(ConfigError::Validation(
            "agent-version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output.directory cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates TLD source configuration
fn validate_tld_source_config(config: &TldSourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid tld-source.url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "tld-source.url must use HTTP(S), got '{}'",
            config.url
        )));
    }

    if matches!(&config.cache_path, Some(path) if path.is_empty()) {
        return Err(ConfigError::Validation(
            "tld-source.cache-path cannot be empty when set".to_string(),
        ));
    }

    if config.max_age_hours < 1 || config.max_age_hours > MAX_CACHE_AGE_HOURS {
        return Err(ConfigError::Validation(format!(
            "tld-source.max-age-hours must be between 1 and {}, got {}",
            MAX_CACHE_AGE_HOURS, config.max_age_hours
        )));
    }

    Ok(())
}
