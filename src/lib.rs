//! Domain-Sweep: a TLD variant scanner
//!
//! This crate discovers which top-level-domain variants of a base name are
//! live, fetches the root page of every reachable site, extracts its salient
//! content and writes per-domain artifacts plus a run report.

pub mod config;
pub mod domain;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod prober;
pub mod state;
pub mod tld;

use thiserror::Error;

/// Main error type for Domain-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid base domain '{base}': {reason}")]
    InvalidBase { base: String, reason: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("TLD source error: {0}")]
    Tld(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Domain-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use domain::{Candidate, ReachableDomain};
pub use extract::{DocumentRecord, Extractor, HtmlExtractor};
pub use pipeline::{Pipeline, PipelineConfig, RunStats};
pub use prober::probe;
pub use state::{FetchState, FetchStatus};
