//! Configuration module for Domain-Sweep
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a run without any file uses [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use domain_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Probing with {} workers", config.prober.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, OutputConfig, PipelineSettings, ProberConfig, TldSourceConfig, UserAgentConfig,
    DEFAULT_TLD_LIST_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation helpers that the CLI applies to overrides
pub use validation::validate;
