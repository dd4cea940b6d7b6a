//! TLD list sources
//!
//! This module provides the candidate suffixes the prober tries:
//! - `StaticTldSource`: a fixed list (e.g. from the command line)
//! - `RemoteTldSource`: the public CSV list, downloaded on every call
//! - `CachedTldSource`: a remote source behind a JSON cache file with a
//!   freshness window and stale fallback

mod cache;
mod remote;

pub use cache::{CachedTldSource, TldCache};
pub use remote::{parse_tld_csv, RemoteTldSource};

use async_trait::async_trait;

/// Supplies candidate suffixes
///
/// Entries may or may not carry a leading dot; the prober normalizes them.
#[async_trait]
pub trait TldSource: Send + Sync {
    /// Lists the suffixes; never fails, an unavailable source yields an empty list
    async fn list_tlds(&self) -> Vec<String>;
}

/// A fixed list of suffixes
#[derive(Debug, Clone, Default)]
pub struct StaticTldSource {
    tlds: Vec<String>,
}

impl StaticTldSource {
    pub fn new<S: Into<String>>(tlds: impl IntoIterator<Item = S>) -> Self {
        Self {
            tlds: tlds.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a comma-separated list such as `"no, .com,se"`
    pub fn from_csv_arg(arg: &str) -> Self {
        Self::new(
            arg.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        )
    }
}

#[async_trait]
impl TldSource for StaticTldSource {
    async fn list_tlds(&self) -> Vec<String> {
        self.tlds.clone()
    }
}
