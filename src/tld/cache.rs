//! TLD list caching
//!
//! The downloaded list is kept in a JSON file together with the time it was
//! fetched. A fresh cache short-circuits the download; a stale one is only
//! used when the download fails.

use crate::tld::{RemoteTldSource, TldSource};
use crate::SweepError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cached TLD list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TldCache {
    /// When the list was downloaded
    pub fetched_at: DateTime<Utc>,

    /// The suffixes as downloaded
    pub tlds: Vec<String>,
}

impl TldCache {
    /// Creates a cache entry stamped with the current time
    pub fn new(tlds: Vec<String>) -> Self {
        Self {
            fetched_at: Utc::now(),
            tlds,
        }
    }

    /// Checks if the cache is older than `max_age`
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.age() > max_age
    }

    /// Returns the age of the cached list
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }

    /// Reads a cache file; a missing or corrupt file yields `Ok(None)`
    pub fn load(path: &Path) -> Result<Option<Self>, SweepError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(cache) => Ok(Some(cache)),
            Err(e) => {
                tracing::warn!("Ignoring corrupt TLD cache {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    /// Writes the cache file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), SweepError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }
}

/// Remote source behind a cache file
pub struct CachedTldSource {
    remote: RemoteTldSource,
    cache_path: PathBuf,
    max_age: Duration,
}

impl CachedTldSource {
    pub fn new(remote: RemoteTldSource, cache_path: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            remote,
            cache_path: cache_path.into(),
            max_age,
        }
    }

    fn load_cache(&self) -> Option<TldCache> {
        match TldCache::load(&self.cache_path) {
            Ok(cache) => cache,
            Err(e) => {
                tracing::warn!(
                    "Failed to read TLD cache {}: {}",
                    self.cache_path.display(),
                    e
                );
                None
            }
        }
    }
}

#[async_trait]
impl TldSource for CachedTldSource {
    async fn list_tlds(&self) -> Vec<String> {
        let cached = self.load_cache();

        if let Some(cache) = &cached {
            if !cache.is_stale(self.max_age) {
                tracing::debug!(
                    "Using cached TLD list ({} entries, {} minutes old)",
                    cache.tlds.len(),
                    cache.age().num_minutes()
                );
                return cache.tlds.clone();
            }
        }

        match self.remote.fetch().await {
            Ok(tlds) if !tlds.is_empty() => {
                let fresh = TldCache::new(tlds);
                if let Err(e) = fresh.save(&self.cache_path) {
                    tracing::warn!(
                        "Failed to write TLD cache {}: {}",
                        self.cache_path.display(),
                        e
                    );
                }
                tracing::info!("Fetched {} TLDs", fresh.tlds.len());
                fresh.tlds
            }
            outcome => {
                if let Err(e) = outcome {
                    tracing::warn!("{}", e);
                } else {
                    tracing::warn!("Downloaded TLD list is empty");
                }
                match cached {
                    Some(stale) => {
                        tracing::warn!(
                            "Falling back to stale TLD cache ({} entries)",
                            stale.tlds.len()
                        );
                        stale.tlds
                    }
                    None => Vec::new(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserAgentConfig;
    use crate::fetch::HttpTransport;
    use std::sync::Arc;
    use tempfile::TempDir;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn remote(url: String) -> RemoteTldSource {
        let transport = Arc::new(HttpTransport::from_config(&UserAgentConfig::default()).unwrap());
        RemoteTldSource::new(transport, url, std::time::Duration::from_secs(5))
    }

    #[test]
    fn test_new_cache_not_stale() {
        let cache = TldCache::new(vec![".no".to_string()]);
        assert!(!cache.is_stale(Duration::hours(24)));
    }

    #[test]
    fn test_cache_is_stale() {
        let mut cache = TldCache::new(vec![]);
        cache.fetched_at = Utc::now() - Duration::hours(25);
        assert!(cache.is_stale(Duration::hours(24)));
    }

    #[test]
    fn test_cache_not_stale_at_23_hours() {
        let mut cache = TldCache::new(vec![]);
        cache.fetched_at = Utc::now() - Duration::hours(23);
        assert!(!cache.is_stale(Duration::hours(24)));
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("tlds.json");
        let cache = TldCache::new(vec![".no".to_string(), ".se".to_string()]);

        cache.save(&path).unwrap();
        assert_eq!(TldCache::load(&path).unwrap(), Some(cache));
    }

    #[test]
    fn test_load_missing_and_corrupt() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(TldCache::load(&tmp.path().join("absent.json")).unwrap(), None);

        let corrupt = tmp.path().join("corrupt.json");
        std::fs::write(&corrupt, "{ nope").unwrap();
        assert_eq!(TldCache::load(&corrupt).unwrap(), None);
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_download() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(".com\n"))
            .expect(0)
            .mount(&server)
            .await;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tlds.json");
        TldCache::new(vec![".no".to_string()]).save(&path).unwrap();

        let source = CachedTldSource::new(remote(server.uri()), &path, Duration::hours(24));
        assert_eq!(source.list_tlds().await, vec![".no"]);
    }

    #[tokio::test]
    async fn test_stale_cache_refreshed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(".com\n.se\n"))
            .mount(&server)
            .await;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tlds.json");
        let mut stale = TldCache::new(vec![".no".to_string()]);
        stale.fetched_at = Utc::now() - Duration::hours(48);
        stale.save(&path).unwrap();

        let source = CachedTldSource::new(remote(server.uri()), &path, Duration::hours(24));
        assert_eq!(source.list_tlds().await, vec![".com", ".se"]);

        let rewritten = TldCache::load(&path).unwrap().unwrap();
        assert_eq!(rewritten.tlds, vec![".com", ".se"]);
        assert!(!rewritten.is_stale(Duration::hours(24)));
    }

    #[tokio::test]
    async fn test_stale_cache_used_when_download_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tlds.json");
        let mut stale = TldCache::new(vec![".no".to_string()]);
        stale.fetched_at = Utc::now() - Duration::hours(48);
        stale.save(&path).unwrap();

        let source = CachedTldSource::new(remote(server.uri()), &path, Duration::hours(24));
        assert_eq!(source.list_tlds().await, vec![".no"]);
    }

    #[tokio::test]
    async fn test_no_cache_and_no_network_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let tmp = TempDir::new().unwrap();
        let source = CachedTldSource::new(
            remote(server.uri()),
            tmp.path().join("tlds.json"),
            Duration::hours(24),
        );
        assert!(source.list_tlds().await.is_empty());
        assert!(!tmp.path().join("tlds.json").exists());
    }
}
