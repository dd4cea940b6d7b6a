//! Scripted in-memory transport for unit tests

use crate::fetch::{FetchResult, Transport};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// One scripted answer
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Ok(String),
    Status(u16),
    Network,
    /// Never answers within any sane timeout
    Hang,
}

/// Answers from per-URL scripts and records how many calls overlap
///
/// The last reply of a script repeats once the script is exhausted; unknown
/// URLs get a network error.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<HashMap<String, usize>>,
    starts: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub(crate) fn script(self, url: &str, replies: Vec<Reply>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), replies.into());
        self
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    /// Start time of every call, in call order
    pub(crate) fn call_starts(&self) -> Vec<(String, Instant)> {
        self.starts.lock().unwrap().clone()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    fn next_reply(&self, url: &str) -> Reply {
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or(Reply::Network),
            None => Reply::Network,
        }
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str, _timeout: Duration) -> FetchResult {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlightGuard(&self.in_flight);
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;
        self.starts
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));

        let reply = self.next_reply(url);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match reply {
            Reply::Ok(body) => FetchResult::Success {
                final_url: url.to_string(),
                body,
            },
            Reply::Status(status_code) => FetchResult::HttpError { status_code },
            Reply::Network => FetchResult::NetworkError {
                error: "Connection failed".to_string(),
                timed_out: false,
            },
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                    timed_out: true,
                }
            }
        }
    }
}
