//! Pipeline event reporting
//!
//! The pipeline never depends on who listens. A run without a sink behaves
//! exactly like one with [`NoopSink`].

use std::fmt;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

/// Notable things that happen to a domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// An attempt is about to send its request
    FetchStarted { url: String, attempt: u32 },

    /// An attempt failed and another one will follow after the backoff
    RetryScheduled {
        url: String,
        attempt: u32,
        reason: String,
    },

    /// Artifacts written
    Saved { url: String, paths: Vec<PathBuf> },

    /// Attempts exhausted, or the artifacts could not be written
    Failed {
        url: String,
        attempts: u32,
        reason: String,
    },

    /// Fetched, but nothing salient to keep
    NotUseful { url: String },
}

impl fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchStarted { url, attempt } => {
                write!(f, "Fetching {} (attempt {})", url, attempt)
            }
            Self::RetryScheduled {
                url,
                attempt,
                reason,
            } => write!(f, "Attempt {} for {} failed ({}), retrying", attempt, url, reason),
            Self::Saved { url, paths } => {
                let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                write!(f, "Saved important content from {} to {}", url, paths.join(", "))
            }
            Self::Failed {
                url,
                attempts,
                reason,
            } => write!(
                f,
                "Failed to scrape {} after {} attempt(s): {}",
                url, attempts, reason
            ),
            Self::NotUseful { url } => write!(f, "No useful content on {}, skipped", url),
        }
    }
}

/// Receives pipeline events; must not block
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &PipelineEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &PipelineEvent) {}
}

/// Logs every event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::FetchStarted { .. } | PipelineEvent::RetryScheduled { .. } => {
                tracing::debug!("{}", event)
            }
            PipelineEvent::Saved { .. } => tracing::info!("{}", event),
            PipelineEvent::Failed { .. } => tracing::warn!("{}", event),
            PipelineEvent::NotUseful { .. } => tracing::info!("{}", event),
        }
    }
}

/// Forwards events into a tokio channel (e.g. for a progress display)
///
/// A dropped receiver is not an error; events are simply lost.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<PipelineEvent>,
}

impl ChannelSink {
    pub fn new(sender: UnboundedSender<PipelineEvent>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: &PipelineEvent) {
        let _ = self.sender.send(event.clone());
    }
}
