//! Fetch-extract-persist pipeline
//!
//! This module contains the second stage of a scan, including:
//! - Semaphore-bounded fetching of every reachable domain's root page
//! - Per-domain retry driven by the `FetchState` machine
//! - Rate limiting (cool-down after every attempt)
//! - Extraction, artifact persistence and atomic run statistics
//! - Event reporting through an optional sink

mod coordinator;
mod events;
mod settings;

pub use coordinator::{FetchOutcome, Pipeline, RunReport};
pub use events::{ChannelSink, EventSink, NoopSink, PipelineEvent, TracingSink};
pub use settings::PipelineConfig;

pub use crate::output::RunStats;
