//! Run statistics
//!
//! Workers record into a [`StatsCollector`] (lock-free counters); the
//! orchestrator hands out an immutable [`RunStats`] snapshot once the run is
//! settled.

use crate::state::FetchStatus;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Aggregate counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Number of reachable domains handed to the pipeline
    pub total_pinged: u64,

    /// Domains whose artifacts were written
    pub saved: u64,

    /// Domains that never answered 200 or could not be persisted
    pub failed: u64,

    /// Domains fetched without any salient content
    pub not_useful: u64,
}

impl RunStats {
    /// Creates stats for a run over `total_pinged` domains
    pub fn new(total_pinged: u64) -> Self {
        Self {
            total_pinged,
            ..Self::default()
        }
    }

    /// Number of domains that reached a terminal outcome
    pub fn terminal_count(&self) -> u64 {
        self.saved + self.failed + self.not_useful
    }

    /// True once every domain has exactly one outcome
    pub fn is_settled(&self) -> bool {
        self.terminal_count() == self.total_pinged
    }

    /// Returns the saved share as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_pinged == 0 {
            return 0.0;
        }
        (self.saved as f64 / self.total_pinged as f64) * 100.0
    }

    /// Count for a single outcome
    pub fn count(&self, status: FetchStatus) -> u64 {
        match status {
            FetchStatus::Saved => self.saved,
            FetchStatus::Failed => self.failed,
            FetchStatus::NotUseful => self.not_useful,
        }
    }
}

/// Shared, concurrently updated counters
#[derive(Debug, Default)]
pub struct StatsCollector {
    total_pinged: u64,
    saved: AtomicU64,
    failed: AtomicU64,
    not_useful: AtomicU64,
}

impl StatsCollector {
    pub fn new(total_pinged: u64) -> Self {
        Self {
            total_pinged,
            ..Self::default()
        }
    }

    /// Records one terminal outcome; exactly one counter moves
    pub fn record(&self, status: FetchStatus) {
        let counter = match status {
            FetchStatus::Saved => &self.saved,
            FetchStatus::Failed => &self.failed,
            FetchStatus::NotUseful => &self.not_useful,
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Current values of all counters
    pub fn snapshot(&self) -> RunStats {
        RunStats {
            total_pinged: self.total_pinged,
            saved: self.saved.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            not_useful: self.not_useful.load(Ordering::SeqCst),
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(base: &str, stats: &RunStats) {
    println!("=== Scan Statistics for '{}' ===\n", base);

    println!("  Reachable domains: {}", stats.total_pinged);
    for status in FetchStatus::all() {
        let count = stats.count(status);
        let percentage = if stats.total_pinged > 0 {
            (count as f64 / stats.total_pinged as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", status, count, percentage);
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} domains saved)",
        stats.success_rate(),
        stats.saved,
        stats.total_pinged
    );
}
