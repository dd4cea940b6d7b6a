//! Pipeline coordinator - fetch, extract and persist every reachable domain
//!
//! Each domain is driven by its own task through the [`FetchState`] machine.
//! A shared semaphore bounds the number of attempts in flight. A task holds
//! its slot for one attempt only: the request, extraction, persistence and
//! the rate-limit cool-down. Retry backoff is spent without a slot.

use crate::domain::{validate_base, ReachableDomain};
use crate::extract::{DocumentRecord, Extractor};
use crate::fetch::{FetchResult, Transport};
use crate::output::{write_artifacts, RunStats, StatsCollector};
use crate::pipeline::events::{EventSink, PipelineEvent};
use crate::pipeline::settings::PipelineConfig;
use crate::state::{FetchState, FetchStatus, StateEvent};
use crate::SweepError;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Final result for one domain
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub domain: ReachableDomain,
    pub status: FetchStatus,
    /// Requests made, 0 if the task never got to run
    pub attempts: u32,
    /// Extracted record, present whenever a page was fetched
    pub document: Option<DocumentRecord>,
    /// Files written, empty unless `status` is `Saved`
    pub artifacts: Vec<PathBuf>,
}

/// Statistics plus per-domain outcomes of a run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: RunStats,
    pub outcomes: Vec<FetchOutcome>,
}

/// Main pipeline structure
///
/// Holds the collaborators; everything specific to a run is passed to
/// [`Pipeline::run`].
#[derive(Clone)]
pub struct Pipeline {
    transport: Arc<dyn Transport>,
    extractor: Arc<dyn Extractor>,
    sink: Option<Arc<dyn EventSink>>,
}

/// State shared by the tasks of one run
struct RunContext {
    transport: Arc<dyn Transport>,
    extractor: Arc<dyn Extractor>,
    sink: Option<Arc<dyn EventSink>>,
    config: PipelineConfig,
    base: String,
    slots: Arc<Semaphore>,
    stats: StatsCollector,
}

impl Pipeline {
    pub fn new(transport: Arc<dyn Transport>, extractor: Arc<dyn Extractor>) -> Self {
        Self {
            transport,
            extractor,
            sink: None,
        }
    }

    /// Attaches an event sink
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Processes every domain and returns the run statistics
    ///
    /// Individual failures never abort the run; they are counted. Only an
    /// invalid base or configuration is an error.
    pub async fn run(
        &self,
        base: &str,
        domains: Vec<ReachableDomain>,
        config: PipelineConfig,
    ) -> Result<RunStats, SweepError> {
        Ok(self.run_detailed(base, domains, config).await?.stats)
    }

    /// Like [`Pipeline::run`], also returning the outcome of every domain
    pub async fn run_detailed(
        &self,
        base: &str,
        domains: Vec<ReachableDomain>,
        config: PipelineConfig,
    ) -> Result<RunReport, SweepError> {
        let base = validate_base(base)?.to_string();
        config.validate()?;

        tracing::info!(
            "Starting pipeline for {} domain(s) of '{}' (concurrency {}, retries {})",
            domains.len(),
            base,
            config.concurrency,
            config.retries
        );

        let ctx = Arc::new(RunContext {
            transport: Arc::clone(&self.transport),
            extractor: Arc::clone(&self.extractor),
            sink: self.sink.clone(),
            slots: Arc::new(Semaphore::new(config.concurrency)),
            stats: StatsCollector::new(domains.len() as u64),
            config,
            base,
        });

        let handles: Vec<(ReachableDomain, JoinHandle<FetchOutcome>)> = domains
            .into_iter()
            .map(|domain| {
                let ctx = Arc::clone(&ctx);
                let task_domain = domain.clone();
                let handle = tokio::spawn(async move { ctx.process_domain(task_domain).await });
                (domain, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (domain, handle) in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::error!("Task for {} aborted: {}", domain.url, e);
                    ctx.stats.record(FetchStatus::Failed);
                    ctx.emit(PipelineEvent::Failed {
                        url: domain.url.clone(),
                        attempts: 0,
                        reason: format!("task aborted: {}", e),
                    });
                    outcomes.push(FetchOutcome {
                        domain,
                        status: FetchStatus::Failed,
                        attempts: 0,
                        document: None,
                        artifacts: Vec::new(),
                    });
                }
            }
        }

        let stats = ctx.stats.snapshot();
        tracing::info!(
            "Pipeline finished: {} saved, {} failed, {} not useful",
            stats.saved,
            stats.failed,
            stats.not_useful
        );

        Ok(RunReport { stats, outcomes })
    }
}

impl RunContext {
    fn emit(&self, event: PipelineEvent) {
        if let Some(sink) = &self.sink {
            sink.emit(&event);
        }
    }

    /// Applies `event`; an impossible transition ends the domain as Failed
    fn advance(&self, url: &str, state: FetchState, event: StateEvent) -> FetchState {
        let attempts = state.attempts();
        match state.transition(event, self.config.retries) {
            Ok(next) => next,
            Err(e) => {
                tracing::error!("{} for {}", e, url);
                FetchState::Terminal {
                    status: FetchStatus::Failed,
                    attempts,
                }
            }
        }
    }

    /// One request bounded by the request timeout
    async fn attempt_fetch(&self, url: &str) -> FetchResult {
        let limit = self.config.request_timeout;
        match tokio::time::timeout(limit, self.transport.get(url, limit)).await {
            Ok(result) => result,
            Err(_) => FetchResult::NetworkError {
                error: format!("timed out after {:?}", limit),
                timed_out: true,
            },
        }
    }

    async fn process_domain(&self, domain: ReachableDomain) -> FetchOutcome {
        let url = domain.url.clone();
        let mut document = None;
        let mut artifacts = Vec::new();
        let mut state = self.advance(&url, FetchState::Pending, StateEvent::Begin);

        loop {
            if let Some(status) = state.status() {
                self.stats.record(status);
                return FetchOutcome {
                    domain,
                    status,
                    attempts: state.attempts(),
                    document,
                    artifacts,
                };
            }

            match state {
                FetchState::Fetching { attempt } => {
                    let permit = match Arc::clone(&self.slots).acquire_owned().await {
                        Ok(permit) => permit,
                        Err(e) => {
                            tracing::error!("Cannot acquire fetch slot for {}: {}", url, e);
                            state = FetchState::Terminal {
                                status: FetchStatus::Failed,
                                attempts: attempt - 1,
                            };
                            continue;
                        }
                    };

                    self.emit(PipelineEvent::FetchStarted {
                        url: url.clone(),
                        attempt,
                    });

                    state = match self.attempt_fetch(&url).await {
                        FetchResult::Success { body, .. } => {
                            let fetched = self.advance(&url, state, StateEvent::Fetched);
                            let record = self
                                .extractor
                                .extract(&body, self.config.tags_to_scrape.as_deref());
                            let record = DocumentRecord {
                                url: url.clone(),
                                ..record
                            };
                            let next = self.persist(&domain, &record, fetched, &mut artifacts);
                            document = Some(record);
                            next
                        }
                        failure => {
                            let reason = failure.describe();
                            let next = self.advance(&url, state, StateEvent::AttemptFailed);
                            if next.is_terminal() {
                                self.emit(PipelineEvent::Failed {
                                    url: url.clone(),
                                    attempts: attempt,
                                    reason,
                                });
                            } else {
                                self.emit(PipelineEvent::RetryScheduled {
                                    url: url.clone(),
                                    attempt,
                                    reason,
                                });
                            }
                            next
                        }
                    };

                    if !self.config.rate_limit.is_zero() {
                        tokio::time::sleep(self.config.rate_limit).await;
                    }
                    drop(permit);
                }

                FetchState::RetryWait { .. } => {
                    if !self.config.retry_backoff.is_zero() {
                        tokio::time::sleep(self.config.retry_backoff).await;
                    }
                    state = self.advance(&url, state, StateEvent::BackoffElapsed);
                }

                // Pending and Fetched never persist across a loop iteration
                other => {
                    tracing::error!("Unexpected state {} for {}", other, url);
                    state = FetchState::Terminal {
                        status: FetchStatus::Failed,
                        attempts: other.attempts(),
                    };
                }
            }
        }
    }

    /// Decides between NotUseful, Saved and Failed for a fetched page
    fn persist(
        &self,
        domain: &ReachableDomain,
        record: &DocumentRecord,
        fetched: FetchState,
        artifacts: &mut Vec<PathBuf>,
    ) -> FetchState {
        if !record.is_useful() {
            self.emit(PipelineEvent::NotUseful {
                url: domain.url.clone(),
            });
            return self.advance(&domain.url, fetched, StateEvent::ContentMissing);
        }

        match write_artifacts(
            &self.config.output_dir,
            &self.base,
            domain,
            record,
            &self.config.formats,
        ) {
            Ok(paths) => {
                self.emit(PipelineEvent::Saved {
                    url: domain.url.clone(),
                    paths: paths.clone(),
                });
                *artifacts = paths;
                self.advance(&domain.url, fetched, StateEvent::Persisted)
            }
            Err(e) => {
                self.emit(PipelineEvent::Failed {
                    url: domain.url.clone(),
                    attempts: fetched.attempts(),
                    reason: format!("could not write artifacts: {}", e),
                });
                self.advance(&domain.url, fetched, StateEvent::PersistFailed)
            }
        }
    }
}
