//! Domain liveness probing
//!
//! Tries every base + suffix combination with one GET request and keeps the
//! candidates that answer HTTP 200 within the timeout. Requests run on tokio
//! tasks gated by a semaphore sized to the worker count.

use crate::domain::{build_candidates, validate_base, Candidate, ReachableDomain};
use crate::fetch::Transport;
use crate::{ConfigError, SweepError};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Upper bound on probe workers
pub const MAX_PROBE_CONCURRENCY: usize = 100;

/// Probes `https://{base}{suffix}` for every suffix
///
/// Suffixes are normalized (leading dot, lower case) and de-duplicated before
/// probing. Network errors, timeouts and non-200 answers all mean "not
/// reachable"; they never fail the batch.
///
/// # Arguments
///
/// * `transport` - The HTTP transport
/// * `base` - The base name, validated before any request is made
/// * `suffixes` - Candidate suffixes, with or without a leading dot
/// * `timeout` - Bound on each individual request
/// * `concurrency` - Worker count, 1..=100
///
/// # Returns
///
/// * `Ok(HashSet)` - The reachable candidates, in no particular order
/// * `Err(SweepError)` - Invalid base or worker count
pub async fn probe<S: AsRef<str>>(
    transport: Arc<dyn Transport>,
    base: &str,
    suffixes: &[S],
    timeout: Duration,
    concurrency: usize,
) -> Result<HashSet<ReachableDomain>, SweepError> {
    let base = validate_base(base)?;

    if concurrency < 1 || concurrency > MAX_PROBE_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "probe concurrency must be between 1 and {}, got {}",
            MAX_PROBE_CONCURRENCY, concurrency
        ))
        .into());
    }

    let candidates = build_candidates(base, suffixes);
    if candidates.is_empty() {
        tracing::info!("No suffixes to probe for '{}'", base);
        return Ok(HashSet::new());
    }

    tracing::info!(
        "Probing {} candidates for '{}' with {} workers",
        candidates.len(),
        base,
        concurrency
    );

    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();

    for candidate in candidates {
        let transport = Arc::clone(&transport);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            check_candidate(transport.as_ref(), candidate, timeout).await
        });
    }

    let mut reachable = HashSet::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some(domain)) => {
                tracing::info!("Domain {} is reachable", domain.url);
                reachable.insert(domain);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Probe task failed: {}", e),
        }
    }

    if reachable.is_empty() {
        tracing::info!("No reachable domains found for '{}'", base);
    }

    Ok(reachable)
}

/// Returns the candidate if it answers 200 within `timeout`
///
/// The body is read as part of the request, so a 200 whose body cannot be
/// read within `timeout` counts as not reachable.
async fn check_candidate(
    transport: &dyn Transport,
    candidate: Candidate,
    timeout: Duration,
) -> Option<ReachableDomain> {
    match tokio::time::timeout(timeout, transport.get(&candidate.url, timeout)).await {
        Ok(result) if result.is_success() => Some(ReachableDomain::confirmed(candidate)),
        Ok(result) => {
            tracing::debug!("{} not reachable: {}", candidate.url, result.describe());
            None
        }
        Err(_) => {
            tracing::debug!("{} not reachable: probe timed out", candidate.url);
            None
        }
    }
}
