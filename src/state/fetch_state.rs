//! Fetch state definitions for tracking a domain through its attempts
//!
//! ```text
//! Pending -> Fetching(1) -> Fetched(n) -> Terminal{Saved | NotUseful | Failed}
//!               |    ^
//!               v    |
//!          RetryWait(n)  --(attempts exhausted)--> Terminal{Failed}
//! ```
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Terminal outcome of a domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    /// Content extracted and every requested artifact written
    Saved,

    /// Every attempt failed, or the artifacts could not be written
    Failed,

    /// Page fetched but carried no salient content; nothing written
    NotUseful,
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Failed => "failed",
            Self::NotUseful => "not_useful",
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::Saved, Self::Failed, Self::NotUseful]
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents where a domain is in its attempt cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    // ===== Active States =====
    /// Scheduled, no attempt made yet
    Pending,

    /// Attempt `attempt` (1-based) is in flight
    Fetching { attempt: u32 },

    /// Attempt `attempt` failed; waiting out the backoff before the next one
    RetryWait { attempt: u32 },

    /// Attempt `attempt` returned 200; extraction and persistence pending
    Fetched { attempt: u32 },

    // ===== Terminal State =====
    /// No further processing; `attempts` is the number of requests made
    Terminal { status: FetchStatus, attempts: u32 },
}

/// Inputs that move a domain between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// The worker picked the domain up
    Begin,
    /// Non-200 answer or network error
    AttemptFailed,
    /// The retry backoff is over
    BackoffElapsed,
    /// HTTP 200 with a body
    Fetched,
    /// The extractor found nothing salient
    ContentMissing,
    /// Every requested artifact was written
    Persisted,
    /// Writing an artifact failed
    PersistFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid state transition: {from:?} on {event:?}")]
pub struct TransitionError {
    pub from: FetchState,
    pub event: StateEvent,
}

impl FetchState {
    /// Applies `event`, bounded by `max_attempts`
    ///
    /// A failed attempt moves to `RetryWait` while attempts remain and to
    /// `Terminal{Failed}` once `max_attempts` requests have been made.
    pub fn transition(
        self,
        event: StateEvent,
        max_attempts: u32,
    ) -> Result<FetchState, TransitionError> {
        let next = match (self, event) {
            (Self::Pending, StateEvent::Begin) => Self::Fetching { attempt: 1 },

            (Self::Fetching { attempt }, StateEvent::AttemptFailed) => {
                if attempt < max_attempts {
                    Self::RetryWait { attempt }
                } else {
                    Self::Terminal {
                        status: FetchStatus::Failed,
                        attempts: attempt,
                    }
                }
            }

            (Self::Fetching { attempt }, StateEvent::Fetched) => Self::Fetched { attempt },

            (Self::RetryWait { attempt }, StateEvent::BackoffElapsed) => Self::Fetching {
                attempt: attempt + 1,
            },

            (Self::Fetched { attempt }, StateEvent::ContentMissing) => Self::Terminal {
                status: FetchStatus::NotUseful,
                attempts: attempt,
            },

            (Self::Fetched { attempt }, StateEvent::Persisted) => Self::Terminal {
                status: FetchStatus::Saved,
                attempts: attempt,
            },

            (Self::Fetched { attempt }, StateEvent::PersistFailed) => Self::Terminal {
                status: FetchStatus::Failed,
                attempts: attempt,
            },

            (from, event) => return Err(TransitionError { from, event }),
        };

        Ok(next)
    }

    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal { .. })
    }

    /// Returns the terminal status, if any
    pub fn status(&self) -> Option<FetchStatus> {
        match self {
            Self::Terminal { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Number of requests made so far
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Pending => 0,
            Self::Fetching { attempt }
            | Self::RetryWait { attempt }
            | Self::Fetched { attempt } => *attempt,
            Self::Terminal { attempts, .. } => *attempts,
        }
    }
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Fetching { attempt } => write!(f, "fetching (attempt {})", attempt),
            Self::RetryWait { attempt } => write!(f, "retry_wait (after attempt {})", attempt),
            Self::Fetched { attempt } => write!(f, "fetched (attempt {})", attempt),
            Self::Terminal { status, attempts } => {
                write!(f, "{} after {} attempt(s)", status, attempts)
            }
        }
    }
}
