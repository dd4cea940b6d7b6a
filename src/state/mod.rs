//! State module for tracking per-domain fetch progress
//!
//! # Components
//!
//! - `FetchState`: where a reachable domain is in its attempt cycle
//!   (pending, fetching, waiting to retry, fetched, terminal)
//! - `FetchStatus`: the three terminal outcomes counted in the run stats
//! - `StateEvent`: the inputs that drive the transitions

mod fetch_state;

pub use fetch_state::{FetchState, FetchStatus, StateEvent, TransitionError};
