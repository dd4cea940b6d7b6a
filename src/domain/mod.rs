//! Domain model for TLD variant scanning
//!
//! This module provides:
//! - Validation of the base name that suffixes are appended to
//! - Suffix normalization (leading dot, trimming, case)
//! - The `Candidate` and `ReachableDomain` value types

mod base;
mod candidate;

pub use base::{is_valid_base_char, validate_base, MAX_BASE_LEN};
pub use candidate::{build_candidates, normalize_suffix, Candidate, ReachableDomain};
