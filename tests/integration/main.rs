//! Integration tests for Domain-Sweep
//!
//! These tests use wiremock to stand in for the scanned sites and tempfile
//! for the output directory.

mod pipeline_tests;
mod report_tests;
