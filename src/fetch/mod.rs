//! HTTP fetching for both probing and page retrieval
//!
//! Everything that touches the network goes through the [`Transport`] trait,
//! so the prober and the pipeline can be driven by an in-memory fake in tests.

mod fetcher;
#[cfg(test)]
pub(crate) mod testing;

pub use fetcher::{build_http_client, FetchResult, HttpTransport, Transport};
