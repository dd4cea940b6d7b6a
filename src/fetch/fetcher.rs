//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building HTTP clients with the tool's user agent string
//! - GET requests with a per-request timeout
//! - Error classification into non-fatal fetch results

use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a single GET request
///
/// Failures are values, not errors: a timeout or a 500 is an ordinary
/// outcome for a candidate domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Server answered 200 OK
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// Server answered with any other status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (DNS, connection refused, TLS, timeout, body read)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request ran into its timeout
        timed_out: bool,
    },
}

impl FetchResult {
    /// True only for an HTTP 200 answer
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short description used in logs and events
    pub fn describe(&self) -> String {
        match self {
            Self::Success { .. } => "HTTP 200".to_string(),
            Self::HttpError { status_code } => format!("HTTP {}", status_code),
            Self::NetworkError { error, .. } => error.clone(),
        }
    }
}

/// Seam between the scanner and the network
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues one GET request bounded by `timeout`
    async fn get(&self, url: &str, timeout: Duration) -> FetchResult;
}

/// Builds an HTTP client with proper configuration
///
/// Redirects follow reqwest's default policy (up to 10 hops). Timeouts are
/// applied per request by [`HttpTransport`].
///
/// # Example
///
/// ```no_run
/// use domain_sweep::config::UserAgentConfig;
/// use domain_sweep::fetch::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from the user agent settings
    pub fn from_config(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, timeout: Duration) -> FetchResult {
        let response = match self.client.get(url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) => return classify_error(e),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return FetchResult::HttpError {
                status_code: status.as_u16(),
            };
        }

        let final_url = response.url().to_string();
        match response.text().await {
            Ok(body) => FetchResult::Success { final_url, body },
            Err(e) => classify_error(e),
        }
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            timed_out: true,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: "Connection failed".to_string(),
            timed_out: false,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            timed_out: false,
        }
    }
}
