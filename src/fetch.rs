//! Webpage fetching.
//!
//! This module provides `PageFetcher` for the single blocking GET that seeds
//! a session, along with URL normalization for bare host input. A fetch
//! failure is fatal to the session: the caller prints the error and ends.

use std::time::Duration;

use thiserror::Error;

/// Total timeout for the page request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while fetching a webpage.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request or response timeout errors
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    /// Non-success HTTP status from the server
    #[error("HTTP error: status {status}")]
    Status { status: u16 },
}

impl FetchError {
    /// Splits a transport error into the timeout and general network cases.
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err)
        } else {
            FetchError::Network(err)
        }
    }
}

/// Normalizes a user-entered URL by prepending a default scheme.
///
/// Bare hosts get `https://` prepended; input that already starts with
/// `http://` or `https://` passes through unmodified.
///
/// # Examples
///
/// ```
/// use pageqa::fetch::normalize_url;
///
/// assert_eq!(normalize_url("example.com"), "https://example.com");
/// assert_eq!(normalize_url("http://example.com"), "http://example.com");
/// ```
pub fn normalize_url(input: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{input}")
    }
}

/// Blocking HTTP client for retrieving a single webpage.
///
/// The client is configured with a bounded total timeout so a stalled
/// server cannot hang the session indefinitely.
pub struct PageFetcher {
    client: reqwest::blocking::Client,
}

impl PageFetcher {
    /// Creates a fetcher with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Network` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    /// Creates a fetcher with a custom total timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self { client })
    }

    /// Performs a GET request and returns the decoded response body.
    ///
    /// # Errors
    ///
    /// - `FetchError::Timeout` when the request exceeds the configured timeout
    /// - `FetchError::Status` for any non-2xx response
    /// - `FetchError::Network` for all other transport failures, including
    ///   failures while reading the body
    pub fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response.text().map_err(FetchError::from_transport)
    }
}
