//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building an HTTP client with the configured user agent and timeouts
//! - GET requests for listing pages
//! - Error classification (transport failure vs non-success status)
//!
//! No retries: any failure ends pagination.

use crate::config::RequestConfig;
use reqwest::Client;
use std::future::Future;
use thiserror::Error;

/// Errors that can occur while fetching a listing page
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, timeout, or unreadable body
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status code
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl FetchError {
    /// True for network-level failures, false for HTTP status failures
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Client(_))
    }
}

/// Retrieves the body of a listing page
///
/// The collector only ever talks to this trait, so the transport can be swapped
/// out (tests use an in-memory implementation).
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Builds an HTTP client with the configured user agent and timeouts
///
/// # Example
///
/// ```no_run
/// use listing_harvest::config::RequestConfig;
/// use listing_harvest::harvest::build_http_client;
///
/// let client = build_http_client(&RequestConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &RequestConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed page fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the request configuration
    pub fn new(config: &RequestConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        fetch_page(&self.client, url).await
    }
}

/// Fetches a URL and returns its body
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Ok(body)` |
/// | Any other status | `FetchError::Status` |
/// | Timeout | `FetchError::Transport` |
/// | Connection refused / DNS / TLS | `FetchError::Transport` |
/// | Body read failure | `FetchError::Transport` |
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    };

    FetchError::Transport {
        url: url.to_string(),
        message,
    }
}
