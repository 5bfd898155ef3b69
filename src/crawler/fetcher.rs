//! HTTP fetcher implementation
//!
//! This module handles every HTTP request the pipeline makes:
//! - Building one shared client so timeout and redirect policy are uniform
//! - A single bounded GET per probe, no retries
//! - Classifying the outcome as success, HTTP error or network error

use crate::config::FetcherConfig;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Result of a single page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetchResult {
    /// The server answered 200 and the body was read
    Success {
        /// HTTP status code (always 200)
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with any status other than 200; the body is dropped
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// DNS, connection, TLS, timeout or body read failure
    NetworkError {
        /// Error description
        cause: String,
    },
}

impl PageFetchResult {
    /// Returns the HTTP status code, if a response was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PageFetchResult::Success { status_code, .. }
            | PageFetchResult::HttpError { status_code } => Some(*status_code),
            PageFetchResult::NetworkError { .. } => None,
        }
    }
}

/// Anything that can perform one classified GET
///
/// The site processor is generic over this so the same pipeline runs against
/// a real HTTP client or a scripted set of responses.
pub trait PageFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = PageFetchResult> + Send;
}

/// [`PageFetcher`] backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with a client configured from `config`
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::from_client(build_http_client(config)?))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = PageFetchResult> + Send {
        fetch_page(&self.client, url)
    }
}

/// Builds an HTTP client with proper configuration
///
/// The timeout covers the whole request including the body. A
/// `max_redirects` of zero disables redirect following, in which case a 3xx
/// answer is classified like any other non-200 status.
///
/// # Example
///
/// ```no_run
/// use address_trawl::config::FetcherConfig;
/// use address_trawl::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let redirect = if config.max_redirects == 0 {
        Policy::none()
    } else {
        Policy::limited(config.max_redirects)
    };

    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(redirect)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200, body read | `Success` |
/// | Any other HTTP status | `HttpError` |
/// | Timeout | `NetworkError` |
/// | Connection refused / DNS / TLS | `NetworkError` |
/// | Redirect limit exceeded | `NetworkError` |
/// | Body read failure | `NetworkError` |
pub async fn fetch_page(client: &Client, url: &Url) -> PageFetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            return PageFetchResult::NetworkError {
                cause: describe_transport_error(&e),
            }
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        return PageFetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => PageFetchResult::Success {
            status_code: status.as_u16(),
            body,
        },
        Err(e) => PageFetchResult::NetworkError {
            cause: format!("Failed to read body: {}", describe_transport_error(&e)),
        },
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_redirect() {
        format!("Redirect error: {}", e)
    } else {
        e.to_string()
    }
}
