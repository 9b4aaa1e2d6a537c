//! HTTP fetcher implementation
//!
//! Fetches pages for the crawler with a browser-like User-Agent, following
//! redirects and reporting the final post-redirect URL. Certificate errors
//! are tolerated: the sites being scanned are small-business pages with
//! frequently broken TLS, and we only read public HTML from them.

use reqwest::Client;
use std::time::Duration;

/// User-Agent presented to scanned sites
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server responded with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network-level failure (connection refused, timeout, DNS, TLS)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the failure was a timeout
        timed_out: bool,
    },
}

/// Builds the HTTP client shared by all discovery sessions
///
/// # Arguments
///
/// * `timeout` - Per-request timeout; a timed-out fetch is treated like
///   any other fetch failure by the crawler
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout)
        .danger_accept_invalid_certs(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, classifying the outcome
///
/// Redirects are followed automatically; `final_url` is the effective URL
/// after the redirect chain. Any non-2xx response is reported as
/// `HttpError` - the crawler treats it as a skippable per-URL failure.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                    timed_out: e.is_timeout(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: format!("request timeout: {}", url),
                    timed_out: true,
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: format!("connection failed: {}", url),
                    timed_out: false,
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                    timed_out: false,
                }
            }
        }
    }
}
