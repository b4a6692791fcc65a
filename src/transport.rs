//! HTTP transport abstraction
//!
//! The gateway never talks to `reqwest` directly. It issues requests through
//! the `HttpTransport` trait so that tests can substitute a scripted fake and
//! assert exactly how many network calls were made.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while performing an HTTP request.
///
/// These never reach gateway callers; the fetch cascade converts them into
/// cool-down marks on the failing source.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the source's configured timeout
    #[error("Request timed out after {0:?}")]
    TimedOut(Duration),

    /// The request failed at the transport level (DNS, TLS, connection reset, ...)
    #[error("Request failed: {0}")]
    Request(String),
}

/// A minimal HTTP response: status code plus raw body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    /// Returns true for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for issuing HTTP GET requests with a per-request timeout.
pub trait HttpTransport: Send + Sync {
    /// Performs a GET request against the given URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The fully composed request URL
    /// * `timeout` - Hard deadline for the whole request
    ///
    /// # Returns
    ///
    /// The response (regardless of status code) or a `TransportError` if the
    /// request could not be completed at all.
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by a blocking `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a new transport with a default client.
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .header(
                reqwest::header::USER_AGENT,
                concat!("cinegate/", env!("CARGO_PKG_VERSION")),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::TimedOut(timeout)
                } else {
                    TransportError::Request(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
