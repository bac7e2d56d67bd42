//! Types for transport operations.

use async_trait::async_trait;
use thiserror::Error;

use super::QueryParams;

/// Errors raised by the transport itself.
///
/// These only describe failures to complete or decode a call. A provider
/// answering "no" inside a well-formed JSON body is not a transport error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::ConnectionFailed(e.to_string())
        } else if e.is_decode() {
            TransportError::Decode(e.to_string())
        } else if e.is_builder() {
            TransportError::Client(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        TransportError::Decode(e.to_string())
    }
}

/// Trait for the HTTP collaborator the agent calls through.
///
/// Implementations own the connection pool, TLS and the cookie jar. The agent
/// only ever reads cookies, it never writes them.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Call a JSON API endpoint and return the decoded body.
    ///
    /// Sends a GET with `query` when `form` is `None`, otherwise a POST with
    /// `form` url-encoded as the request body.
    async fn call_json(
        &self,
        endpoint: &str,
        query: &QueryParams,
        form: Option<&QueryParams>,
    ) -> Result<serde_json::Value, TransportError>;

    /// Fetch a URL and return the raw response body.
    async fn get_raw(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<Vec<u8>, TransportError>;

    /// Cookies currently held for the given URL, as `(name, value)` pairs.
    ///
    /// Order follows the store's own iteration and is not guaranteed to be
    /// stable between calls.
    async fn cookies_for(&self, url: &str) -> Vec<(String, String)>;
}
