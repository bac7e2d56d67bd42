//! Mock transport for testing.

use async_trait::async_trait;
use reqwest::Url;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::transport::{QueryParams, Transport, TransportError};

/// A recorded transport call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Json {
        endpoint: String,
        query: QueryParams,
        form: Option<QueryParams>,
    },
    RawGet {
        url: String,
        headers: Vec<(String, String)>,
    },
    Cookies {
        url: String,
    },
}

/// A cookie held by the mock, scoped to a domain.
#[derive(Debug, Clone)]
struct MockCookie {
    domain: String,
    name: String,
    value: String,
}

impl MockCookie {
    fn matches_host(&self, host: &str) -> bool {
        let domain = self.domain.trim_start_matches('.');
        host == domain || host.ends_with(&format!(".{}", domain))
    }
}

/// Mock implementation of the Transport trait.
///
/// Provides controllable behavior for testing:
/// - Canned JSON answers per endpoint path, raw bodies per URL
/// - Domain-scoped cookies, returned in insertion order
/// - Call recording
/// - Error injection
///
/// Clones share state, so a test can keep a handle after moving one clone
/// into an agent.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    /// JSON answers keyed by endpoint path (e.g. `/files/download`).
    json: Arc<RwLock<HashMap<String, serde_json::Value>>>,
    /// Raw bodies keyed by full URL.
    raw: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    cookies: Arc<RwLock<Vec<MockCookie>>>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// If set, the next JSON or raw call will fail with this error.
    next_error: Arc<RwLock<Option<TransportError>>>,
}

impl MockTransport {
    /// Create a new empty mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Answer JSON calls whose endpoint ends with `path`.
    pub async fn set_json(&self, path: &str, value: serde_json::Value) {
        self.json.write().await.insert(path.to_string(), value);
    }

    /// Answer raw fetches of `url` with `body`.
    pub async fn set_raw(&self, url: &str, body: Vec<u8>) {
        self.raw.write().await.insert(url.to_string(), body);
    }

    /// Hold a cookie for `domain` and its subdomains.
    pub async fn add_cookie(&self, domain: &str, name: &str, value: &str) {
        self.cookies.write().await.push(MockCookie {
            domain: domain.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Number of JSON API calls performed.
    pub async fn json_call_count(&self) -> usize {
        self.count(|c| matches!(c, RecordedCall::Json { .. })).await
    }

    /// Number of raw fetches performed.
    pub async fn raw_get_count(&self) -> usize {
        self.count(|c| matches!(c, RecordedCall::RawGet { .. })).await
    }

    async fn count(&self, pred: impl Fn(&RecordedCall) -> bool) -> usize {
        self.calls.read().await.iter().filter(|c| pred(c)).count()
    }

    async fn record(&self, call: RecordedCall) {
        self.calls.write().await.push(call);
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next JSON or raw call to fail with the given error.
    pub async fn set_next_error(&self, error: TransportError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<TransportError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call_json(
        &self,
        endpoint: &str,
        query: &QueryParams,
        form: Option<&QueryParams>,
    ) -> Result<serde_json::Value, TransportError> {
        self.record(RecordedCall::Json {
            endpoint: endpoint.to_string(),
            query: query.clone(),
            form: form.cloned(),
        })
        .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.json
            .read()
            .await
            .iter()
            .find(|(path, _)| endpoint.ends_with(path.as_str()))
            .map(|(_, value)| value.clone())
            .ok_or_else(|| TransportError::Http {
                status: 404,
                body: format!("no mock answer for {}", endpoint),
            })
    }

    async fn get_raw(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<Vec<u8>, TransportError> {
        self.record(RecordedCall::RawGet {
            url: url.to_string(),
            headers: headers.to_vec(),
        })
        .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.raw
            .read()
            .await
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Http {
                status: 404,
                body: format!("no mock body for {}", url),
            })
    }

    async fn cookies_for(&self, url: &str) -> Vec<(String, String)> {
        self.record(RecordedCall::Cookies {
            url: url.to_string(),
        })
        .await;

        let host = match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
            Some(host) => host,
            None => return Vec::new(),
        };

        self.cookies
            .read()
            .await
            .iter()
            .filter(|c| c.matches_host(&host))
            .map(|c| (c.name.clone(), c.value.clone()))
            .collect()
    }
}
