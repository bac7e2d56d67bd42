//! reqwest-backed transport implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{QueryParams, Transport, TransportError};

/// URL whose domain the provider's login cookies are scoped to.
const COOKIE_DOMAIN_URL: &str = "https://115.com/";

/// Cookie domain attribute for imported login cookies.
const COOKIE_DOMAIN: &str = ".115.com";

/// Login credential, as the three cookies a browser session holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub uid: String,
    pub cid: String,
    pub seid: String,
}

/// HTTP transport over a shared reqwest client and cookie jar.
pub struct HttpTransport {
    client: Client,
    jar: Arc<Jar>,
}

impl HttpTransport {
    /// Create a transport that identifies itself with `user_agent`.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, TransportError> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        Ok(Self { client, jar })
    }

    /// Seed the cookie jar with a login credential.
    pub fn import_credential(&self, credential: &Credential) -> Result<(), TransportError> {
        let url = Url::parse(COOKIE_DOMAIN_URL)
            .map_err(|e| TransportError::Client(format!("Invalid cookie domain URL: {}", e)))?;

        for (name, value) in [
            ("UID", &credential.uid),
            ("CID", &credential.cid),
            ("SEID", &credential.seid),
        ] {
            let cookie = format!("{}={}; Domain={}; Path=/; HttpOnly", name, value, COOKIE_DOMAIN);
            self.jar.add_cookie_str(&cookie, &url);
        }

        debug!("Imported login credential into cookie jar");
        Ok(())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call_json(
        &self,
        endpoint: &str,
        query: &QueryParams,
        form: Option<&QueryParams>,
    ) -> Result<serde_json::Value, TransportError> {
        let request = match form {
            Some(form) => self
                .client
                .post(endpoint)
                .query(query.as_pairs())
                .form(form.as_pairs()),
            None => self.client.get(endpoint).query(query.as_pairs()),
        };

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn get_raw(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<Vec<u8>, TransportError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn cookies_for(&self, url: &str) -> Vec<(String, String)> {
        let url = match Url::parse(url) {
            Ok(url) => url,
            Err(e) => {
                warn!("Cannot look up cookies for unparseable URL: {}", e);
                return Vec::new();
            }
        };

        self.jar
            .cookies(&url)
            .and_then(|header| header.to_str().ok().map(parse_cookie_header))
            .unwrap_or_default()
    }
}

/// Split a `Cookie` request header value (`a=1; b=2`) into pairs.
fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            part.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
        })
        .collect()
}
