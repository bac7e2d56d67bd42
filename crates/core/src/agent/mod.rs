//! The agent: resolves pickcodes into download tickets and HLS manifests.
//!
//! An [`Agent`] bundles a [`Transport`] with the name it identifies itself
//! by. Both are injected by the caller, so tests can swap in
//! [`crate::testing::MockTransport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use pickport_core::{load_config, Agent};
//!
//! let config = load_config(Path::new("pickport.toml"))?;
//! let agent = Agent::from_config(&config)?;
//!
//! let ticket = agent.create_download_ticket("pickcode").await?;
//! let mut cmd = std::process::Command::new("curl");
//! cmd.arg(&ticket.url).arg("-o").arg(&ticket.file_name);
//! for line in ticket.header_lines() {
//!     cmd.arg("-H").arg(line);
//! }
//! ```

mod download;
mod error;
mod interpret;
mod ticket;
mod types;
mod video;

pub use error::AgentError;
pub use ticket::{DownloadTicket, HEADER_COOKIE, HEADER_USER_AGENT};

use std::time::Duration;

use tracing::info;

use crate::config::Config;
use crate::transport::{HttpTransport, Transport};

/// Provider web API base URL.
pub const DEFAULT_API_BASE: &str = "https://webapi.115.com";

/// Name used when the configuration does not provide one.
pub const DEFAULT_AGENT_NAME: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DOWNLOAD_PATH: &str = "/files/download";
const VIDEO_PATH: &str = "/files/video";

/// Client context for pickcode resolution.
pub struct Agent<T: Transport> {
    transport: T,
    name: String,
    api_base: String,
}

impl<T: Transport> Agent<T> {
    /// Create an agent over `transport`, identifying itself as `name`.
    pub fn new(transport: T, name: impl Into<String>) -> Self {
        Self {
            transport,
            name: name.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the provider API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Identifying name, sent as `User-Agent` on tickets.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

impl Agent<HttpTransport> {
    /// Build an agent over the HTTP transport, importing the configured
    /// credential if any.
    pub fn from_config(config: &Config) -> Result<Self, AgentError> {
        let transport = HttpTransport::new(
            &config.agent.name,
            Duration::from_secs(config.agent.timeout_secs as u64),
        )?;

        if let Some(credential) = &config.credential {
            transport.import_credential(credential)?;
        } else {
            info!("No credential configured, provider calls will be anonymous");
        }

        Ok(Agent::new(transport, config.agent.name.clone()).with_api_base(&config.agent.api_base))
    }
}
