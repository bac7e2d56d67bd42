use serde::{Deserialize, Serialize};

use crate::agent::{DEFAULT_AGENT_NAME, DEFAULT_API_BASE};
use crate::transport::Credential;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    /// Login cookies to seed the transport with
    #[serde(default)]
    pub credential: Option<Credential>,
}

/// Agent configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentConfig {
    /// Identifying name, sent as `User-Agent`
    #[serde(default = "default_name")]
    pub name: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Provider API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            timeout_secs: default_timeout(),
            api_base: default_api_base(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_AGENT_NAME.to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

/// Sanitized config for display (credential redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub agent: AgentConfig,
    pub credential_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            agent: config.agent.clone(),
            credential_configured: config.credential.is_some(),
        }
    }
}
