//! Resolve cloud-storage pickcodes into download tickets and HLS manifests.

pub mod agent;
pub mod config;
pub mod testing;
pub mod transport;

pub use agent::{Agent, AgentError, DownloadTicket, DEFAULT_AGENT_NAME, DEFAULT_API_BASE};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, AgentConfig, Config,
    ConfigError, SanitizedConfig,
};
pub use transport::{Credential, HttpTransport, QueryParams, Transport, TransportError};
