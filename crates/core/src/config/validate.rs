use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Agent name is not empty
/// - Timeout is not 0
/// - API base is an http(s) URL
/// - Credential cookies are not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.agent.name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "agent.name cannot be empty".to_string(),
        ));
    }

    if config.agent.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "agent.timeout_secs cannot be 0".to_string(),
        ));
    }

    let base = &config.agent.api_base;
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "agent.api_base must be an http(s) URL, got {:?}",
            base
        )));
    }

    if let Some(credential) = &config.credential {
        for (field, value) in [
            ("uid", &credential.uid),
            ("cid", &credential.cid),
            ("seid", &credential.seid),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "credential.{} cannot be empty",
                    field
                )));
            }
        }
    }

    Ok(())
}
