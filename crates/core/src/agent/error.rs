use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by agent operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// The call never produced a usable response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The provider answered and reported a failure.
    #[error("Provider error {code}: {message}")]
    Provider { code: i64, message: String },

    /// The video exists but has not finished transcoding.
    #[error("Video is not ready for streaming")]
    VideoNotReady,
}

impl AgentError {
    /// Provider error code, if the provider reported this failure.
    pub fn provider_code(&self) -> Option<i64> {
        match self {
            AgentError::Provider { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_not_ready(&self) -> bool {
        matches!(self, AgentError::VideoNotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_keeps_code_and_message() {
        let err = AgentError::Provider {
            code: 70005,
            message: "file not found".to_string(),
        };
        assert_eq!(err.provider_code(), Some(70005));
        assert_eq!(err.to_string(), "Provider error 70005: file not found");
    }

    #[test]
    fn test_not_ready_has_no_code() {
        let err = AgentError::VideoNotReady;
        assert!(err.is_not_ready());
        assert_eq!(err.provider_code(), None);
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let err: AgentError = TransportError::Timeout.into();
        assert_eq!(err.to_string(), "Request timeout");
        assert!(!err.is_not_ready());
    }
}
