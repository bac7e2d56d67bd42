//! Turn decoded provider answers into payloads or domain errors.

use serde::de::DeserializeOwned;

use crate::transport::TransportError;

use super::types::{DownloadInfo, DownloadInfoResponse, Outcome, VideoInfo, VideoInfoResponse};
use super::AgentError;

/// `file_status` value of a video that can be streamed.
pub(crate) const VIDEO_READY: i64 = 1;

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, AgentError> {
    serde_json::from_value(value).map_err(|e| AgentError::Transport(TransportError::from(e)))
}

fn into_result<T>(outcome: Outcome<T>) -> Result<T, AgentError> {
    match outcome {
        Outcome::Success(payload) => Ok(payload),
        Outcome::Failure { code, message } => Err(AgentError::Provider { code, message }),
    }
}

/// Interpret a download info answer.
pub(crate) fn interpret_download(value: serde_json::Value) -> Result<DownloadInfo, AgentError> {
    let response: DownloadInfoResponse = decode(value)?;
    into_result(response.into_outcome())
}

/// Interpret a video info answer, including the readiness check.
pub(crate) fn interpret_video(value: serde_json::Value) -> Result<VideoInfo, AgentError> {
    let response: VideoInfoResponse = decode(value)?;
    let info = into_result(response.into_outcome())?;

    if info.file_status != VIDEO_READY {
        return Err(AgentError::VideoNotReady);
    }

    Ok(info)
}
