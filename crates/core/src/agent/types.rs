//! Wire shapes of the provider's JSON answers.
//!
//! Each response is turned into an [`Outcome`] right after decoding, so the
//! success flag is looked at in exactly one place.

use serde::{de, Deserialize, Deserializer};

/// Decoded provider answer: a payload or the provider's failure pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome<T> {
    Success(T),
    Failure { code: i64, message: String },
}

/// Payload of a successful download info call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DownloadInfo {
    pub url: String,
    pub file_name: String,
    pub file_size: u64,
}

/// Payload of a successful video info call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VideoInfo {
    pub video_url: String,
    pub file_status: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DownloadInfoResponse {
    #[serde(default, deserialize_with = "flag")]
    state: bool,
    #[serde(default, rename = "msg")]
    message: String,
    #[serde(default, rename = "msg_code", deserialize_with = "number")]
    message_code: i64,
    #[serde(default, alias = "url")]
    file_url: String,
    #[serde(default)]
    file_name: String,
    #[serde(default)]
    file_size: String,
}

impl DownloadInfoResponse {
    pub(crate) fn into_outcome(self) -> Outcome<DownloadInfo> {
        if !self.state {
            return Outcome::Failure {
                code: self.message_code,
                message: self.message,
            };
        }

        Outcome::Success(DownloadInfo {
            file_size: parse_file_size(&self.file_size),
            url: self.file_url,
            file_name: self.file_name,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoInfoResponse {
    #[serde(default, deserialize_with = "flag")]
    state: bool,
    #[serde(default, rename = "errcode", alias = "errNo", deserialize_with = "number")]
    error_code: i64,
    #[serde(default)]
    error: String,
    #[serde(default, deserialize_with = "number")]
    file_status: i64,
    #[serde(default)]
    video_url: String,
}

impl VideoInfoResponse {
    pub(crate) fn into_outcome(self) -> Outcome<VideoInfo> {
        if !self.state {
            return Outcome::Failure {
                code: self.error_code,
                message: self.error,
            };
        }

        Outcome::Success(VideoInfo {
            video_url: self.video_url,
            file_status: self.file_status,
        })
    }
}

/// Parse the provider's string-typed file size.
///
/// # Panics
///
/// Panics when the string is not a non-negative integer. A successful answer
/// with a malformed size breaks the provider contract and must not produce a
/// ticket with a made-up size.
pub(crate) fn parse_file_size(raw: &str) -> u64 {
    match raw.parse::<u64>() {
        Ok(size) => size,
        Err(e) => panic!("provider returned a malformed file size {:?}: {}", raw, e),
    }
}

/// Accepts `true`/`false` as well as integer flags (`0` is false).
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(i)) => i != 0,
        None => false,
    })
}

/// Accepts integers as well as integer strings (empty string is `0`).
fn number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Str(String),
    }

    match Option::<Number>::deserialize(deserializer)? {
        Some(Number::Int(i)) => Ok(i),
        Some(Number::Str(s)) if s.trim().is_empty() => Ok(0),
        Some(Number::Str(s)) => s.trim().parse().map_err(de::Error::custom),
        None => Ok(0),
    }
}
