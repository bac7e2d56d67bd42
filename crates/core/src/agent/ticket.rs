//! Download ticket assembly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::types::DownloadInfo;

pub const HEADER_USER_AGENT: &str = "User-Agent";
pub const HEADER_COOKIE: &str = "Cookie";

/// Everything a separate HTTP tool needs to download one file.
///
/// The headers must be sent verbatim with the request to `url`; they carry
/// the session cookies the URL is bound to. The URL expires server-side, so a
/// ticket should be used soon after it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadTicket {
    /// Download URL.
    pub url: String,
    /// Request headers to send with the download.
    pub headers: HashMap<String, String>,
    /// File name.
    pub file_name: String,
    /// File size in bytes.
    pub file_size: u64,
}

impl DownloadTicket {
    /// Headers rendered as `Name: value`, sorted by name, ready for curl's
    /// `-H` or aria2's `--header`.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .headers
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        lines.sort();
        lines
    }
}

/// Render cookies as a `Cookie` header value: `name=value;` for each, in the
/// order given.
pub(crate) fn cookie_header(cookies: &[(String, String)]) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{}={};", name, value))
        .collect()
}

pub(crate) fn assemble_ticket(
    info: DownloadInfo,
    user_agent: &str,
    cookies: &[(String, String)],
) -> DownloadTicket {
    let mut headers = HashMap::with_capacity(2);
    headers.insert(HEADER_USER_AGENT.to_string(), user_agent.to_string());
    headers.insert(HEADER_COOKIE.to_string(), cookie_header(cookies));

    DownloadTicket {
        url: info.url,
        headers,
        file_name: info.file_name,
        file_size: info.file_size,
    }
}
