//! Testing utilities and mock implementations.
//!
//! This module provides a mock [`Transport`](crate::transport::Transport) so
//! agent behavior can be exercised without reaching the provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use pickport_core::{testing::{fixtures, MockTransport}, Agent};
//!
//! let transport = MockTransport::new();
//! transport.set_json("/files/download", fixtures::download_ok("https://x/y", "a.mp4", "10")).await;
//! transport.add_cookie("x", "SESS", "tok").await;
//!
//! let agent = Agent::new(transport.clone(), "agent");
//! let ticket = agent.create_download_ticket("abc123").await?;
//! ```

mod mock_transport;

pub use mock_transport::{MockTransport, RecordedCall};

/// JSON fixtures shaped like the provider's answers.
pub mod fixtures {
    use serde_json::{json, Value};

    /// Successful download info answer.
    pub fn download_ok(url: &str, file_name: &str, file_size: &str) -> Value {
        json!({
            "state": true,
            "msg": "",
            "msg_code": 0,
            "file_id": "2593093001609739968",
            "file_name": file_name,
            "file_size": file_size,
            "file_url": url,
            "pickcode": "abc123"
        })
    }

    /// Failed download info answer.
    pub fn download_failed(code: i64, message: &str) -> Value {
        json!({
            "state": false,
            "msg": message,
            "msg_code": code,
            "file_size": ""
        })
    }

    /// Successful video info answer with the given transcoding status.
    pub fn video_ok(video_url: &str, file_status: i64) -> Value {
        json!({
            "state": true,
            "errcode": 0,
            "error": "",
            "file_status": file_status,
            "file_name": "movie.mkv",
            "video_url": video_url
        })
    }

    /// Failed video info answer.
    pub fn video_failed(code: i64, message: &str) -> Value {
        json!({
            "state": false,
            "errcode": code,
            "error": message,
            "file_status": 0
        })
    }

    /// A minimal HLS playlist.
    pub fn hls_manifest() -> Vec<u8> {
        b"#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-STREAM-INF:BANDWIDTH=1500000\nhttps://x/1080.m3u8\n"
            .to_vec()
    }
}
