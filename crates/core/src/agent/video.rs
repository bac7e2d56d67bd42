use tracing::{debug, warn};

use crate::transport::{video_query, Transport};

use super::interpret::interpret_video;
use super::{Agent, AgentError, VIDEO_PATH};

impl<T: Transport> Agent<T> {
    /// Get the HLS manifest of a video.
    ///
    /// The manifest is returned as the provider serves it and can be piped to
    /// a player such as `mpv -`. A video that is still transcoding fails with
    /// [`AgentError::VideoNotReady`]; callers that want to wait must call
    /// again later.
    pub async fn video_hls_content(&self, pickcode: &str) -> Result<Vec<u8>, AgentError> {
        let endpoint = self.endpoint(VIDEO_PATH);
        let query = video_query(pickcode);

        debug!("Requesting video info: pickcode={}", pickcode);

        let value = self.transport.call_json(&endpoint, &query, None).await?;
        let info = interpret_video(value).map_err(|e| {
            warn!("Video info failed for pickcode={}: {}", pickcode, e);
            e
        })?;

        let content = self.transport.get_raw(&info.video_url, &[]).await?;
        debug!("Fetched HLS manifest: {} bytes", content.len());

        Ok(content)
    }
}
