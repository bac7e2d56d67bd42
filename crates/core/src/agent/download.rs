use chrono::Utc;
use tracing::{debug, warn};

use crate::transport::{download_query, Transport};

use super::interpret::interpret_download;
use super::ticket::{assemble_ticket, DownloadTicket};
use super::{Agent, AgentError, DOWNLOAD_PATH};

impl<T: Transport> Agent<T> {
    /// Create a download ticket for a file.
    ///
    /// The agent never downloads file content itself. Hand the ticket to a
    /// separate tool (curl, wget, aria2) together with its headers.
    ///
    /// Every call queries the provider again; tickets are not cached.
    ///
    /// # Panics
    ///
    /// Panics if the provider reports success with a file size that is not a
    /// non-negative integer.
    pub async fn create_download_ticket(
        &self,
        pickcode: &str,
    ) -> Result<DownloadTicket, AgentError> {
        let endpoint = self.endpoint(DOWNLOAD_PATH);
        let query = download_query(pickcode, Utc::now().timestamp());

        debug!("Requesting download info: pickcode={}", pickcode);

        let value = self.transport.call_json(&endpoint, &query, None).await?;
        let info = interpret_download(value).map_err(|e| {
            warn!("Download info failed for pickcode={}: {}", pickcode, e);
            e
        })?;

        let cookies = self.transport.cookies_for(&info.url).await;
        debug!(
            "Assembling download ticket: file={}, size={}, cookies={}",
            info.file_name,
            info.file_size,
            cookies.len()
        );

        Ok(assemble_ticket(info, &self.name, &cookies))
    }
}
