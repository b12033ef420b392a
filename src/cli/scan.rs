use anyhow::Result;
use tracing::info;

use crate::api::GalleryClient;
use crate::config::ClientConfig;

use super::block_on_with_spinner;

/// Ask the server to start a background scan of the source directory
pub fn run_scan(config: &ClientConfig) -> Result<String> {
    let client = GalleryClient::new(config);
    let reply = block_on_with_spinner("Starting scan...", client.trigger_scan())?
        .map_err(|e| anyhow::anyhow!("Failed to start scan: {}", e.detail()))?;
    info!(message = %reply.message, "scan started");
    Ok(reply.message)
}
