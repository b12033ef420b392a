use std::collections::BTreeSet;

use anyhow::Result;
use tracing::info;

use crate::api::GalleryClient;
use crate::config::ClientConfig;

use super::block_on_with_spinner;

/// Delete a batch of images by id. Duplicate ids are sent once.
pub fn run_delete(config: &ClientConfig, ids: &[i64]) -> Result<String> {
    let ids: Vec<i64> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
    if ids.is_empty() {
        anyhow::bail!("No image ids given");
    }

    let client = GalleryClient::new(config);
    let reply = block_on_with_spinner("Deleting images...", client.delete_images(&ids))?
        .map_err(|e| anyhow::anyhow!("Failed to delete images: {}", e.detail()))?;
    info!(count = ids.len(), message = %reply.message, "batch delete finished");
    Ok(reply.message)
}
