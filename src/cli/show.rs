use anyhow::{Context, Result};

use crate::api::{GalleryClient, Image};
use crate::config::ClientConfig;
use crate::metadata::{parse_metadata, MetadataEntry};

use super::block_on_with_spinner;

/// An image with its metadata normalized for display
#[derive(Debug, Clone)]
pub struct ImageDetails {
    pub image: Image,
    pub entries: Vec<MetadataEntry>,
}

/// Fetch a single image and parse its metadata
pub fn run_show(config: &ClientConfig, id: i64) -> Result<ImageDetails> {
    let client = GalleryClient::new(config);
    let image = block_on_with_spinner("Fetching image...", client.get_image(id))?
        .map_err(|e| {
            if e.is_not_found() {
                anyhow::anyhow!("Image {} not found", id)
            } else {
                anyhow::Error::new(e)
            }
        })
        .with_context(|| format!("Failed to fetch image {}", id))?;

    let entries = image
        .metadata
        .as_ref()
        .map(parse_metadata)
        .unwrap_or_default();

    Ok(ImageDetails { image, entries })
}
