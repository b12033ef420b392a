use anyhow::{Context, Result};
use tracing::info;

use crate::api::{GalleryClient, PageResponse};
use crate::config::ClientConfig;
use crate::gallery::Query;

use super::block_on_with_spinner;

/// Options for a single list request
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub page: u32,
    pub query: Query,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            query: Query::default(),
        }
    }
}

/// Fetch one page of images matching the options
pub fn run_list(config: &ClientConfig, options: ListOptions) -> Result<PageResponse> {
    if options.page == 0 {
        anyhow::bail!("Pages start at 1");
    }

    let client = GalleryClient::new(config);
    let page = block_on_with_spinner(
        "Fetching images...",
        client.list_images(options.page, &options.query),
    )?
    .with_context(|| format!("Failed to list images from {}", config.server))?;

    info!(
        page = page.page,
        total_pages = page.total_pages,
        images = page.images.len(),
        "listed images"
    );
    Ok(page)
}
