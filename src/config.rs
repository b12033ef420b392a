//! Client configuration.
//!
//! Settings come from command-line flags with environment fallbacks
//! (`SDGALLERY_SERVER`, `SDGALLERY_PAGE_SIZE`). This is separate from the
//! server-side source/destination configuration edited in the settings dialog.

use anyhow::{bail, Context, Result};
use reqwest::Url;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Where the gallery server lives and how much to request per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server: Url,
    pub page_size: u32,
}

impl ClientConfig {
    pub fn new(server: &str, page_size: u32) -> Result<Self> {
        let server = Url::parse(server.trim())
            .with_context(|| format!("Invalid server URL: {}", server))?;
        if !matches!(server.scheme(), "http" | "https") {
            bail!("Server URL must use http or https: {}", server);
        }
        if page_size == 0 {
            bail!("Page size must be at least 1");
        }
        Ok(Self { server, page_size })
    }

    /// Server root without a trailing slash, for joining API paths.
    pub fn base_url(&self) -> String {
        self.server.as_str().trim_end_matches('/').to_string()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: Url::parse(DEFAULT_SERVER).expect("default server URL is valid"),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
