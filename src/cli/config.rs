use anyhow::{Context, Result};

use crate::api::{Config, GalleryClient};
use crate::config::ClientConfig;

use super::block_on_with_spinner;

/// Read the server's source/destination configuration.
/// Returns `None` when the server has not been configured yet.
pub fn run_config_get(config: &ClientConfig) -> Result<Option<Config>> {
    let client = GalleryClient::new(config);
    match block_on_with_spinner("Fetching configuration...", client.get_config())? {
        Ok(server_config) => Ok(Some(server_config)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e).context("Failed to fetch server configuration"),
    }
}

/// Save the server's source/destination configuration.
pub fn run_config_set(config: &ClientConfig, source: &str, dest: &str) -> Result<String> {
    let source = source.trim();
    let dest = dest.trim();
    if source.is_empty() || dest.is_empty() {
        anyhow::bail!("Both source and destination paths are required");
    }

    let client = GalleryClient::new(config);
    let server_config = Config {
        image_file_path: source.to_string(),
        des_file_path: dest.to_string(),
    };
    let reply = block_on_with_spinner(
        "Saving configuration...",
        client.save_config(&server_config),
    )?
    .map_err(|e| anyhow::anyhow!("Failed to save settings: {}", e.detail()))?;
    Ok(reply.message)
}
