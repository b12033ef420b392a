mod config;
mod delete;
mod list;
mod scan;
mod show;

pub use config::{run_config_get, run_config_set};
pub use delete::run_delete;
pub use list::{run_list, ListOptions};
pub use scan::run_scan;
pub use show::{run_show, ImageDetails};

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

/// Run one request on a throwaway runtime, with a spinner on stderr meanwhile.
fn block_on_with_spinner<F: Future>(message: &str, future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message.to_string());

    let output = rt.block_on(future);
    spinner.finish_and_clear();
    Ok(output)
}
