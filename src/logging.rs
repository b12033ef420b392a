//! Logging for sdgallery.
//!
//! Every run appends to `sdgallery.log` in the user cache directory
//! (`~/.cache/sdgallery/` on Linux), or in `SDGALLERY_LOG_DIR` when set.
//! `SDGALLERY_LOG` takes an `EnvFilter` directive and also mirrors output to
//! stderr, which is useful for subcommands but not while the TUI is drawing.
//!
//! ```bash
//! # Request/response details for one command
//! SDGALLERY_LOG=debug sdgallery show 12
//!
//! # Include the HTTP stack
//! SDGALLERY_LOG=sdgallery=trace,reqwest=debug sdgallery list
//!
//! # Follow the TUI from another terminal
//! tail -f ~/.cache/sdgallery/sdgallery.log
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

pub const LOG_ENV: &str = "SDGALLERY_LOG";
pub const LOG_DIR_ENV: &str = "SDGALLERY_LOG_DIR";

const LOG_FILE_NAME: &str = "sdgallery.log";

/// This crate at info, the HTTP stack only when it complains.
const DEFAULT_FILTER: &str = "sdgallery=info,reqwest=warn,hyper=warn,hyper_util=warn";

/// Directory holding the log file.
pub fn log_dir() -> Option<PathBuf> {
    match std::env::var_os(LOG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => directories::ProjectDirs::from("", "", "sdgallery")
            .map(|dirs| dirs.cache_dir().to_path_buf()),
    }
}

/// Full path of the log file, shown in the TUI help overlay.
pub fn log_file_path() -> Option<PathBuf> {
    log_dir().map(|dir| dir.join(LOG_FILE_NAME))
}

fn filter_directive(from_env: Option<String>) -> String {
    from_env
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_logging() -> Result<WorkerGuard> {
    let dir = log_dir().context("Failed to determine log directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let path = dir.join(LOG_FILE_NAME);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let from_env = std::env::var(LOG_ENV).ok();
    let mirror_to_stderr = from_env.is_some();
    let filter = EnvFilter::try_new(filter_directive(from_env))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // API calls are #[instrument]ed, so span close lines carry their duration
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    let stderr_layer = mirror_to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to set global tracing subscriber")?;

    Ok(guard)
}
