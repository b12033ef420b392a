mod app;
mod clipboard;
pub mod colors;
pub mod dialogs;
mod mouse;
pub mod state;
pub mod thumbnail_cache;
mod ui;
pub mod widgets;
pub mod worker;

pub use app::run_tui;
pub use worker::{ApiWorker, WorkerEvent, WorkerRequest};
