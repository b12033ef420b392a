mod detail;
mod navigation;
mod search;
mod selection;
mod settings;
mod thumbnails;

use ratatui::layout::Rect;
use ratatui::widgets::TableState;
use tracing::{debug, warn};

use crate::api::{ApiError, Config, Image, PageResponse};
use crate::gallery::{
    GalleryState, ListOutcome, ListRequest, PlatformFilter, RequestToken, SortMode,
};
use crate::tui::worker::{ApiWorker, WorkerEvent, WorkerRequest};

pub use super::dialogs::{
    AlertDialog, ConfirmAction, ConfirmDialog, DetailViewState, SearchBarState, SettingsDialogState,
    SettingsField, TextInput,
};
pub use super::thumbnail_cache::{ProtocolCache, ThumbnailCache};

/// Request the next page once the cursor is this close to the last loaded card.
pub const LOAD_MORE_THRESHOLD: usize = 5;

/// Decoded thumbnails kept for drawing.
const THUMBNAIL_CACHE_SIZE: usize = 64;

/// Main application state
pub struct AppState {
    pub gallery: GalleryState,
    pub worker: ApiWorker,
    /// Base URL shown in the status bar
    pub server_label: String,
    /// Last configuration read from or saved to the server
    pub server_config: Option<Config>,
    pub selected_index: usize,
    pub table_state: TableState,
    pub search: SearchBarState,
    pub sort: SortMode,
    pub platform: PlatformFilter,
    /// `total_pages` of the last applied list response
    pub total_pages: u32,
    pub settings: Option<SettingsDialogState>,
    pub confirm: Option<ConfirmDialog>,
    pub alert: Option<AlertDialog>,
    pub detail: Option<DetailViewState>,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub thumbnails: ProtocolCache,
    // Layout areas for mouse hit-testing (updated each render)
    pub grid_area: Rect,
    pub toggle_area: Rect,
    /// Force a full terminal clear on next frame (e.g. after closing overlays
    /// that sat on top of image protocol content)
    pub force_redraw: bool,
}

impl AppState {
    pub fn new(worker: ApiWorker, server_label: String) -> Self {
        Self {
            gallery: GalleryState::new(),
            worker,
            server_label,
            server_config: None,
            selected_index: 0,
            table_state: TableState::default(),
            search: SearchBarState::default(),
            sort: SortMode::default(),
            platform: PlatformFilter::default(),
            total_pages: 0,
            settings: None,
            confirm: None,
            alert: None,
            detail: None,
            show_help: false,
            status_message: None,
            thumbnails: ProtocolCache::new(THUMBNAIL_CACHE_SIZE),
            grid_area: Rect::default(),
            toggle_area: Rect::default(),
            force_redraw: false,
        }
    }

    /// Ask the server for its configuration; the first search follows.
    pub fn start(&mut self) {
        self.send(WorkerRequest::LoadConfig);
    }

    pub fn send(&self, request: WorkerRequest) {
        if !self.worker.send(request) {
            warn!("api worker is gone, request dropped");
        }
    }

    fn send_list(&self, request: Option<ListRequest>) {
        if let Some(request) = request {
            self.send(WorkerRequest::List(request));
        }
    }

    /// Apply every finished request.
    pub fn poll_worker(&mut self) {
        for event in self.worker.poll_events() {
            self.apply_event(event);
        }
    }

    pub fn apply_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::ConfigLoaded(result) => self.on_config_loaded(result),
            WorkerEvent::ConfigSaved { config, result } => self.on_config_saved(config, result),
            WorkerEvent::ScanStarted(result) => self.on_scan_started(result),
            WorkerEvent::Listed { token, result } => self.on_listed(token, result),
            WorkerEvent::Detail { token, id, result } => self.on_detail(token, id, result),
            WorkerEvent::Deleted { token, result } => self.on_deleted(token, result),
            WorkerEvent::Thumbnail { id, image } => self.on_thumbnail(id, image),
        }
    }

    fn on_listed(&mut self, token: RequestToken, result: Result<PageResponse, ApiError>) {
        let total_pages = result.as_ref().ok().map(|page| page.total_pages);
        let (outcome, follow_up) = self.gallery.apply_list(token, result);
        debug!(?outcome, "list response applied");

        match outcome {
            ListOutcome::Replaced(_) | ListOutcome::NoResults => {
                self.total_pages = total_pages.unwrap_or_default();
                self.select_index(0);
            }
            ListOutcome::Appended(_) => {
                self.total_pages = total_pages.unwrap_or(self.total_pages);
            }
            ListOutcome::Unconfigured => {
                if self.settings.is_none() {
                    self.open_settings(true);
                }
            }
            ListOutcome::Failed(detail) => {
                self.status_message = Some(format!("Failed to load images: {}", detail));
            }
            ListOutcome::Ignored => {}
        }

        self.send_list(follow_up);
    }

    pub fn show_alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.alert = Some(AlertDialog::new(title, message));
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.force_redraw = true;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if !self.show_help {
            self.force_redraw = true;
        }
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// The image under the cursor.
    pub fn selected_image(&self) -> Option<&Image> {
        self.gallery.image(self.selected_index)
    }

    /// Any modal that captures input is open.
    pub fn has_overlay(&self) -> bool {
        self.alert.is_some()
            || self.confirm.is_some()
            || self.settings.is_some()
            || self.detail.is_some()
            || self.show_help
    }
}


#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::api::ApiError;
    use crate::gallery::GridView;

    #[test]
    fn test_startup_loads_config() {
        let (mut state, requests, _events) = create_test_app_state();
        state.start();
        assert!(matches!(drain(&requests).as_slice(), [WorkerRequest::LoadConfig]));
    }

    #[test]
    fn test_first_page_selects_first_card() {
        let (state, _requests, _events) = loaded_app_state(3);
        assert_eq!(state.gallery.images().len(), 10);
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.table_state.selected(), Some(0));
        assert_eq!(state.total_pages, 3);
    }

    #[test]
    fn test_events_arrive_through_worker_channel() {
        let (mut state, requests, events) = create_test_app_state();
        events
            .send(WorkerEvent::ConfigLoaded(Ok(config())))
            .unwrap();
        state.poll_worker();
        assert_eq!(state.server_config, Some(config()));
        assert!(matches!(drain(&requests).as_slice(), [WorkerRequest::List(_)]));
    }

    #[test]
    fn test_list_failure_keeps_grid_and_reports() {
        let (mut state, requests, _events) = loaded_app_state(3);
        state.move_to_bottom();
        let token = match drain(&requests).pop() {
            Some(WorkerRequest::List(req)) => req.token,
            other => panic!("expected list request, got {:?}", other),
        };
        state.apply_event(WorkerEvent::Listed {
            token,
            result: Err(ApiError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
                detail: Some("upstream down".to_string()),
            }),
        });
        assert_eq!(state.gallery.images().len(), 10);
        assert_eq!(state.gallery.view(), GridView::Cards);
        assert_eq!(
            state.status_message.as_deref(),
            Some("Failed to load images: upstream down")
        );
    }

    #[test]
    fn test_page_one_not_found_opens_settings() {
        let (mut state, requests, _events) = create_test_app_state();
        state.apply_event(WorkerEvent::ConfigLoaded(Err(ApiError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            detail: None,
        })));
        let token = match drain(&requests).pop() {
            Some(WorkerRequest::List(req)) => req.token,
            other => panic!("expected list request, got {:?}", other),
        };
        state.apply_event(WorkerEvent::Listed {
            token,
            result: Err(ApiError::NotFound { detail: None }),
        });
        assert_eq!(state.gallery.view(), GridView::Unconfigured);
        assert!(state.settings.as_ref().is_some_and(|s| s.first_run));
    }
}
