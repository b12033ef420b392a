use std::time::Instant;

use tracing::{debug, warn};

use crate::api::{ApiError, Image};
use crate::gallery::RequestToken;
use crate::tui::clipboard::copy_to_clipboard;
use crate::tui::worker::WorkerRequest;

use super::{AppState, DetailViewState};

impl AppState {
    /// Open the detail view for the card at `index`, moving the cursor there.
    pub fn open_detail_at(&mut self, index: usize) {
        let Some(id) = self.gallery.image(index).map(|image| image.no) else {
            return;
        };
        self.select_index(index);
        let request = self.gallery.open_detail(id);
        self.detail = Some(DetailViewState::loading(id));
        self.force_redraw = true;
        self.send(WorkerRequest::Detail(request));
    }

    fn detail_index(&self) -> Option<usize> {
        let id = self.detail.as_ref()?.image_id;
        self.gallery.index_of(id)
    }

    pub fn detail_next(&mut self) {
        if let Some(index) = self.detail_index() {
            if index + 1 < self.gallery.images().len() {
                self.open_detail_at(index + 1);
            }
        }
    }

    pub fn detail_prev(&mut self) {
        if let Some(index) = self.detail_index() {
            if index > 0 {
                self.open_detail_at(index - 1);
            }
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.gallery.cancel_detail();
        self.force_redraw = true;
    }

    /// Copy the focused long entry (prompt, negative prompt, ...) to the clipboard.
    pub fn copy_focused_entry(&mut self) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let Some(value) = detail.focused_entry().map(|entry| entry.value.clone()) else {
            return;
        };
        match copy_to_clipboard(&value) {
            Ok(()) => detail.mark_copied(Instant::now()),
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                self.status_message = Some(format!("Copy failed: {}", e));
            }
        }
    }

    pub(super) fn on_detail(
        &mut self,
        token: RequestToken,
        id: i64,
        result: Result<Image, ApiError>,
    ) {
        if !self.gallery.accept_detail(token) {
            debug!(id, "dropping stale detail response");
            return;
        }

        match result {
            Ok(image) => {
                if let Some(detail) = self.detail.as_mut().filter(|d| d.image_id == id) {
                    detail.show(image);
                }
            }
            Err(e) => {
                warn!(id, error = %e, "failed to load image details");
                self.close_detail();
                self.show_alert("Failed to load image", e.detail());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use crate::api::ApiError;
    use crate::gallery::RequestToken;
    use crate::tui::worker::{WorkerEvent, WorkerRequest};

    fn detail_token(requests: &std::sync::mpsc::Receiver<WorkerRequest>) -> RequestToken {
        match drain(requests).as_slice() {
            [WorkerRequest::Detail(req)] => req.token,
            other => panic!("unexpected requests: {:?}", other),
        }
    }

    fn with_prompt(no: i64, prompt: &str) -> crate::api::Image {
        let mut img = image(no);
        let metadata = serde_json::json!({ "prompt": prompt, "Model": "nai-v3" });
        img.metadata = metadata.as_object().cloned();
        img
    }

    #[test]
    fn test_detail_response_fills_view() {
        let (mut state, requests, _events) = loaded_app_state(1);
        state.open_detail_at(1);
        let token = detail_token(&requests);

        state.apply_event(WorkerEvent::Detail {
            token,
            id: 2,
            result: Ok(with_prompt(2, "1girl, solo")),
        });

        let detail = state.detail.as_ref().unwrap();
        assert!(!detail.is_loading());
        assert_eq!(detail.focused_entry().unwrap().value, "1girl, solo");
        assert_eq!(detail.short_entries().count(), 1);
    }

    #[test]
    fn test_stale_detail_is_ignored() {
        let (mut state, requests, _events) = loaded_app_state(1);
        state.open_detail_at(1);
        let first = detail_token(&requests);
        state.detail_next();
        let second = detail_token(&requests);

        state.apply_event(WorkerEvent::Detail {
            token: first,
            id: 2,
            result: Ok(with_prompt(2, "old")),
        });
        let detail = state.detail.as_ref().unwrap();
        assert_eq!(detail.image_id, 3);
        assert!(detail.is_loading());

        state.apply_event(WorkerEvent::Detail {
            token: second,
            id: 3,
            result: Ok(with_prompt(3, "new")),
        });
        assert_eq!(
            state.detail.as_ref().unwrap().focused_entry().unwrap().value,
            "new"
        );
    }

    #[test]
    fn test_closed_detail_ignores_late_response() {
        let (mut state, requests, _events) = loaded_app_state(1);
        state.open_detail_at(0);
        let token = detail_token(&requests);
        state.close_detail();

        state.apply_event(WorkerEvent::Detail {
            token,
            id: 1,
            result: Ok(with_prompt(1, "late")),
        });
        assert!(state.detail.is_none());
    }

    #[test]
    fn test_detail_failure_alerts() {
        let (mut state, requests, _events) = loaded_app_state(1);
        state.open_detail_at(0);
        let token = detail_token(&requests);

        state.apply_event(WorkerEvent::Detail {
            token,
            id: 1,
            result: Err(ApiError::NotFound {
                detail: Some("Image not found".to_string()),
            }),
        });
        assert!(state.detail.is_none());
        assert_eq!(state.alert.as_ref().unwrap().message, "Image not found");
    }

    #[test]
    fn test_prev_next_stop_at_ends() {
        let (mut state, requests, _events) = loaded_app_state(1);
        state.open_detail_at(0);
        state.detail_prev();
        assert_eq!(state.detail.as_ref().unwrap().image_id, 1);
        state.open_detail_at(9);
        state.detail_next();
        assert_eq!(state.detail.as_ref().unwrap().image_id, 10);
        assert_eq!(state.selected_index, 9);
        drain(&requests);
    }
}
