use tracing::info;

use crate::api::{ApiError, MessageResponse};
use crate::gallery::{Activation, DeleteOutcome, RequestToken, ToggleOutcome};
use crate::tui::worker::WorkerRequest;

use super::{AppState, ConfirmAction, ConfirmDialog, DetailViewState};

impl AppState {
    /// The mode-toggle control: Select, Cancel or Delete (n).
    pub fn toggle_mode(&mut self) {
        match self.gallery.toggle_mode() {
            ToggleOutcome::Entered => {
                self.status_message =
                    Some("Select images with Space, then press v to delete".to_string());
            }
            ToggleOutcome::Cancelled => {}
            ToggleOutcome::ConfirmDelete(ids) => {
                self.confirm = Some(ConfirmDialog::delete(ids));
            }
            ToggleOutcome::Busy => {
                self.status_message = Some("Delete in progress...".to_string());
            }
        }
    }

    pub fn exit_selection(&mut self) {
        self.gallery.exit_selection();
    }

    pub fn activate_selected(&mut self) {
        if let Some(id) = self.selected_image().map(|image| image.no) {
            self.activate(id);
        }
    }

    /// Toggle the card while selecting, otherwise open its detail view.
    pub fn activate(&mut self, id: i64) {
        match self.gallery.activate(id) {
            Activation::Toggled { .. } => {}
            Activation::OpenDetail(request) => {
                self.detail = Some(DetailViewState::loading(request.id));
                self.send(WorkerRequest::Detail(request));
            }
        }
    }

    pub fn accept_confirm(&mut self) {
        let Some(dialog) = self.confirm.take() else {
            return;
        };
        self.force_redraw = true;

        match dialog.action {
            ConfirmAction::DeleteSelected(_) => {
                if let Some(batch) = self.gallery.begin_delete() {
                    info!(count = batch.ids.len(), "deleting images");
                    self.status_message = Some(format!("Deleting {} images...", batch.ids.len()));
                    self.send(WorkerRequest::Delete(batch));
                }
            }
            ConfirmAction::Scan => {
                self.status_message = Some("Starting scan...".to_string());
                self.send(WorkerRequest::Scan);
            }
        }
    }

    pub fn dismiss_confirm(&mut self) {
        self.confirm = None;
        self.force_redraw = true;
    }

    pub(super) fn on_deleted(
        &mut self,
        token: RequestToken,
        result: Result<MessageResponse, ApiError>,
    ) {
        match self.gallery.apply_delete(token, result) {
            DeleteOutcome::Deleted { message, reload } => {
                self.status_message = Some(message);
                self.send_list(reload);
            }
            DeleteOutcome::Failed(detail) => {
                self.status_message = None;
                self.show_alert("Delete failed", detail);
            }
            DeleteOutcome::Ignored => {}
        }
    }
}
