use tracing::{info, warn};

use crate::api::{ApiError, Config, MessageResponse};
use crate::tui::worker::WorkerRequest;

use super::{AppState, ConfirmDialog, SettingsDialogState};

impl AppState {
    pub fn open_settings(&mut self, first_run: bool) {
        self.settings = Some(SettingsDialogState::new(self.server_config.as_ref(), first_run));
    }

    pub fn close_settings(&mut self) {
        self.settings = None;
        self.force_redraw = true;
    }

    pub fn submit_settings(&mut self) {
        let Some(dialog) = self.settings.as_mut() else {
            return;
        };
        if dialog.saving {
            return;
        }
        match dialog.to_config() {
            Ok(config) => {
                dialog.saving = true;
                dialog.error = None;
                self.send(WorkerRequest::SaveConfig(config));
            }
            Err(message) => dialog.error = Some(message),
        }
    }

    /// Ask before starting a server-side scan.
    pub fn request_scan(&mut self) {
        self.confirm = Some(ConfirmDialog::scan());
    }

    pub(super) fn on_config_loaded(&mut self, result: Result<Config, ApiError>) {
        match result {
            Ok(config) => {
                info!(source = %config.image_file_path, "server configuration loaded");
                self.server_config = Some(config);
                self.run_search(String::new());
            }
            Err(e) if e.is_not_found() => {
                info!("server has no configuration yet");
                self.gallery.mark_unconfigured();
                self.open_settings(true);
            }
            Err(e) => {
                warn!(error = %e, "failed to load server configuration");
                self.status_message = Some(format!("Could not load settings: {}", e.detail()));
                self.run_search(String::new());
            }
        }
    }

    pub(super) fn on_config_saved(
        &mut self,
        config: Config,
        result: Result<MessageResponse, ApiError>,
    ) {
        match result {
            Ok(response) => {
                info!(
                    source = %config.image_file_path,
                    dest = %config.des_file_path,
                    "settings saved"
                );
                self.server_config = Some(config);
                self.close_settings();
                self.status_message = Some(if response.message.is_empty() {
                    "Settings saved".to_string()
                } else {
                    response.message
                });
                self.reload();
            }
            Err(e) => {
                warn!(error = %e, "failed to save settings");
                if let Some(dialog) = self.settings.as_mut() {
                    dialog.saving = false;
                }
                self.show_alert("Failed to save settings", e.detail());
            }
        }
    }

    pub(super) fn on_scan_started(&mut self, result: Result<MessageResponse, ApiError>) {
        self.status_message = None;
        match result {
            Ok(response) => {
                let message = if response.message.is_empty() {
                    "Image scan started in the background.".to_string()
                } else {
                    response.message
                };
                self.show_alert("Scan", message);
            }
            Err(e) => {
                warn!(error = %e, "failed to start scan");
                self.show_alert("Scan failed", e.detail());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::super::{ConfirmAction, SettingsField};
    use crate::api::{ApiError, MessageResponse};
    use crate::gallery::GridView;
    use crate::tui::worker::{WorkerEvent, WorkerRequest};

    #[test]
    fn test_unconfigured_server_opens_first_run_settings() {
        let (mut state, requests, _events) = create_test_app_state();
        state.apply_event(WorkerEvent::ConfigLoaded(Err(ApiError::NotFound {
            detail: Some("Configuration not found. Please set it up.".to_string()),
        })));

        assert_eq!(state.gallery.view(), GridView::Unconfigured);
        let dialog = state.settings.as_ref().unwrap();
        assert!(dialog.first_run);
        assert!(dialog.source.value.is_empty());
        assert!(drain(&requests).is_empty());
    }

    #[test]
    fn test_config_and_list_failures_end_loading() {
        let (mut state, requests, _events) = create_test_app_state();
        let unreachable = || ApiError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            detail: Some("upstream down".to_string()),
        };
        state.apply_event(WorkerEvent::ConfigLoaded(Err(unreachable())));
        let token = match drain(&requests).as_slice() {
            [WorkerRequest::List(req)] => req.token,
            other => panic!("unexpected requests: {:?}", other),
        };

        state.apply_event(WorkerEvent::Listed {
            token,
            result: Err(unreachable()),
        });
        assert_eq!(state.gallery.view(), GridView::Failed);
        assert!(!state.gallery.is_loading());
    }

    #[test]
    fn test_blank_fields_are_not_sent() {
        let (mut state, requests, _events) = create_test_app_state();
        state.open_settings(true);
        state.submit_settings();
        assert!(state.settings.as_ref().unwrap().error.is_some());
        assert!(drain(&requests).is_empty());
    }

    #[test]
    fn test_save_then_reload() {
        let (mut state, requests, _events) = create_test_app_state();
        state.open_settings(true);
        let dialog = state.settings.as_mut().unwrap();
        for c in "/src".chars() {
            dialog.focused_input().insert_char(c);
        }
        dialog.toggle_focus();
        assert_eq!(dialog.focus, SettingsField::Destination);
        for c in "/dest".chars() {
            dialog.focused_input().insert_char(c);
        }
        state.submit_settings();

        let saved = match drain(&requests).as_slice() {
            [WorkerRequest::SaveConfig(config)] => config.clone(),
            other => panic!("unexpected requests: {:?}", other),
        };
        assert_eq!(saved, config());

        // A second Enter while saving is ignored
        state.submit_settings();
        assert!(drain(&requests).is_empty());

        state.apply_event(WorkerEvent::ConfigSaved {
            config: saved,
            result: Ok(MessageResponse {
                message: "Configuration saved.".to_string(),
            }),
        });
        assert!(state.settings.is_none());
        assert_eq!(state.server_config, Some(config()));
        match drain(&requests).as_slice() {
            [WorkerRequest::List(req)] => assert_eq!(req.page, 1),
            other => panic!("unexpected requests: {:?}", other),
        }
    }

    #[test]
    fn test_save_failure_keeps_dialog_open() {
        let (mut state, _requests, _events) = create_test_app_state();
        state.open_settings(false);
        state.apply_event(WorkerEvent::ConfigSaved {
            config: config(),
            result: Err(ApiError::Status {
                status: reqwest::StatusCode::BAD_REQUEST,
                detail: Some("Source path not found: /src".to_string()),
            }),
        });
        assert!(state.settings.is_some());
        assert_eq!(
            state.alert.as_ref().unwrap().message,
            "Source path not found: /src"
        );
    }

    #[test]
    fn test_scan_requires_confirmation() {
        let (mut state, requests, _events) = loaded_app_state(1);
        state.request_scan();
        assert!(drain(&requests).is_empty());
        assert_eq!(
            state.confirm.as_ref().map(|c| c.action.clone()),
            Some(ConfirmAction::Scan)
        );

        state.accept_confirm();
        assert!(matches!(drain(&requests).as_slice(), [WorkerRequest::Scan]));

        state.apply_event(WorkerEvent::ScanStarted(Ok(MessageResponse {
            message: "Image scan started in the background.".to_string(),
        })));
        assert_eq!(state.alert.as_ref().unwrap().title, "Scan");
    }
}
