use ratatui::{layout::Rect, prelude::*, widgets::Paragraph};

use crate::tui::colors::{STATUS_BAR_BG, STATUS_BAR_FG};
use crate::tui::state::AppState;

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts = Vec::new();

    if let Some(ref message) = state.status_message {
        parts.push(message.clone());
    } else {
        let pagination = state.gallery.pagination();
        parts.push(format!(
            "Page {}/{}",
            pagination.page,
            state.total_pages.max(pagination.page)
        ));
        parts.push(format!("{} loaded", state.gallery.images().len()));
        if state.gallery.is_loading() {
            parts.push("loading...".to_string());
        } else if !state.gallery.has_more() && !state.gallery.images().is_empty() {
            parts.push("end".to_string());
        }
        let mode = state.gallery.mode();
        if mode.is_selecting() {
            parts.push(format!("SELECT {}", mode.selected_count()));
        }
        if state.gallery.is_deleting() {
            parts.push("deleting...".to_string());
        }
        parts.push(state.server_label.clone());
    }

    let hints = if state.gallery.mode().is_selecting() {
        "Space:pick  v:delete  Esc:cancel  ?:help"
    } else {
        "/:search  Enter:open  v:select  ?:help  q:quit"
    };

    let left_part = parts.join(" | ");
    let width = (area.width as usize).saturating_sub(hints.len());
    let status_text = format!("{:width$}{}", left_part, hints, width = width);

    let status = Paragraph::new(status_text)
        .style(Style::default().bg(STATUS_BAR_BG).fg(STATUS_BAR_FG));

    frame.render_widget(status, area);
}
