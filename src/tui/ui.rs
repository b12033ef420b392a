use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::logging::log_file_path;

use super::colors::HELP_TEXT;
use super::state::AppState;
use super::widgets::{
    centered_rect, render_alert, render_confirm_dialog, render_detail_view, render_gallery_grid,
    render_preview, render_search_bar, render_settings_dialog, render_status_bar,
};

/// Main render function
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let size = frame.area();

    // Main layout: search bar on top, status bar at bottom, content between
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    let search_area = main_chunks[0];
    let content_area = main_chunks[1];
    let status_area = main_chunks[2];

    // Split content: grid | preview
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(content_area);

    let grid_area = content_chunks[0];
    let preview_area = content_chunks[1];

    // Save layout rects for mouse hit-testing
    state.grid_area = grid_area;

    render_search_bar(frame, search_area, state);
    render_gallery_grid(frame, grid_area, state);
    if state.detail.is_none() {
        render_preview(frame, preview_area, state);
    }
    render_status_bar(frame, status_area, state);

    if let Some(ref detail) = state.detail {
        render_detail_view(frame, size, detail, &mut state.thumbnails);
    }

    if let Some(ref settings) = state.settings {
        render_settings_dialog(frame, size, settings);
    }

    if let Some(ref confirm) = state.confirm {
        render_confirm_dialog(frame, size, confirm);
    }

    if let Some(ref alert) = state.alert {
        render_alert(frame, size, alert);
    }

    if state.show_help {
        render_help_overlay(frame, size);
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = r#"
  Key Bindings

  Gallery:
    j/↓  k/↑   Move down / up
    PgDn PgUp  Move a screen
    g/G        First / last card
    Enter      Open details (toggle while selecting)
    Space      Toggle card while selecting
    /          Search
    s          Cycle sort order
    p          Cycle platform filter
    v          Select / Cancel / Delete (n)
    Esc        Leave selection mode
    r          Reload
    S          Scan source directory
    c          Settings
    ?          Toggle help
    q          Quit

  Details:
    ←/→        Previous / next image
    Tab        Focus next long field
    y          Copy focused field
    j/k        Scroll

  Mouse:
    Click        Select card (toggle while selecting)
    Double-click Open details
    Scroll wheel Move selection / scroll details
"#;

    let log_hint = log_file_path()
        .map(|path| format!("  Log: {}", path.display()))
        .unwrap_or_default();

    let help_width = 56;
    let help_height = 36;
    let help_area = centered_rect(area, help_width, help_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, help_area);

    let mut text = Text::from(help_text);
    text.push_line(Line::from(Span::styled(log_hint, Style::default().fg(HELP_TEXT))));

    let help = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    frame.render_widget(help, help_area);
}
