use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use crate::gallery::GridView;
use crate::tui::colors::{
    selection_mark, styled_platform, FOCUS_COLOR, HEADER_COLOR, HELP_TEXT, SELECTED_MARK,
    UNFOCUS_COLOR, WARNING_COLOR,
};
use crate::tui::state::AppState;

pub const NO_RESULTS_TEXT: &str = "No images found. Try scanning or changing your search.";
pub const UNCONFIGURED_TEXT: &str =
    "The server has no image directories configured yet. Press c to open settings.";
pub const FAILED_TEXT: &str = "Could not load images. Press r to retry.";

pub fn render_gallery_grid(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let selecting = state.gallery.mode().is_selecting();
    let count = state.gallery.images().len();

    let mut title = format!(" Gallery ({}) ", count);
    if state.gallery.is_loading() {
        title.push_str("loading... ");
    }
    let border_style = if selecting {
        Style::default().fg(WARNING_COLOR)
    } else if state.has_overlay() {
        Style::default().fg(UNFOCUS_COLOR)
    } else {
        Style::default().fg(FOCUS_COLOR)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let placeholder = match state.gallery.view() {
        GridView::Pending => Some("Loading..."),
        GridView::NoResults => Some(NO_RESULTS_TEXT),
        GridView::Unconfigured => Some(UNCONFIGURED_TEXT),
        GridView::Failed => Some(FAILED_TEXT),
        GridView::Cards => None,
    };
    if let Some(text) = placeholder {
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(HELP_TEXT))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let rows: Vec<Row> = state
        .gallery
        .cards()
        .map(|card| {
            let style = if card.selected == Some(true) {
                Style::default().fg(SELECTED_MARK)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(selection_mark(card.selected)),
                Cell::from(card.image.no.to_string()),
                Cell::from(styled_platform(card.image.platform_label())),
                Cell::from(card.image.file_name()),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec!["", "No", "Platform", "File"])
        .style(
            Style::default()
                .fg(HEADER_COLOR)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let widths = [
        Constraint::Length(if selecting { 3 } else { 0 }),
        Constraint::Length(7),
        Constraint::Length(16),
        Constraint::Min(0),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(FOCUS_COLOR).fg(Color::Black));

    frame.render_stateful_widget(table, area, &mut state.table_state);
}
