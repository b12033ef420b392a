use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::colors::{toggle_style, FOCUS_COLOR, HELP_TEXT, UNFOCUS_COLOR};
use crate::tui::state::AppState;

use super::input_line;

/// Search box, sort and platform selectors, and the mode-toggle control.
pub fn render_search_bar(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let editing = state.search.editing;
    let border_style = if editing {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default().fg(UNFOCUS_COLOR)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sort_text = format!(" [s] {} ", state.sort);
    let platform_text = format!(" [p] {} ", state.platform);
    let label = state.gallery.toggle_label();
    let toggle_text = format!(" [v] {} ", label.text);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(sort_text.chars().count() as u16),
            Constraint::Length(platform_text.chars().count() as u16),
            Constraint::Length(toggle_text.chars().count() as u16),
        ])
        .split(inner);

    let input = if editing || !state.search.input.value.is_empty() {
        let mut line = input_line(&state.search.input, editing);
        line.spans.insert(0, Span::styled("/ ", Style::default().fg(HELP_TEXT)));
        Paragraph::new(line)
    } else {
        Paragraph::new(Span::styled(
            "/ to search prompts and metadata",
            Style::default().fg(HELP_TEXT),
        ))
    };
    frame.render_widget(input, chunks[0]);

    frame.render_widget(Paragraph::new(sort_text), chunks[1]);
    frame.render_widget(Paragraph::new(platform_text), chunks[2]);
    frame.render_widget(
        Paragraph::new(toggle_text).style(toggle_style(label.armed)),
        chunks[3],
    );

    state.toggle_area = chunks[3];
}
