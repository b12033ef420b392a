use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::tui::colors::{ERROR_COLOR, FOCUS_COLOR, HEADER_COLOR, HELP_TEXT};
use crate::tui::dialogs::{SettingsDialogState, SettingsField, TextInput};

use super::{centered_rect, input_line};

pub fn render_settings_dialog(frame: &mut Frame, area: Rect, dialog: &SettingsDialogState) {
    let popup_area = centered_rect(area, 70, 14);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Settings ")
        .title_style(Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD))
        .padding(Padding::horizontal(1));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Intro
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Source label
            Constraint::Length(1), // Source input
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Destination label
            Constraint::Length(1), // Destination input
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Error / saving
            Constraint::Min(0),
            Constraint::Length(1), // Help text
        ])
        .split(inner);

    let intro = if dialog.first_run {
        "The server is not configured yet. Set the image directories to get started."
    } else {
        "Image directories used by the gallery server."
    };
    frame.render_widget(
        Paragraph::new(intro).style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    render_field(
        frame,
        chunks[2],
        chunks[3],
        "Source directory (scanned for new images):",
        &dialog.source,
        dialog.focus == SettingsField::Source,
    );
    render_field(
        frame,
        chunks[5],
        chunks[6],
        "Destination directory (images are moved here):",
        &dialog.destination,
        dialog.focus == SettingsField::Destination,
    );

    if let Some(ref error) = dialog.error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(ERROR_COLOR)),
            chunks[8],
        );
    } else if dialog.saving {
        frame.render_widget(
            Paragraph::new("Saving...").style(Style::default().fg(HELP_TEXT)),
            chunks[8],
        );
    }

    let help = Paragraph::new("Enter:Save  Tab:Next field  Esc:Close")
        .style(Style::default().fg(HELP_TEXT));
    frame.render_widget(help, chunks[10]);
}

fn render_field(
    frame: &mut Frame,
    label_area: Rect,
    input_area: Rect,
    label: &str,
    input: &TextInput,
    focused: bool,
) {
    let label_style = if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };
    frame.render_widget(Paragraph::new(label).style(label_style), label_area);

    let mut line = input_line(input, focused);
    line.spans.insert(0, Span::raw("> "));
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(Paragraph::new(line).style(style), input_area);
}
