use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::tui::colors::{ERROR_COLOR, HEADER_COLOR, HELP_TEXT, WARNING_COLOR};
use crate::tui::dialogs::{AlertDialog, ConfirmAction, ConfirmDialog};

use super::centered_rect;

const DIALOG_WIDTH: u16 = 56;

/// Rows needed to show `text` wrapped at `width` columns.
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    text.lines()
        .map(|line| line.chars().count().max(1).div_ceil(width) as u16)
        .sum()
}

pub fn render_confirm_dialog(frame: &mut Frame, area: Rect, dialog: &ConfirmDialog) {
    let text_width = DIALOG_WIDTH - 4;
    let height = wrapped_height(&dialog.message, text_width) + 5;
    let popup_area = centered_rect(area, DIALOG_WIDTH, height);

    frame.render_widget(Clear, popup_area);

    let accent = match dialog.action {
        ConfirmAction::DeleteSelected(_) => ERROR_COLOR,
        ConfirmAction::Scan => WARNING_COLOR,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(dialog.title.as_str())
        .title_style(Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD))
        .padding(Padding::horizontal(1));

    let lines = vec![
        Line::from(""),
        Line::from(dialog.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            " y/Enter: confirm  n/Esc: cancel",
            Style::default().fg(HELP_TEXT),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

pub fn render_alert(frame: &mut Frame, area: Rect, alert: &AlertDialog) {
    let text_width = DIALOG_WIDTH - 4;
    let height = wrapped_height(&alert.message, text_width) + 5;
    let popup_area = centered_rect(area, DIALOG_WIDTH, height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", alert.title))
        .title_style(Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD))
        .padding(Padding::horizontal(1));

    let mut lines = vec![Line::from("")];
    lines.extend(alert.message.lines().map(Line::from));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Enter/Esc: close", Style::default().fg(HELP_TEXT))));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_height_counts_wrapped_rows() {
        assert_eq!(wrapped_height("short", 10), 1);
        assert_eq!(wrapped_height("abcdefghijk", 10), 2);
        assert_eq!(wrapped_height("a\n\nb", 10), 3);
    }
}
