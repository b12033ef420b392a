use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::tui::colors::{
    styled_platform, CHIP_BG, CHIP_KEY_COLOR, FOCUS_COLOR, HEADER_COLOR, HELP_TEXT, LONG_KEY_COLOR,
};
use crate::tui::dialogs::DetailViewState;
use crate::tui::state::ProtocolCache;

use super::{centered_percent, render_thumbnail};

pub fn render_detail_view(
    frame: &mut Frame,
    area: Rect,
    detail: &DetailViewState,
    thumbnails: &mut ProtocolCache,
) {
    let popup_area = centered_percent(area, 94, 92);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(FOCUS_COLOR))
        .title(format!(" Image #{} ", detail.image_id))
        .title_style(Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[0]);

    render_thumbnail(frame, panes[0], thumbnails, detail.image_id);

    let metadata = Paragraph::new(metadata_lines(detail, Instant::now()))
        .block(
            Block::default()
                .borders(Borders::LEFT)
                .border_style(Style::default().fg(HELP_TEXT))
                .padding(Padding::horizontal(1)),
        )
        .wrap(Wrap { trim: false })
        .scroll((detail.scroll, 0));
    frame.render_widget(metadata, panes[1]);

    let help = Paragraph::new("←/→:prev/next  Tab:focus  y:copy  j/k:scroll  Esc:close")
        .style(Style::default().fg(HELP_TEXT));
    frame.render_widget(help, rows[1]);
}

fn metadata_lines(detail: &DetailViewState, now: Instant) -> Vec<Line<'_>> {
    let Some(image) = detail.image.as_ref() else {
        return vec![Line::from(Span::styled(
            "Loading details...",
            Style::default().fg(HELP_TEXT),
        ))];
    };

    let mut header = vec![styled_platform(image.platform_label())];
    if let Some(made) = image.make_time.as_deref() {
        header.push(Span::styled(format!("  {}", made), Style::default().fg(HELP_TEXT)));
    }
    let mut lines = vec![
        Line::from(header),
        Line::from(Span::styled(image.filepath.as_str(), Style::default().fg(HELP_TEXT))),
        Line::from(""),
    ];

    if detail.entries.is_empty() {
        lines.push(Line::from(Span::styled(
            "No metadata.",
            Style::default().fg(HELP_TEXT),
        )));
        return lines;
    }

    for (i, entry) in detail.long_entries().enumerate() {
        let mut title = vec![Span::styled(
            entry.key.as_str(),
            Style::default().fg(LONG_KEY_COLOR).add_modifier(Modifier::BOLD),
        )];
        if i == detail.focused_long {
            title.push(Span::styled(
                format!("  [{}]", detail.copy_hint(now)),
                Style::default().fg(FOCUS_COLOR),
            ));
        }
        lines.push(Line::from(title));
        lines.extend(entry.value.lines().map(Line::from));
        lines.push(Line::from(""));
    }

    let chips: Vec<Span> = detail
        .short_entries()
        .flat_map(|entry| {
            [
                Span::styled(
                    format!(" {}: ", entry.key),
                    Style::default().fg(CHIP_KEY_COLOR).bg(CHIP_BG),
                ),
                Span::styled(format!("{} ", entry.value), Style::default().bg(CHIP_BG)),
                Span::raw(" "),
            ]
        })
        .collect();

    if !chips.is_empty() {
        lines.push(Line::from(Span::styled(
            "Details",
            Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(chips));
    }

    lines
}
