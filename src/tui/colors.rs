//! Semantic color constants for consistent TUI styling.

use ratatui::prelude::*;

// Semantic colors
pub const FOCUS_COLOR: Color = Color::Cyan;
pub const UNFOCUS_COLOR: Color = Color::DarkGray;
pub const HEADER_COLOR: Color = Color::White;
pub const HELP_TEXT: Color = Color::DarkGray;
pub const WARNING_COLOR: Color = Color::Yellow;
pub const ERROR_COLOR: Color = Color::Red;
pub const STATUS_BAR_BG: Color = Color::DarkGray;
pub const STATUS_BAR_FG: Color = Color::White;
pub const SELECTED_MARK: Color = Color::Green;
pub const ARMED_BG: Color = Color::Red;
pub const LONG_KEY_COLOR: Color = Color::Yellow;
pub const CHIP_KEY_COLOR: Color = Color::Cyan;
pub const CHIP_BG: Color = Color::Indexed(236);

/// Color for a platform label.
pub fn platform_color(platform: &str) -> Color {
    match platform {
        "NovelAI" => Color::Magenta,
        "StableDiffusion" => Color::Blue,
        _ => Color::Gray,
    }
}

/// Create a styled span for a platform label.
pub fn styled_platform(platform: &str) -> Span<'_> {
    Span::styled(platform, Style::default().fg(platform_color(platform)))
}

/// Selection checkbox for a card, or nothing outside selection mode.
pub fn selection_mark(selected: Option<bool>) -> Span<'static> {
    match selected {
        Some(true) => Span::styled(
            "[x]",
            Style::default()
                .fg(SELECTED_MARK)
                .add_modifier(Modifier::BOLD),
        ),
        Some(false) => Span::styled("[ ]", Style::default().fg(UNFOCUS_COLOR)),
        None => Span::raw(""),
    }
}

/// Style for the mode-toggle control.
pub fn toggle_style(armed: bool) -> Style {
    if armed {
        Style::default().bg(ARMED_BG).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(FOCUS_COLOR)
    }
}
