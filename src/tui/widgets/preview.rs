use image::DynamicImage;
use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use ratatui_image::{picker::Picker, protocol::StatefulProtocol, FilterType, Resize, StatefulImage};
use std::sync::{Mutex, OnceLock};

use crate::tui::colors::{styled_platform, HEADER_COLOR, HELP_TEXT, UNFOCUS_COLOR};
use crate::tui::state::{AppState, ProtocolCache};

// Global picker (created once, thread-safe)
static PICKER: OnceLock<Mutex<Option<Picker>>> = OnceLock::new();

fn get_picker_mutex() -> &'static Mutex<Option<Picker>> {
    PICKER.get_or_init(|| {
        Mutex::new(Picker::from_termios().ok().map(|mut picker| {
            picker.guess_protocol();
            picker
        }))
    })
}

/// Create a stateful protocol from a decoded thumbnail.
/// Returns `None` when the terminal supports no image protocol.
pub fn create_protocol(image: DynamicImage) -> Option<Box<dyn StatefulProtocol>> {
    let mut picker_guard = get_picker_mutex().lock().ok()?;
    let picker = picker_guard.as_mut()?;
    Some(picker.new_resize_protocol(image))
}

/// Draw the cached thumbnail for `id`, or a placeholder while it loads.
pub fn render_thumbnail(frame: &mut Frame, area: Rect, cache: &mut ProtocolCache, id: i64) {
    let failed = cache.is_failed(id);
    match cache.get_mut(id) {
        Some(protocol) => {
            let image_widget =
                StatefulImage::new(None).resize(Resize::Fit(Some(FilterType::Lanczos3)));
            frame.render_stateful_widget(image_widget, area, protocol);
        }
        None => {
            let text = if failed { "No preview" } else { "Loading..." };
            let placeholder = Paragraph::new(text)
                .style(Style::default().fg(HELP_TEXT))
                .alignment(Alignment::Center);
            let y = area.y + area.height / 2;
            frame.render_widget(placeholder, Rect::new(area.x, y, area.width, area.height.min(1)));
        }
    }
}

/// Preview pane: thumbnail of the card under the cursor plus its overlay line.
pub fn render_preview(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(UNFOCUS_COLOR))
        .title(" Preview ");

    let Some(image) = state.selected_image() else {
        let placeholder = Paragraph::new("Nothing selected")
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(placeholder, area);
        return;
    };

    let id = image.no;
    let mut info = vec![
        Span::styled(
            format!("#{} ", id),
            Style::default()
                .fg(HEADER_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        styled_platform(image.platform_label()),
    ];
    if let Some(made) = image.make_time.as_deref() {
        info.push(Span::styled(format!("  {}", made), Style::default().fg(HELP_TEXT)));
    }
    let info_line = Line::from(info);
    let name_line = Line::from(Span::styled(
        image.file_name().to_string(),
        Style::default().fg(HELP_TEXT),
    ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    let caption = Paragraph::new(vec![info_line, name_line]).wrap(Wrap { trim: true });
    frame.render_widget(caption, chunks[1]);

    render_thumbnail(frame, chunks[0], &mut state.thumbnails, id);
}
