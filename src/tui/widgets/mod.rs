mod confirm_dialog;
mod detail_view;
mod gallery_grid;
mod preview;
mod search_bar;
mod settings_dialog;
mod status_bar;
mod text_input;

pub use confirm_dialog::{render_alert, render_confirm_dialog};
pub use detail_view::render_detail_view;
pub use gallery_grid::render_gallery_grid;
pub use preview::{create_protocol, render_preview, render_thumbnail};
pub use search_bar::render_search_bar;
pub use settings_dialog::render_settings_dialog;
pub use status_bar::render_status_bar;
pub use text_input::input_line;

use ratatui::layout::Rect;

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// A rectangle covering `percent_x` by `percent_y` of `area`, centered.
pub fn centered_percent(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width.saturating_mul(percent_x) / 100;
    let height = area.height.saturating_mul(percent_y) / 100;
    centered_rect(area, width, height)
}
