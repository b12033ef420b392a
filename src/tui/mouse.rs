use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::state::AppState;

/// Lines scrolled in the detail view per wheel notch.
const DETAIL_SCROLL_STEP: u16 = 3;

/// Tracks state for double-click detection
pub struct MouseState {
    last_click_time: Option<Instant>,
    last_click_col: u16,
    last_click_row: u16,
}

impl MouseState {
    pub fn new() -> Self {
        Self {
            last_click_time: None,
            last_click_col: 0,
            last_click_row: 0,
        }
    }

    /// Record a click and return true if it's a double-click (same position within 500ms)
    fn record_click(&mut self, col: u16, row: u16) -> bool {
        let is_double = self
            .last_click_time
            .is_some_and(|t| t.elapsed().as_millis() < 500)
            && self.last_click_col == col
            && self.last_click_row == row;

        self.last_click_time = Some(Instant::now());
        self.last_click_col = col;
        self.last_click_row = row;

        is_double
    }
}

pub fn handle_mouse(event: MouseEvent, state: &mut AppState, mouse_state: &mut MouseState) {
    // The detail view takes the wheel; other overlays ignore the mouse
    if let Some(ref mut detail) = state.detail {
        match event.kind {
            MouseEventKind::ScrollUp => detail.scroll_up(DETAIL_SCROLL_STEP),
            MouseEventKind::ScrollDown => detail.scroll_down(DETAIL_SCROLL_STEP),
            _ => {}
        }
        return;
    }
    if state.has_overlay() || state.search.editing {
        return;
    }

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            handle_left_click(event.column, event.row, state, mouse_state);
        }
        MouseEventKind::ScrollUp if contains(state.grid_area, event.column, event.row) => {
            state.move_up();
        }
        MouseEventKind::ScrollDown if contains(state.grid_area, event.column, event.row) => {
            state.move_down();
        }
        _ => {}
    }
}

fn handle_left_click(col: u16, row: u16, state: &mut AppState, mouse_state: &mut MouseState) {
    let is_double = mouse_state.record_click(col, row);

    if contains(state.toggle_area, col, row) {
        state.toggle_mode();
    } else if let Some(index) = card_at(row, col, state) {
        state.select_index(index);
        if state.gallery.mode().is_selecting() || is_double {
            state.activate_selected();
        }
    }
}

/// Map a click position to a card index, or None if outside the data rows.
///
/// The grid uses `Table` with `Borders::ALL` + a header row + 1-row `bottom_margin`.
/// So: border (1 row) + header (1 row) + margin (1 row) = first data row at y+3.
fn card_at(row: u16, col: u16, state: &AppState) -> Option<usize> {
    let area = state.grid_area;
    if !contains(area, col, row) {
        return None;
    }

    let data_top = area.y + 3;
    if row < data_top || row >= area.y + area.height.saturating_sub(1) {
        return None;
    }

    let row_in_table = (row - data_top) as usize;
    let index = state.table_state.offset() + row_in_table;

    if index < state.gallery.images().len() {
        Some(index)
    } else {
        None
    }
}

fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}
