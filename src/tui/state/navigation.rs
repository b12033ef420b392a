use super::{AppState, LOAD_MORE_THRESHOLD};

impl AppState {
    /// Move the cursor to `index`, clamped to the loaded cards.
    /// Requests the next page when the cursor nears the end.
    pub fn select_index(&mut self, index: usize) {
        let count = self.gallery.images().len();
        if count == 0 {
            self.selected_index = 0;
            self.table_state.select(None);
            return;
        }
        self.selected_index = index.min(count - 1);
        self.table_state.select(Some(self.selected_index));
        self.maybe_load_more();
    }

    pub fn move_down(&mut self) {
        self.select_index(self.selected_index.saturating_add(1));
    }

    pub fn move_up(&mut self) {
        self.select_index(self.selected_index.saturating_sub(1));
    }

    pub fn page_down(&mut self, rows: usize) {
        self.select_index(self.selected_index.saturating_add(rows));
    }

    pub fn page_up(&mut self, rows: usize) {
        self.select_index(self.selected_index.saturating_sub(rows));
    }

    pub fn move_to_top(&mut self) {
        self.select_index(0);
    }

    pub fn move_to_bottom(&mut self) {
        self.select_index(usize::MAX);
    }

    /// Rows of the grid that fit on screen, for page movement.
    pub fn visible_rows(&self) -> usize {
        // Border (2) + header (1) + header margin (1)
        (self.grid_area.height.saturating_sub(4) as usize).max(1)
    }

    fn maybe_load_more(&mut self) {
        let count = self.gallery.images().len();
        if self.selected_index + LOAD_MORE_THRESHOLD >= count {
            let request = self.gallery.load_more();
            self.send_list(request);
        }
    }
}
