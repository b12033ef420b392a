use std::time::{Duration, Instant};

use crate::api::{Config, Image};
use crate::metadata::{parse_metadata, MetadataEntry};

/// How long the copy hint reads "Copied!" after a copy.
pub const COPIED_HINT_DURATION: Duration = Duration::from_secs(2);

/// Single-line text field with a byte-offset cursor kept on char boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    pub cursor_pos: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor_pos = value.len();
        Self { value, cursor_pos }
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            let new_pos = self.prev_boundary();
            self.value.remove(new_pos);
            self.cursor_pos = new_pos;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.value.len() {
            self.value.remove(self.cursor_pos);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos = self.prev_boundary();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_pos < self.value.len() {
            self.cursor_pos = self.next_boundary();
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_pos = 0;
    }

    /// Text before, at and after the cursor, for drawing a block cursor.
    pub fn split_at_cursor(&self) -> (&str, &str, &str) {
        let before = &self.value[..self.cursor_pos];
        if self.cursor_pos < self.value.len() {
            let end = self.next_boundary();
            (before, &self.value[self.cursor_pos..end], &self.value[end..])
        } else {
            (before, " ", "")
        }
    }

    fn prev_boundary(&self) -> usize {
        let mut pos = self.cursor_pos - 1;
        while pos > 0 && !self.value.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn next_boundary(&self) -> usize {
        let mut pos = self.cursor_pos + 1;
        while pos < self.value.len() && !self.value.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }
}

/// Search box above the grid.
#[derive(Debug, Clone, Default)]
pub struct SearchBarState {
    pub input: TextInput,
    pub editing: bool,
    /// Query text as of the last submitted search, restored on Esc
    committed: String,
}

impl SearchBarState {
    /// Text of the search currently applied to the grid.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
        self.input.move_cursor_end();
    }

    /// Leave editing and return the text to search for.
    pub fn submit(&mut self) -> String {
        self.editing = false;
        self.committed = self.input.value.trim().to_string();
        self.committed.clone()
    }

    /// Leave editing and restore the last submitted text.
    pub fn cancel(&mut self) {
        self.editing = false;
        self.input = TextInput::new(self.committed.clone());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Source,
    Destination,
}

/// Server configuration dialog.
#[derive(Debug, Clone)]
pub struct SettingsDialogState {
    pub source: TextInput,
    pub destination: TextInput,
    pub focus: SettingsField,
    /// Opened because the server has no configuration yet
    pub first_run: bool,
    /// Waiting for the save response
    pub saving: bool,
    /// Validation message shown inside the dialog
    pub error: Option<String>,
}

impl SettingsDialogState {
    pub fn new(current: Option<&Config>, first_run: bool) -> Self {
        let (source, destination) = current
            .map(|c| (c.image_file_path.clone(), c.des_file_path.clone()))
            .unwrap_or_default();
        Self {
            source: TextInput::new(source),
            destination: TextInput::new(destination),
            focus: SettingsField::Source,
            first_run,
            saving: false,
            error: None,
        }
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            SettingsField::Source => &mut self.source,
            SettingsField::Destination => &mut self.destination,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            SettingsField::Source => SettingsField::Destination,
            SettingsField::Destination => SettingsField::Source,
        };
    }

    /// The config to save, or an error message when a field is blank.
    pub fn to_config(&self) -> Result<Config, String> {
        let source = self.source.value.trim();
        let destination = self.destination.value.trim();
        if source.is_empty() || destination.is_empty() {
            return Err("Both paths are required.".to_string());
        }
        Ok(Config {
            image_file_path: source.to_string(),
            des_file_path: destination.to_string(),
        })
    }
}

/// What a confirmation dialog will do when accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteSelected(Vec<i64>),
    Scan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub action: ConfirmAction,
}

impl ConfirmDialog {
    pub fn delete(ids: Vec<i64>) -> Self {
        let message = if ids.len() == 1 {
            "Delete 1 image? This cannot be undone.".to_string()
        } else {
            format!("Delete {} images? This cannot be undone.", ids.len())
        };
        Self {
            title: " Delete images ".to_string(),
            message,
            action: ConfirmAction::DeleteSelected(ids),
        }
    }

    pub fn scan() -> Self {
        Self {
            title: " Scan ".to_string(),
            message: "Start scanning for new images in the source directory? This may take a while."
                .to_string(),
            action: ConfirmAction::Scan,
        }
    }
}

/// Modal message with a single dismiss action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDialog {
    pub title: String,
    pub message: String,
}

impl AlertDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Full-screen view of one image and its metadata.
#[derive(Debug, Clone)]
pub struct DetailViewState {
    pub image_id: i64,
    /// `None` until the detail response arrives
    pub image: Option<Image>,
    pub entries: Vec<MetadataEntry>,
    /// Index into the long entries of the one `y` copies
    pub focused_long: usize,
    pub scroll: u16,
    pub copied_at: Option<Instant>,
}

impl DetailViewState {
    pub fn loading(image_id: i64) -> Self {
        Self {
            image_id,
            image: None,
            entries: Vec::new(),
            focused_long: 0,
            scroll: 0,
            copied_at: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.image.is_none()
    }

    /// Fill in the fetched image. Scroll and focus start at the top.
    pub fn show(&mut self, image: Image) {
        self.entries = image
            .metadata
            .as_ref()
            .map(parse_metadata)
            .unwrap_or_default();
        self.image = Some(image);
        self.focused_long = 0;
        self.scroll = 0;
        self.copied_at = None;
    }

    pub fn long_entries(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.entries.iter().filter(|e| e.is_long())
    }

    pub fn short_entries(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.entries.iter().filter(|e| !e.is_long())
    }

    pub fn focused_entry(&self) -> Option<&MetadataEntry> {
        self.long_entries().nth(self.focused_long)
    }

    pub fn focus_next(&mut self) {
        let count = self.long_entries().count();
        if count > 0 {
            self.focused_long = (self.focused_long + 1) % count;
            self.copied_at = None;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.long_entries().count();
        if count > 0 {
            self.focused_long = (self.focused_long + count - 1) % count;
            self.copied_at = None;
        }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    /// Hint next to the focused entry: "Copied!" briefly after a copy.
    pub fn copy_hint(&self, now: Instant) -> &'static str {
        match self.copied_at {
            Some(at) if now.duration_since(at) < COPIED_HINT_DURATION => "Copied!",
            _ => "y: Copy",
        }
    }
}
