//! Metadata normalization for the detail view.
//!
//! Images carry an opaque JSON object of generation metadata. NovelAI-style
//! objects are flat and displayed as-is. Stable Diffusion images store the whole
//! generation info in a single `prompt` string, which is decomposed here into the
//! prompt, the negative prompt and the `Key: value` settings that follow `Steps:`.

use serde_json::{Map, Value};

/// Keys that always render as a multi-line block.
const LONG_KEYS: [&str; 3] = ["prompt", "negative prompt", "uc"];

/// Values longer than this (in characters) render as a multi-line block.
pub const LONG_VALUE_CHARS: usize = 80;

const NEGATIVE_MARKER: &str = "Negative prompt:";
const STEPS_MARKER: &str = "Steps:";

/// How an entry is laid out in the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryLayout {
    /// Labelled, copyable text block
    Long,
    /// Compact inline chip
    Short,
}

/// A single display row of image metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
    pub layout: EntryLayout,
}

impl MetadataEntry {
    fn new(key: String, value: String) -> Self {
        let layout = classify(&key, &value);
        Self { key, value, layout }
    }

    pub fn is_long(&self) -> bool {
        self.layout == EntryLayout::Long
    }
}

/// Decide whether a key/value pair renders long or short.
pub fn classify(key: &str, value: &str) -> EntryLayout {
    let key = key.to_lowercase();
    if LONG_KEYS.contains(&key.as_str()) || value.chars().count() > LONG_VALUE_CHARS {
        EntryLayout::Long
    } else {
        EntryLayout::Short
    }
}

/// Normalize an image's metadata object into ordered display entries.
///
/// Empty values (null, or strings that are blank after trimming) are dropped.
pub fn parse_metadata(metadata: &Map<String, Value>) -> Vec<MetadataEntry> {
    let pairs: Vec<(String, String)> = match stable_diffusion_prompt(metadata) {
        Some(text) => parse_generation_parameters(text),
        None => metadata
            .iter()
            .filter_map(|(key, value)| display_value(value).map(|v| (key.clone(), v)))
            .collect(),
    };

    pairs
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| MetadataEntry::new(key, value))
        .collect()
}

/// Returns the composite prompt string when the object is Stable Diffusion metadata.
fn stable_diffusion_prompt(metadata: &Map<String, Value>) -> Option<&str> {
    let software = metadata.get("Software")?.as_str()?;
    if software != "StableDiffusion" {
        return None;
    }
    metadata.get("prompt")?.as_str()
}

/// Render a JSON value as display text. Null and empty arrays have no display form.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Array(items) if items.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Split a Stable Diffusion "parameters" string into ordered key/value pairs.
///
/// The text has the shape `<prompt>\nNegative prompt: <neg>\nSteps: 20, Sampler: Euler, ...`.
/// Either marker may be missing; the prompt text is never dropped.
pub fn parse_generation_parameters(text: &str) -> Vec<(String, String)> {
    let mut pairs = OrderedPairs::default();

    let negative_idx = text.find(NEGATIVE_MARKER);
    let steps_idx = text.find(STEPS_MARKER);

    let prompt = match negative_idx {
        Some(idx) => &text[..idx],
        None => text,
    };
    pairs.insert("prompt", prompt.trim());

    if let Some(neg) = negative_idx {
        let end = match steps_idx {
            Some(steps) if steps > neg => steps,
            _ => text.len(),
        };
        let negative = &text[neg + NEGATIVE_MARKER.len()..end];
        pairs.insert("Negative prompt", negative.trim());
    }

    if let Some(steps) = steps_idx {
        for segment in split_unquoted_commas(&text[steps..]) {
            let (key, value) = match segment.split_once(':') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (segment.trim(), ""),
            };
            if !key.is_empty() {
                pairs.insert(key, value);
            }
        }
    }

    pairs.into_vec()
}

/// Split on commas that sit outside double-quoted spans.
///
/// A comma is a separator when the number of `"` characters after it is even.
/// Quotes do not nest; with an unmatched quote, commas before it stay joined.
pub fn split_unquoted_commas(text: &str) -> Vec<&str> {
    let mut quotes_after = text.matches('"').count();
    let mut segments = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        match ch {
            '"' => quotes_after -= 1,
            ',' if quotes_after % 2 == 0 => {
                segments.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&text[start..]);
    segments
}

/// Insertion-ordered pairs where re-inserting a key replaces the value in place.
#[derive(Default)]
struct OrderedPairs {
    pairs: Vec<(String, String)>,
}

impl OrderedPairs {
    fn insert(&mut self, key: &str, value: &str) {
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value.to_string(),
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    fn into_vec(self) -> Vec<(String, String)> {
        self.pairs
    }
}
