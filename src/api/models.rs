use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An image record as served by the gallery API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Image {
    /// Server-assigned identifier
    pub no: i64,
    /// Display URL (usually a path relative to the server root)
    pub filepath: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(rename = "makeTime", default)]
    pub make_time: Option<String>,
    /// Only present on detail responses
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl Image {
    /// Platform label for overlays, with a stand-in for untagged images.
    pub fn platform_label(&self) -> &str {
        match self.platform.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => "Unknown",
        }
    }

    /// Last path component of the file path.
    pub fn file_name(&self) -> &str {
        self.filepath.rsplit('/').next().unwrap_or(&self.filepath)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PageResponse {
    pub images: Vec<Image>,
    pub page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub total_images: Option<u64>,
}

impl PageResponse {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Server-side source/destination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    pub image_file_path: String,
    pub des_file_path: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteRequest<'a> {
    pub image_ids: &'a [i64],
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// FastAPI error body. `detail` is a string for HTTPException and a list for
/// validation errors.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Value,
}

impl ErrorBody {
    pub fn into_message(self) -> String {
        match self.detail {
            Value::String(s) => s,
            other => other.to_string(),
        }
    }
}
