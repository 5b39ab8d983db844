use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Key the backend stores matched image paths under (spelling is part of the wire contract)
pub const SEARCH_RESULTS_FIELD: &str = "retreived images";
/// Corrected spelling emitted by newer backend builds
pub const SEARCH_RESULTS_FIELD_ALIAS: &str = "retrieved_images";

/// Body of `POST /search-endpoint`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchRequest<'a> {
    pub search_phrase: &'a str,
}

/// Body of `GET /` on a healthy backend
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub message: String,
}

/// An image as it may arrive from callers: a bare URL or a `{url, name}` record.
///
/// Only accepted at the boundary; everything past it works with [`ImageDescriptor`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ImageSource {
    Url(String),
    Record {
        url: String,
        #[serde(default)]
        name: Option<String>,
    },
}

/// Canonical image record rendered by the grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub url: String,
    pub name: String,
}

impl ImageDescriptor {
    /// Collapse an [`ImageSource`] at `index` (0-based) into a descriptor with a display name
    pub fn from_source(source: ImageSource, index: usize) -> Self {
        let (url, explicit_name) = match source {
            ImageSource::Url(url) => (url, None),
            ImageSource::Record { url, name } => (url, name),
        };

        let name = explicit_name
            .filter(|name| !name.trim().is_empty())
            .or_else(|| display_name(&url).map(str::to_string))
            .unwrap_or_else(|| positional_name(index));

        Self { url, name }
    }

    /// Build a descriptor from the `index`-th (0-based) path returned by the backend
    pub fn from_backend_path(base_url: &str, path: &str, index: usize) -> Self {
        let normalized = normalize_path(path);
        let name = display_name(&normalized)
            .map(str::to_string)
            .unwrap_or_else(|| positional_name(index));
        let url = format!("{}/{}", base_url, normalized);

        Self { url, name }
    }
}

fn positional_name(index: usize) -> String {
    format!("Image {}", index + 1)
}

/// Convert Windows separators so the path can be appended to a URL
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Final `/`-delimited segment of a URL, or `None` when it is empty
pub fn display_name(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|segment| !segment.is_empty())
}

/// Extract the path list from a search response body.
///
/// A missing field or a non-array value means zero results, not an error.
pub fn search_result_paths(body: &Value) -> Vec<String> {
    let field = body
        .get(SEARCH_RESULTS_FIELD)
        .or_else(|| body.get(SEARCH_RESULTS_FIELD_ALIAS));

    let Some(entries) = field.and_then(Value::as_array) else {
        if field.is_some() {
            warn!("Search response field is not an array, treating as no results");
        }
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry.as_str() {
            Some(path) => Some(path.to_string()),
            None => {
                warn!("Skipping non-string search result entry: {}", entry);
                None
            }
        })
        .collect()
}

/// Turn a raw search response into descriptors rooted at `base_url`
pub fn descriptors_from_response(base_url: &str, body: &Value) -> Vec<ImageDescriptor> {
    search_result_paths(body)
        .iter()
        .enumerate()
        .map(|(index, path)| ImageDescriptor::from_backend_path(base_url, path, index))
        .collect()
}

/// One captioned file from `POST /upload-image`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub file_name: String,
    pub captions: String,
}

/// Parse the `{file name: captions}` map returned after an upload
pub fn uploaded_images_from_response(body: &Value) -> Vec<UploadedImage> {
    let Some(map) = body.as_object() else {
        warn!("Upload response is not an object, nothing to show");
        return Vec::new();
    };

    map.iter()
        .map(|(file_name, captions)| UploadedImage {
            file_name: file_name.clone(),
            captions: caption_text(captions),
        })
        .collect()
}

fn caption_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
