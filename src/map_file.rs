//! Persisted map document and its save/load helpers.
//!
//! The on-disk format is a single JSON object:
//!
//! ```json
//! { "shapes": [...], "backgroundOpacity": 1.0, "imgSrc": "data:...", "tokens": [...] }
//! ```
//!
//! Every top-level key is optional on load, and `null` counts as missing.

#[cfg(test)]
#[path = "map_file_test.rs"]
mod map_file_test;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::DEFAULT_BACKGROUND_OPACITY;
use crate::doc::Primitive;
use crate::error::MapError;
use crate::tokens::Token;

fn default_opacity() -> f64 {
    DEFAULT_BACKGROUND_OPACITY
}

fn deserialize_opacity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_BACKGROUND_OPACITY))
}

/// Treat an explicit `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The persisted parts of a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub shapes: Vec<Primitive>,
    #[serde(default = "default_opacity", deserialize_with = "deserialize_opacity")]
    pub background_opacity: f64,
    /// Background image as a `data:` URI, or empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub img_src: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tokens: Vec<Token>,
}

impl Default for MapDocument {
    fn default() -> Self {
        Self { shapes: Vec::new(), background_opacity: DEFAULT_BACKGROUND_OPACITY, img_src: String::new(), tokens: Vec::new() }
    }
}

impl MapDocument {
    /// Parse a document, defaulting missing keys and clamping opacity to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::MalformedMapDocument`] if the text is not a valid document.
    pub fn from_json_str(text: &str) -> Result<Self, MapError> {
        let mut doc: Self = serde_json::from_str(text)?;
        doc.background_opacity = doc.background_opacity.clamp(0.0, 1.0);
        Ok(doc)
    }

    /// # Errors
    ///
    /// Returns [`MapError::MalformedMapDocument`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, MapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Normalize a user-supplied save name into a file name ending in `.json`.
///
/// # Errors
///
/// Returns [`MapError::InvalidFileName`] if the trimmed name is empty or
/// contains a path separator.
pub fn file_name_for(name: &str) -> Result<String, MapError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) || trimmed == ".json" {
        return Err(MapError::InvalidFileName);
    }
    if trimmed.to_ascii_lowercase().ends_with(".json") {
        Ok(trimmed.to_owned())
    } else {
        Ok(format!("{trimmed}.json"))
    }
}

/// Write `doc` to `<dir>/<name>.json` and return the path written.
///
/// # Errors
///
/// Returns [`MapError::InvalidFileName`] (nothing is written) for an empty
/// name, or [`MapError::Io`] if the write fails.
pub fn save(dir: &Path, name: &str, doc: &MapDocument) -> Result<PathBuf, MapError> {
    let file_name = file_name_for(name).map_err(|e| {
        tracing::warn!(name, "rejected save file name");
        e
    })?;
    let path = dir.join(file_name);
    fs::write(&path, doc.to_json_string()?)?;
    tracing::info!(path = %path.display(), shapes = doc.shapes.len(), tokens = doc.tokens.len(), "map saved");
    Ok(path)
}

/// Read and parse a map document from `path`.
///
/// # Errors
///
/// Returns [`MapError::Io`] if the file cannot be read, or
/// [`MapError::MalformedMapDocument`] if it does not parse.
pub fn load(path: &Path) -> Result<MapDocument, MapError> {
    let text = fs::read_to_string(path)?;
    let doc = MapDocument::from_json_str(&text).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "malformed map document");
        e
    })?;
    tracing::info!(path = %path.display(), shapes = doc.shapes.len(), "map read");
    Ok(doc)
}
