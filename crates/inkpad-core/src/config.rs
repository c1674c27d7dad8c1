//! Editor configuration.

use crate::shapes::{SerializableColor, StrokeStyle};
use serde::{Deserialize, Serialize};

/// Tunables of the editing engine. Every field has a default, so partial
/// JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Extra reach in pixels when hit testing shapes.
    pub hit_tolerance: f64,
    /// How close (per axis, inclusive) a click must be to the first vertex
    /// to close a polygon.
    pub polygon_close_tolerance: f64,
    /// Stroke color of the selection highlight.
    pub highlight_color: SerializableColor,
    /// Stroke width of the selection highlight.
    pub highlight_width: u32,
    /// Dash pattern of the selection highlight.
    pub highlight_dash: StrokeStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: 3.0,
            polygon_close_tolerance: 5.0,
            highlight_color: SerializableColor::red(),
            highlight_width: 2,
            highlight_dash: StrokeStyle::Dashed,
        }
    }
}

impl EditorConfig {
    /// Load from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
