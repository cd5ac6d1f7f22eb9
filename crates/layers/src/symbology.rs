//! Display options handed to the map widget.
//!
//! Field names serialise in camelCase so the structs can be passed straight
//! through as widget option objects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleStyle {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_cap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_join: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

impl RectangleStyle {
    /// Outline that follows the cursor.
    pub fn cursor() -> Self {
        Self {
            color: "lightblue".to_string(),
            weight: Some(2.0),
            line_cap: Some("square".to_string()),
            line_join: Some("square".to_string()),
            fill: Some(false),
        }
    }

    /// Filled box marking a frozen download selection.
    pub fn selection() -> Self {
        Self {
            color: "blue".to_string(),
            weight: None,
            line_cap: None,
            line_join: None,
            fill: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerOptions {
    pub max_zoom: u8,
    pub attribution: String,
    #[serde(default)]
    pub detect_retina: bool,
}

impl TileLayerOptions {
    pub fn new(max_zoom: u8, attribution: impl Into<String>) -> Self {
        Self {
            max_zoom,
            attribution: attribution.into(),
            detect_retina: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RectangleStyle, TileLayerOptions};
    use pretty_assertions::assert_eq;

    #[test]
    fn cursor_style_serialises_as_widget_options() {
        let json = serde_json::to_value(RectangleStyle::cursor()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "color": "lightblue",
                "weight": 2.0,
                "lineCap": "square",
                "lineJoin": "square",
                "fill": false,
            })
        );
    }

    #[test]
    fn selection_style_omits_unset_fields() {
        let json = serde_json::to_value(RectangleStyle::selection()).unwrap();
        assert_eq!(json, serde_json::json!({ "color": "blue" }));
    }

    #[test]
    fn tile_options_use_camel_case() {
        let json = serde_json::to_value(TileLayerOptions::new(21, "Nearmap")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "maxZoom": 21,
                "attribution": "Nearmap",
                "detectRetina": false,
            })
        );
    }
}
