use foundation::LatLng;
use layers::symbology::TileLayerOptions;
use serde::{Deserialize, Serialize};

/// Viewer configuration.
///
/// Every field has a default, so a page only needs to pass the values it wants
/// to change, e.g. `{"initial_center": {"lat": 51.5, "lng": -0.12}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Zoom used for all pixel math (cursor box, crop origin, download zoom),
    /// independent of the zoom the map is displayed at.
    pub display_zoom: u8,
    pub imagery_max_zoom: u8,
    pub initial_center: LatLng,
    pub initial_zoom: u8,

    pub coverage_path: String,
    pub tiles_path: String,
    pub download_path: String,

    pub base_layer_url: String,
    pub base_layer_max_zoom: u8,
    pub base_layer_attribution: String,
    pub imagery_attribution: String,

    pub no_imagery_label: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            display_zoom: 20,
            imagery_max_zoom: 21,
            initial_center: LatLng::new(-33.888, 151.16),
            initial_zoom: 20,

            coverage_path: "/coverage".to_string(),
            tiles_path: "/tiles".to_string(),
            download_path: "/download".to_string(),

            base_layer_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            base_layer_max_zoom: 20,
            base_layer_attribution:
                "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>"
                    .to_string(),
            imagery_attribution: "&copy; <a href=\"https://www.nearmap.com\">Nearmap</a>"
                .to_string(),

            no_imagery_label: "no imagery".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "invalid viewer config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn display_zoom_f64(&self) -> f64 {
        f64::from(self.display_zoom)
    }

    pub fn imagery_layer_options(&self) -> TileLayerOptions {
        TileLayerOptions::new(self.imagery_max_zoom, self.imagery_attribution.clone())
    }

    pub fn base_layer_options(&self) -> TileLayerOptions {
        TileLayerOptions::new(self.base_layer_max_zoom, self.base_layer_attribution.clone())
    }
}
