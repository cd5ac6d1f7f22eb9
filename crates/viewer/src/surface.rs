//! Seams between the viewer and the page it runs in.
//!
//! The controller only ever talks to the map widget and the HTML controls
//! through these traits; the web crate implements them over Leaflet and the
//! DOM, tests implement them with recorders.

use foundation::{LatLng, LatLngBounds};
use layers::LayerId;
use layers::symbology::TileLayerOptions;

use crate::dates::NavState;
use crate::download::DownloadLink;

/// Identifies one download popup so a late close event from an older popup
/// can be told apart from the current one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PopupId(pub u64);

pub trait MapSurface {
    /// Geographic extent currently visible.
    fn viewport(&self) -> LatLngBounds;

    /// Creates a tile layer and attaches it on top of existing ones.
    ///
    /// The implementation must eventually report completion of the layer's
    /// tile loading via `Viewer::on_layer_loaded(id)`.
    fn add_imagery_layer(&mut self, id: LayerId, url_template: &str, options: &TileLayerOptions);

    fn remove_imagery_layer(&mut self, id: LayerId);

    fn set_cursor_rect(&mut self, bounds: LatLngBounds);

    /// Shows the (single) selection rectangle at `bounds`, moving it if shown.
    fn show_selection(&mut self, bounds: LatLngBounds);

    fn hide_selection(&mut self);

    /// Opens the download popup; closing it must be reported via
    /// `Viewer::on_popup_closed(popup)`.
    fn open_download_popup(&mut self, popup: PopupId, at: LatLng, link: &DownloadLink);
}

pub trait Controls {
    fn set_nav_state(&mut self, nav: NavState);
    fn set_date_label(&mut self, label: &str);
}
