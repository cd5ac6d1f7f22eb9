use foundation::LatLngBounds;

use crate::request::CoverageTicket;

/// A coverage lookup for one viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageQuery {
    pub ticket: CoverageTicket,
    pub bounds: LatLngBounds,
}

impl CoverageQuery {
    pub fn new(ticket: CoverageTicket, bounds: LatLngBounds) -> Self {
        Self { ticket, bounds }
    }

    /// `{path}?minlon=&minlat=&maxlon=&maxlat=` for the viewport.
    pub fn url(&self, path: &str) -> String {
        let b = &self.bounds;
        format!(
            "{path}?minlon={}&minlat={}&maxlon={}&maxlat={}",
            b.west(),
            b.south(),
            b.east(),
            b.north()
        )
    }
}
