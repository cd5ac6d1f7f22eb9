use foundation::math::{project, unproject};
use foundation::{LatLng, LatLngBounds, Point};

use crate::resolution::Resolution;

/// Geographic box covering `xres` x `yres` pixels at `zoom`, centred on `center`.
pub fn crop_bounds(center: LatLng, resolution: &Resolution, zoom: f64) -> LatLngBounds {
    let xres = f64::from(resolution.xres());
    let yres = f64::from(resolution.yres());

    let xy = project(center, zoom);
    let nw = xy - Point::new(xres / 2.0, yres / 2.0);
    let se = nw + Point::new(xres, yres);
    LatLngBounds::from_corners(unproject(nw, zoom), unproject(se, zoom))
}

/// The rectangle that follows the pointer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CursorRect {
    bounds: LatLngBounds,
}

impl Default for CursorRect {
    fn default() -> Self {
        Self {
            bounds: LatLngBounds::point(LatLng::new(0.0, 0.0)),
        }
    }
}

impl CursorRect {
    pub fn bounds(&self) -> LatLngBounds {
        self.bounds
    }

    pub fn center(&self) -> LatLng {
        self.bounds.center()
    }

    pub fn move_to(&mut self, center: LatLng, resolution: &Resolution, zoom: f64) -> LatLngBounds {
        self.bounds = crop_bounds(center, resolution, zoom);
        self.bounds
    }
}
