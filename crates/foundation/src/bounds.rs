use serde::{Deserialize, Serialize};

/// Geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Position in projected pixel space (origin top-left, y grows southwards).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned geographic bounding box.
///
/// Always normalised: `south <= north` and `west <= east`, whatever order the
/// corners were supplied in.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLngBounds {
    south_west: LatLng,
    north_east: LatLng,
}

impl LatLngBounds {
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// Degenerate box at a single point.
    pub fn point(p: LatLng) -> Self {
        Self::from_corners(p, p)
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn south_west(&self) -> LatLng {
        self.south_west
    }

    pub fn north_east(&self) -> LatLng {
        self.north_east
    }

    pub fn north_west(&self) -> LatLng {
        LatLng::new(self.north(), self.west())
    }

    pub fn south_east(&self) -> LatLng {
        LatLng::new(self.south(), self.east())
    }

    /// Midpoint of the latitude and longitude ranges (not the projected centre).
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south() + self.north()) / 2.0,
            (self.west() + self.east()) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{LatLng, LatLngBounds, Point};

    #[test]
    fn corners_are_normalised() {
        let b = LatLngBounds::from_corners(LatLng::new(-33.0, 151.2), LatLng::new(-34.0, 151.1));
        assert_eq!(b.south(), -34.0);
        assert_eq!(b.north(), -33.0);
        assert_eq!(b.west(), 151.1);
        assert_eq!(b.east(), 151.2);
        assert_eq!(b.north_west(), LatLng::new(-33.0, 151.1));
        assert_eq!(b.south_east(), LatLng::new(-34.0, 151.2));
    }

    #[test]
    fn center_is_midpoint_of_ranges() {
        let b = LatLngBounds::from_corners(LatLng::new(10.0, 20.0), LatLng::new(20.0, 40.0));
        assert_eq!(b.center(), LatLng::new(15.0, 30.0));
    }

    #[test]
    fn point_arithmetic() {
        let p = Point::new(10.0, 20.0) - Point::new(2.5, 5.0) + Point::new(0.1, 0.6);
        assert_eq!(p.round(), Point::new(8.0, 16.0));
    }
}
