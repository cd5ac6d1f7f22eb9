use crate::bounds::{LatLng, Point};

/// Sphere radius used by the spherical (Web) Mercator projection (meters).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;
/// Latitude limit at which the projected world becomes square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;
/// Edge length of one tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

const TRANSFORM_SCALE: f64 = 0.5 / (std::f64::consts::PI * EARTH_RADIUS_M);

/// Pixel extent of the whole world at `zoom`.
pub fn world_scale(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Projects a geographic position into pixel space at `zoom`.
///
/// Pixel space matches the slippy-map tile grid: `(0, 0)` is the north-west
/// corner of the world and tile `(x, y)` covers `[x*256, (x+1)*256)`.
pub fn project(latlng: LatLng, zoom: f64) -> Point {
    let d = std::f64::consts::PI / 180.0;
    let lat = latlng.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin = (lat * d).sin();

    let mx = EARTH_RADIUS_M * latlng.lng * d;
    let my = EARTH_RADIUS_M * ((1.0 + sin) / (1.0 - sin)).ln() / 2.0;

    let scale = world_scale(zoom);
    Point::new(
        scale * (TRANSFORM_SCALE * mx + 0.5),
        scale * (-TRANSFORM_SCALE * my + 0.5),
    )
}

/// Inverse of [`project`].
pub fn unproject(point: Point, zoom: f64) -> LatLng {
    let d = 180.0 / std::f64::consts::PI;
    let scale = world_scale(zoom);

    let mx = (point.x / scale - 0.5) / TRANSFORM_SCALE;
    let my = (point.y / scale - 0.5) / -TRANSFORM_SCALE;

    LatLng::new(
        (2.0 * (my / EARTH_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2) * d,
        mx * d / EARTH_RADIUS_M,
    )
}

#[cfg(test)]
mod tests {
    use super::{MAX_LATITUDE, project, unproject};
    use crate::bounds::{LatLng, Point};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn origin_projects_to_world_centre() {
        let p = project(LatLng::new(0.0, 0.0), 0.0);
        assert_close(p.x, 128.0, 1e-9);
        assert_close(p.y, 128.0, 1e-9);
    }

    #[test]
    fn antimeridian_and_pole_limit_hit_world_edges() {
        let ne = project(LatLng::new(MAX_LATITUDE, 180.0), 1.0);
        assert_close(ne.x, 512.0, 1e-6);
        assert_close(ne.y, 0.0, 1e-6);

        let sw = project(LatLng::new(-MAX_LATITUDE, -180.0), 1.0);
        assert_close(sw.x, 0.0, 1e-6);
        assert_close(sw.y, 512.0, 1e-6);
    }

    #[test]
    fn latitude_is_clamped() {
        let a = project(LatLng::new(89.9, 10.0), 3.0);
        let b = project(LatLng::new(MAX_LATITUDE, 10.0), 3.0);
        assert_close(a.y, b.y, 1e-9);
    }

    #[test]
    fn round_trip_at_display_zoom() {
        let sydney = LatLng::new(-33.888, 151.16);
        let px = project(sydney, 20.0);
        let back = unproject(px, 20.0);
        assert_close(back.lat, sydney.lat, 1e-9);
        assert_close(back.lng, sydney.lng, 1e-9);
    }

    #[test]
    fn sydney_lands_in_expected_tile() {
        // Tile 1883/1229 at zoom 11 covers inner-west Sydney.
        let px = project(LatLng::new(-33.888, 151.16), 11.0);
        assert_eq!((px.x / 256.0).floor(), 1883.0);
        assert_eq!((px.y / 256.0).floor(), 1229.0);
        let back = unproject(Point::new(1883.0 * 256.0, 1229.0 * 256.0), 11.0);
        assert!(back.lng <= 151.16 && back.lat >= -33.888);
    }
}
