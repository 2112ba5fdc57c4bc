// SPDX-License-Identifier: MPL-2.0
//! Web Mercator projection for 256 px slippy-map tiles.
//!
//! World coordinates are pixels at a given zoom level: the whole world is a
//! square of `256 * 2^zoom` pixels with the origin at the north-west corner.

use crate::domain::geo::{GeoPoint, ZoomLevel};
use std::f64::consts::PI;

/// Edge length of one raster tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Northern/southern limit of the square Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// A position in world pixels at a given zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

/// Size of the world square in pixels at `zoom`.
#[must_use]
pub fn world_size(zoom: ZoomLevel) -> f64 {
    TILE_SIZE * f64::from(1u32 << zoom.value())
}

/// Projects a geographic point into world pixels.
#[must_use]
pub fn project(point: GeoPoint, zoom: ZoomLevel) -> WorldPoint {
    let size = world_size(zoom);
    let lat = point.latitude().clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.longitude() + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    WorldPoint { x, y }
}

/// Converts world pixels back into a geographic point.
///
/// `y` is clamped to the world square, which keeps latitude within the
/// Mercator limit. `x` wraps around the antimeridian so longitude always
/// lands in [-180, 180).
#[must_use]
pub fn unproject(world: WorldPoint, zoom: ZoomLevel) -> GeoPoint {
    let size = world_size(zoom);
    let x = world.x.rem_euclid(size);
    let y = world.y.clamp(0.0, size);

    let longitude = x / size * 360.0 - 180.0;
    let n = PI - 2.0 * PI * y / size;
    let latitude = n.sinh().atan().to_degrees();

    GeoPoint::clamped(latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE), longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, COORD_EPSILON};

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).expect("valid point")
    }

    #[test]
    fn world_size_doubles_per_zoom_level() {
        assert_eq!(world_size(ZoomLevel::new(2)), 1024.0);
        assert_eq!(world_size(ZoomLevel::new(3)), 2048.0);
    }

    #[test]
    fn origin_projects_to_world_center() {
        let zoom = ZoomLevel::new(4);
        let world = project(point(0.0, 0.0), zoom);
        let half = world_size(zoom) / 2.0;
        assert_abs_diff_eq!(world.x, half, epsilon = 1e-9);
        assert_abs_diff_eq!(world.y, half, epsilon = 1e-9);
    }

    #[test]
    fn projection_round_trips_within_precision() {
        let zoom = ZoomLevel::new(12);
        let original = point(40.75, -73.99);
        let back = unproject(project(original, zoom), zoom);
        assert_abs_diff_eq!(back.latitude(), 40.75, epsilon = COORD_EPSILON);
        assert_abs_diff_eq!(back.longitude(), -73.99, epsilon = COORD_EPSILON);
    }

    #[test]
    fn unproject_clamps_latitude_to_mercator_limit() {
        let zoom = ZoomLevel::new(2);
        let north = unproject(WorldPoint { x: 0.0, y: -500.0 }, zoom);
        let south = unproject(WorldPoint { x: 0.0, y: 1e6 }, zoom);
        assert_abs_diff_eq!(north.latitude(), MAX_LATITUDE, epsilon = 1e-6);
        assert_abs_diff_eq!(south.latitude(), -MAX_LATITUDE, epsilon = 1e-6);
    }

    #[test]
    fn unproject_wraps_longitude() {
        let zoom = ZoomLevel::new(2);
        let size = world_size(zoom);
        let east = unproject(WorldPoint { x: size + size / 4.0, y: size / 2.0 }, zoom);
        assert_abs_diff_eq!(east.longitude(), -90.0, epsilon = COORD_EPSILON);

        let west = unproject(WorldPoint { x: -size / 4.0, y: size / 2.0 }, zoom);
        assert_abs_diff_eq!(west.longitude(), 90.0, epsilon = COORD_EPSILON);
    }
}
