//! Great-circle distance between two points on the earth's surface.

use crate::Coordinates;

/// Mean earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance in miles between two decimal-degree coordinates.
///
/// The result is symmetric in its arguments and exactly `0.0` for identical
/// points.
#[must_use]
pub fn distance_miles(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let half_dlat = (b.lat - a.lat).to_radians() / 2.0;
    let half_dlon = (b.lon - a.lon).to_radians() / 2.0;

    let h = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_MILES * h.sqrt().asin()
}
