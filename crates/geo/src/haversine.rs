//! Great-circle distance on a spherical Earth.

use crate::Coordinate;

/// Mean Earth radius used by every distance in the crate.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
///
/// No range validation happens here; any finite input yields a finite,
/// non-negative result, and identical points yield exactly zero.
///
/// # Example
/// ```
/// use geocatalog_geo::{haversine_distance, Coordinate};
///
/// let sao_paulo = Coordinate::new(-23.5505, -46.6333);
/// let rio = Coordinate::new(-22.9068, -43.1729);
///
/// let distance = haversine_distance(&sao_paulo, &rio);
/// assert!((distance - 361.0).abs() < 5.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // rounding can push `a` a hair outside [0, 1] for antipodal points
    2.0 * EARTH_RADIUS_KM * a.clamp(0.0, 1.0).sqrt().asin()
}

/// Distance in kilometers between `(lat1, lon1)` and `(lat2, lon2)`.
#[inline]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_distance(&Coordinate::new(lat1, lon1), &Coordinate::new(lat2, lon2))
}
