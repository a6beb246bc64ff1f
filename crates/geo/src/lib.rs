//! Geospatial core for geocatalog.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Parsing of stored location documents into typed entities
//! - Radius search over a set of location documents
//! - Distance between two named entities of a result set
//!
//! # Example
//!
//! ```
//! use geocatalog_geo::{haversine_distance, Coordinate};
//!
//! let recife = Coordinate::new(-8.0476, -34.8770);
//! let olinda = Coordinate::new(-8.0089, -34.8553);
//!
//! let distance_km = haversine_distance(&recife, &olinda);
//! assert!((distance_km - 4.9).abs() < 0.5);
//! ```

mod document;
mod error;
mod haversine;
mod pair;
pub mod radius;

pub use document::{parse_coordinates, LocatedEntity, LocationDocument};
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{distance, haversine_distance, EARTH_RADIUS_KM};
pub use pair::{pair_distance, NotComputedReason, PairDistance};
pub use radius::{filter_by_radius, filter_by_radius_from, DistanceRecord};

/// A point in decimal degrees. Serializes as `{"latitude": .., "longitude": ..}`,
/// the shape location documents store.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Degrees north, -90 to 90
    pub latitude: f64,
    /// Degrees east, -180 to 180
    pub longitude: f64,
}

impl Coordinate {
    /// Unchecked; see [`Coordinate::is_valid`].
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if both components are finite and within bounds.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// `(lat, lon)` in radians
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Rounds `value` to `decimals` decimal places, half away from zero.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
