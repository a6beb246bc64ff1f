//! Radius search over location documents.
//!
//! Every document goes through the parse step in [`LocationDocument::to_entity`].
//! Documents whose coordinates are missing or malformed are skipped: a bad
//! document in the store is a data-quality issue and must not fail the query.

use crate::{haversine_distance, round_to, Coordinate, LocatedEntity, LocationDocument};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Decimal places kept on `distance_km`.
const DISTANCE_DECIMALS: i32 = 3;

/// A located entity annotated with its distance to the search center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    /// The matched entity
    #[serde(flatten)]
    pub entity: LocatedEntity,
    /// Distance to the center in kilometers, rounded to 3 decimals
    pub distance_km: f64,
}

impl AsRef<LocatedEntity> for DistanceRecord {
    fn as_ref(&self) -> &LocatedEntity {
        &self.entity
    }
}

/// Returns the documents within `radius_km` of `(center_lat, center_lon)`.
///
/// Output is sorted by ascending distance; documents at exactly the same
/// distance keep their input order. A negative or NaN radius yields nothing.
///
/// # Example
/// ```
/// use geocatalog_geo::{filter_by_radius, Coordinate, LocationDocument};
///
/// let docs = vec![
///     LocationDocument::new("A", "Null", "XX", Coordinate::new(0.0, 0.0), ""),
///     LocationDocument::new("B", "Null", "XX", Coordinate::new(0.0, 1.0), ""),
///     LocationDocument::new("C", "Null", "XX", Coordinate::new(10.0, 10.0), ""),
/// ];
///
/// let found = filter_by_radius(&docs, 0.0, 0.0, 150.0);
/// let names: Vec<_> = found.iter().map(|r| r.entity.name.as_str()).collect();
/// assert_eq!(names, ["A", "B"]);
/// ```
pub fn filter_by_radius(
    documents: &[LocationDocument],
    center_lat: f64,
    center_lon: f64,
    radius_km: f64,
) -> Vec<DistanceRecord> {
    filter_by_radius_from(documents, &Coordinate::new(center_lat, center_lon), radius_km)
}

/// Same as [`filter_by_radius`] with a [`Coordinate`] center.
pub fn filter_by_radius_from(
    documents: &[LocationDocument],
    center: &Coordinate,
    radius_km: f64,
) -> Vec<DistanceRecord> {
    if radius_km.is_nan() || radius_km < 0.0 {
        return Vec::new();
    }

    let mut within: Vec<(f64, LocatedEntity)> = documents
        .iter()
        .filter_map(|doc| match doc.to_entity() {
            Ok(entity) => Some(entity),
            Err(err) => {
                debug!(name = %doc.name, error = %err, "Skipping location without usable coordinates");
                None
            }
        })
        .map(|entity| (haversine_distance(center, &entity.coordinate), entity))
        .filter(|(distance, _)| *distance <= radius_km)
        .collect();

    // sort_by is stable, so equal distances keep input order
    within.sort_by(|a, b| a.0.total_cmp(&b.0));

    within
        .into_iter()
        .map(|(distance, entity)| DistanceRecord {
            entity,
            distance_km: round_to(distance, DISTANCE_DECIMALS),
        })
        .collect()
}
