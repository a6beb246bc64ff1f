//! Straight-line distance between two named entities of a result set.

use crate::{haversine_distance, round_to, LocatedEntity};
use serde::Serialize;
use std::fmt;

/// Why a pair distance was not computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "name", rename_all = "snake_case")]
pub enum NotComputedReason {
    /// Both names are the same
    SameEntity,
    /// The named entity is not in the set
    Missing(String),
}

/// Outcome of [`pair_distance`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairDistance {
    /// Distance between the two entities, rounded to 2 decimals
    Computed {
        /// First entity name
        from: String,
        /// Second entity name
        to: String,
        /// Kilometers
        distance_km: f64,
    },
    /// No computation performed
    NotComputed {
        /// Cause
        #[serde(flatten)]
        reason: NotComputedReason,
    },
}

impl PairDistance {
    /// Distance if one was computed
    pub fn distance_km(&self) -> Option<f64> {
        match self {
            PairDistance::Computed { distance_km, .. } => Some(*distance_km),
            PairDistance::NotComputed { .. } => None,
        }
    }
}

impl fmt::Display for PairDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairDistance::Computed { from, to, distance_km } => {
                write!(f, "{} -> {}: {:.2} km", from, to, distance_km)
            }
            PairDistance::NotComputed { reason: NotComputedReason::SameEntity } => {
                write!(f, "No computation performed: choose two different locations")
            }
            PairDistance::NotComputed { reason: NotComputedReason::Missing(name) } => {
                write!(f, "No computation performed: '{}' is not in the result set", name)
            }
        }
    }
}

/// Distance between the entities named `from` and `to` in `entities`.
///
/// Names are matched exactly and the first match wins. The two names must be
/// distinct and both present; otherwise the result is
/// [`PairDistance::NotComputed`], never an error.
///
/// Accepts plain entities or radius search records.
pub fn pair_distance<E: AsRef<LocatedEntity>>(entities: &[E], from: &str, to: &str) -> PairDistance {
    if from == to {
        return PairDistance::NotComputed {
            reason: NotComputedReason::SameEntity,
        };
    }

    let find = |name: &str| {
        entities
            .iter()
            .map(AsRef::as_ref)
            .find(|entity| entity.name == name)
    };

    let (a, b) = match (find(from), find(to)) {
        (Some(a), Some(b)) => (a, b),
        (None, _) => {
            return PairDistance::NotComputed {
                reason: NotComputedReason::Missing(from.to_string()),
            };
        }
        (_, None) => {
            return PairDistance::NotComputed {
                reason: NotComputedReason::Missing(to.to_string()),
            };
        }
    };

    PairDistance::Computed {
        from: a.name.clone(),
        to: b.name.clone(),
        distance_km: round_to(haversine_distance(&a.coordinate, &b.coordinate), 2),
    }
}

impl AsRef<LocatedEntity> for LocatedEntity {
    fn as_ref(&self) -> &LocatedEntity {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filter_by_radius, Coordinate, LocationDocument};

    fn entity(name: &str, lat: f64, lon: f64) -> LocatedEntity {
        LocationDocument::new(name, "Recife", "PE", Coordinate::new(lat, lon), "")
            .to_entity()
            .unwrap()
    }

    #[test]
    fn test_computed_distance_rounded() {
        let set = vec![entity("A", 0.0, 0.0), entity("B", 0.0, 1.0)];
        let report = pair_distance(&set, "A", "B");

        assert_eq!(report.distance_km(), Some(111.19));
        assert_eq!(report.to_string(), "A -> B: 111.19 km");
    }

    #[test]
    fn test_symmetric() {
        let set = vec![entity("A", -8.05, -34.9), entity("B", -7.12, -34.86)];
        assert_eq!(
            pair_distance(&set, "A", "B").distance_km(),
            pair_distance(&set, "B", "A").distance_km()
        );
    }

    #[test]
    fn test_same_name_not_computed() {
        let set = vec![entity("A", 0.0, 0.0)];
        assert_eq!(
            pair_distance(&set, "A", "A"),
            PairDistance::NotComputed { reason: NotComputedReason::SameEntity }
        );
    }

    #[test]
    fn test_missing_name_not_computed() {
        let set = vec![entity("A", 0.0, 0.0)];
        let report = pair_distance(&set, "A", "Z");

        assert_eq!(
            report,
            PairDistance::NotComputed { reason: NotComputedReason::Missing("Z".to_string()) }
        );
        assert!(report.to_string().starts_with("No computation performed"));
    }

    #[test]
    fn test_works_on_radius_records() {
        let docs = vec![
            LocationDocument::new("A", "X", "XX", Coordinate::new(0.0, 0.0), ""),
            LocationDocument::new("B", "X", "XX", Coordinate::new(0.0, 0.5), ""),
        ];
        let records = filter_by_radius(&docs, 0.0, 0.0, 100.0);

        assert!(pair_distance(&records, "A", "B").distance_km().is_some());
    }

    #[test]
    fn test_serialized_shape() {
        let set = vec![entity("A", 0.0, 0.0)];
        let value = serde_json::to_value(pair_distance(&set, "A", "Q")).unwrap();

        assert_eq!(value["status"], "not_computed");
        assert_eq!(value["reason"], "missing");
        assert_eq!(value["name"], "Q");
    }
}
