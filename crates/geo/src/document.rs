//! Location documents and the parse step that turns them into entities.
//!
//! A stored location looks like:
//!
//! ```json
//! {
//!   "id": "4b1c...",
//!   "name": "Marco Zero",
//!   "city": "Recife",
//!   "state": "PE",
//!   "coordinates": {"latitude": -8.0631, "longitude": -34.8711},
//!   "description": "Praça Rio Branco"
//! }
//! ```
//!
//! The document store gives no schema guarantees, so every field is read
//! leniently and coordinates stay untyped until [`LocationDocument::to_entity`]
//! parses them. Coordinate components may be JSON numbers or numeric strings.

use crate::{Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A location as held by the document store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationDocument {
    /// Store-assigned identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Point-of-interest name
    pub name: String,
    /// City name
    pub city: String,
    /// State code (UF)
    pub state: String,
    /// Raw `{"latitude": .., "longitude": ..}` object
    pub coordinates: Value,
    /// Free text
    pub description: String,
}

/// A location with parsed, in-bounds coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedEntity {
    /// Store-assigned identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Point-of-interest name
    pub name: String,
    /// City name
    pub city: String,
    /// Uppercase state code
    pub state: String,
    /// Position
    #[serde(rename = "coordinates")]
    pub coordinate: Coordinate,
    /// Free text
    pub description: String,
}

impl LocationDocument {
    /// Builds a document with a typed coordinate.
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        coordinate: Coordinate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            city: city.into(),
            state: state.into(),
            coordinates: coordinates_value(&coordinate),
            description: description.into(),
        }
    }

    /// Reads a document out of an arbitrary JSON value.
    ///
    /// Text fields that are missing or not strings become empty; only a
    /// non-object value is rejected.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or(GeoError::NotADocument)?;
        let text = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Ok(Self {
            id: object.get("id").and_then(Value::as_str).map(String::from),
            name: text("name"),
            city: text("city"),
            state: text("state"),
            coordinates: object.get("coordinates").cloned().unwrap_or(Value::Null),
            description: text("description"),
        })
    }

    /// Parses the coordinates of this document.
    pub fn coordinate(&self) -> Result<Coordinate> {
        parse_coordinates(&self.coordinates)
    }

    /// The fallible per-item parse step: succeeds only when the coordinates
    /// are present, numeric and in bounds.
    pub fn to_entity(&self) -> Result<LocatedEntity> {
        let coordinate = self.coordinate()?;
        Ok(LocatedEntity {
            id: self.id.clone(),
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.trim().to_uppercase(),
            coordinate,
            description: self.description.clone(),
        })
    }
}

impl From<&LocatedEntity> for LocationDocument {
    fn from(entity: &LocatedEntity) -> Self {
        Self {
            id: entity.id.clone(),
            ..Self::new(
                entity.name.clone(),
                entity.city.clone(),
                entity.state.clone(),
                entity.coordinate,
                entity.description.clone(),
            )
        }
    }
}

/// Nested JSON form of a coordinate.
pub(crate) fn coordinates_value(coordinate: &Coordinate) -> Value {
    serde_json::json!({
        "latitude": coordinate.latitude,
        "longitude": coordinate.longitude,
    })
}

/// Parses a `{"latitude": .., "longitude": ..}` object.
///
/// # Example
/// ```
/// use geocatalog_geo::parse_coordinates;
/// use serde_json::json;
///
/// let coord = parse_coordinates(&json!({"latitude": "-8.05", "longitude": -34.9})).unwrap();
/// assert_eq!(coord.latitude, -8.05);
///
/// assert!(parse_coordinates(&json!(null)).is_err());
/// ```
pub fn parse_coordinates(value: &Value) -> Result<Coordinate> {
    let object = value.as_object().ok_or(GeoError::MissingCoordinates)?;

    let latitude = parse_component(object.get("latitude"), "latitude")?;
    let longitude = parse_component(object.get("longitude"), "longitude")?;

    let coordinate = Coordinate::new(latitude, longitude);
    if !coordinate.is_valid() {
        return Err(GeoError::OutOfRange { latitude, longitude });
    }
    Ok(coordinate)
}

fn parse_component(value: Option<&Value>, field: &str) -> Result<f64> {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| GeoError::InvalidCoordinate(format!("{} is missing or not numeric", field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_numeric_coordinates() {
        let coord = parse_coordinates(&json!({"latitude": -8.0631, "longitude": -34.8711})).unwrap();
        assert_eq!(coord, Coordinate::new(-8.0631, -34.8711));
    }

    #[test]
    fn test_parse_string_coordinates() {
        let coord = parse_coordinates(&json!({"latitude": " -8.5 ", "longitude": "-35"})).unwrap();
        assert_eq!(coord, Coordinate::new(-8.5, -35.0));
    }

    #[test]
    fn test_parse_missing_component() {
        let err = parse_coordinates(&json!({"latitude": 1.0})).unwrap_err();
        assert!(matches!(err, GeoError::InvalidCoordinate(_)));
    }

    #[test]
    fn test_parse_non_numeric_component() {
        let err = parse_coordinates(&json!({"latitude": "north", "longitude": 2.0})).unwrap_err();
        assert!(matches!(err, GeoError::InvalidCoordinate(_)));

        let err = parse_coordinates(&json!({"latitude": "NaN", "longitude": 2.0})).unwrap_err();
        assert!(matches!(err, GeoError::InvalidCoordinate(_)));
    }

    #[test]
    fn test_parse_out_of_range() {
        let err = parse_coordinates(&json!({"latitude": 100.0, "longitude": -34.8})).unwrap_err();
        assert_eq!(err.code(), crate::GeoErrorCode::OutOfRange);
    }

    #[test]
    fn test_parse_null_coordinates() {
        assert_eq!(parse_coordinates(&Value::Null), Err(GeoError::MissingCoordinates));
    }

    #[test]
    fn test_document_from_value_is_lenient() {
        let doc = LocationDocument::from_value(&json!({
            "name": "Marco Zero",
            "city": 42,
            "state": "pe",
        }))
        .unwrap();

        assert_eq!(doc.name, "Marco Zero");
        assert_eq!(doc.city, "");
        assert!(doc.coordinates.is_null());
        assert!(doc.to_entity().is_err());
    }

    #[test]
    fn test_document_from_non_object() {
        assert_eq!(
            LocationDocument::from_value(&json!([1, 2])),
            Err(GeoError::NotADocument)
        );
    }

    #[test]
    fn test_to_entity_normalizes_state() {
        let doc = LocationDocument::new("Farol", "Recife", " pe", Coordinate::new(-8.06, -34.87), "");
        let entity = doc.to_entity().unwrap();
        assert_eq!(entity.state, "PE");
        assert_eq!(entity.coordinate, Coordinate::new(-8.06, -34.87));
    }

    #[test]
    fn test_entity_serializes_nested_coordinates() {
        let doc = LocationDocument::new("Farol", "Recife", "PE", Coordinate::new(-8.06, -34.87), "");
        let value = serde_json::to_value(doc.to_entity().unwrap()).unwrap();
        assert_eq!(value["coordinates"]["latitude"], json!(-8.06));
        assert!(value.get("id").is_none());
    }
}
