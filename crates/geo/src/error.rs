//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur while turning a stored document into an entity.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoError {
    /// The document has no usable coordinates object
    #[error("Missing coordinates")]
    MissingCoordinates,

    /// A coordinate component is absent or not numeric
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Coordinates parsed but fall outside geographic bounds
    #[error("Coordinate out of range: ({latitude}, {longitude})")]
    OutOfRange {
        /// Parsed latitude
        latitude: f64,
        /// Parsed longitude
        longitude: f64,
    },

    /// The stored value is not a JSON object
    #[error("Not a location document")]
    NotADocument,
}

/// Error code for integration with geocatalog-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Missing coordinates object
    MissingCoordinates = 10001,
    /// Non-numeric coordinate component
    InvalidCoordinate = 10002,
    /// Out-of-range coordinate
    OutOfRange = 10003,
    /// Value is not an object
    NotADocument = 10004,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::MissingCoordinates => GeoErrorCode::MissingCoordinates,
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::OutOfRange { .. } => GeoErrorCode::OutOfRange,
            GeoError::NotADocument => GeoErrorCode::NotADocument,
        }
    }
}
