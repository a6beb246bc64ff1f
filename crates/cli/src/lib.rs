//! Presentation layer for geocatalog
//!
//! Provides:
//! - Status messages and number formatting
//! - Plain-text tables for states, cities and locations
//! - GeoJSON and HTML (Leaflet) map output

#![warn(missing_docs)]

pub mod map;
pub mod output;
pub mod table;
