//! CLI command implementations

pub mod locations;
pub mod map;
pub mod search;
pub mod taxonomy;

use clap::{Args, ValueEnum};
use geocatalog_core::config::Config;
use geocatalog_core::error::Error;
use geocatalog_geo::Coordinate;
use geocatalog_store::Catalog;
use serde::Serialize;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables and messages
    Text,
    /// One JSON document on stdout
    Json,
}

/// Everything a command needs
pub struct Context {
    pub catalog: Catalog,
    pub config: Config,
    pub format: OutputFormat,
}

impl Context {
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Explicit radius, or the configured default.
    pub fn radius(&self, radius: Option<f64>) -> f64 {
        radius.unwrap_or(self.config.schema.search.default_radius_km)
    }
}

/// Search center: explicit coordinates or a stored location
#[derive(Debug, Args)]
pub struct CenterArgs {
    /// Center latitude
    #[arg(long, allow_hyphen_values = true, requires = "lon", conflicts_with = "from")]
    pub lat: Option<f64>,

    /// Center longitude
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lon: Option<f64>,

    /// Use the named location of the city as the center
    #[arg(long)]
    pub from: Option<String>,
}

impl CenterArgs {
    /// Resolve to a coordinate, or `None` when no center was given.
    pub fn resolve(&self, catalog: &Catalog, city: &str, state: &str) -> anyhow::Result<Option<Coordinate>> {
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            return Ok(Some(Coordinate::new(lat, lon)));
        }
        match &self.from {
            Some(name) => catalog
                .find_location(city, state, name)
                .map(|entity| Some(entity.coordinate))
                .ok_or_else(|| anyhow::Error::from(Error::location_not_found(name, city, state))),
            None => Ok(None),
        }
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
