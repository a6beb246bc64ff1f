//! Joins the taxonomy tables and the location documents.
//!
//! The shared key is the state code plus the city name: locations carry
//! both as plain text, the taxonomy holds the registered pairs.

use crate::{LocationStore, TaxonomyStore};
use geocatalog_core::config::Config;
use geocatalog_core::error::{Result, ResultExt};
use geocatalog_geo::{
    filter_by_radius_from, pair_distance, Coordinate, DistanceRecord, LocatedEntity,
    LocationDocument, PairDistance,
};
use tracing::debug;

/// Outcome of [`Catalog::add_location`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Stored under this id
    Inserted(String),
    /// Failed field or coordinate validation
    Invalid,
    /// The city/state pair is not registered and registration is required
    UnknownCity,
}

/// Both stores plus the insert policy from configuration.
#[derive(Debug)]
pub struct Catalog {
    /// State and city tables
    pub taxonomy: TaxonomyStore,
    /// Point-of-interest documents
    pub locations: LocationStore,
    require_registered_city: bool,
}

impl Catalog {
    /// Open both store files named by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self {
            taxonomy: TaxonomyStore::open(config.taxonomy_path())
                .context("opening the taxonomy store")?,
            locations: LocationStore::open(config.locations_path())
                .context("opening the location store")?,
            require_registered_city: config.schema.validation.require_registered_city,
        })
    }

    /// Two in-memory stores with no city registration check.
    pub fn in_memory() -> Self {
        Self {
            taxonomy: TaxonomyStore::in_memory(),
            locations: LocationStore::in_memory(),
            require_registered_city: false,
        }
    }

    /// Toggle the city registration check on inserts.
    pub fn with_registered_city_check(mut self, required: bool) -> Self {
        self.require_registered_city = required;
        self
    }

    /// Insert a location, checking the taxonomy first when configured to.
    pub fn add_location(
        &mut self,
        name: &str,
        city: &str,
        state: &str,
        latitude: f64,
        longitude: f64,
        description: &str,
    ) -> Result<InsertOutcome> {
        if self.require_registered_city && !self.taxonomy.city_exists(city, state) {
            debug!(city = %city, state = %state, "Location rejected: city not registered");
            return Ok(InsertOutcome::UnknownCity);
        }

        Ok(self
            .locations
            .insert_location(name, city, state, latitude, longitude, description)?
            .map_or(InsertOutcome::Invalid, InsertOutcome::Inserted))
    }

    /// Location documents of one city.
    pub fn locations_in(&self, city: &str, state: &str) -> Vec<LocationDocument> {
        self.locations.list_by_city_state(city, state)
    }

    /// First location named `name` in the city that has usable coordinates.
    pub fn find_location(&self, city: &str, state: &str, name: &str) -> Option<LocatedEntity> {
        self.locations_in(city, state)
            .iter()
            .filter(|doc| doc.name == name)
            .find_map(|doc| doc.to_entity().ok())
    }

    /// Locations of a city within `radius_km` of `center`, nearest first.
    pub fn nearby(
        &self,
        city: &str,
        state: &str,
        center: &Coordinate,
        radius_km: f64,
    ) -> Vec<DistanceRecord> {
        filter_by_radius_from(&self.locations_in(city, state), center, radius_km)
    }

    /// Distance between two named locations of a city.
    pub fn pair_distance(&self, city: &str, state: &str, from: &str, to: &str) -> PairDistance {
        let entities: Vec<LocatedEntity> = self
            .locations_in(city, state)
            .iter()
            .filter_map(|doc| doc.to_entity().ok())
            .collect();
        pair_distance(&entities, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocatalog_core::config::ConfigSchema;
    use tempfile::TempDir;

    fn recife() -> Catalog {
        let mut catalog = Catalog::in_memory();
        catalog.taxonomy.insert_state("Pernambuco", "PE").unwrap();
        catalog.taxonomy.insert_city("Recife", "PE").unwrap();
        for (name, lat, lon) in [
            ("Marco Zero", -8.0631, -34.8711),
            ("Paço do Frevo", -8.0616, -34.8717),
            ("Instituto Ricardo Brennand", -8.0676, -34.9616),
        ] {
            catalog
                .add_location(name, "Recife", "PE", lat, lon, "")
                .unwrap();
        }
        catalog
    }

    #[test]
    fn test_nearby_joins_on_city_and_state() {
        let mut catalog = recife();
        catalog
            .add_location("Elsewhere", "Olinda", "PE", -8.0631, -34.8711, "")
            .unwrap();

        let center = Coordinate::new(-8.0631, -34.8711);
        let results = catalog.nearby("recife", "pe", &center, 1.0);

        let names: Vec<_> = results.iter().map(|r| r.entity.name.as_str()).collect();
        assert_eq!(names, ["Marco Zero", "Paço do Frevo"]);
    }

    #[test]
    fn test_find_location() {
        let catalog = recife();
        let found = catalog.find_location("Recife", "PE", "Paço do Frevo").unwrap();
        assert_eq!(found.coordinate, Coordinate::new(-8.0616, -34.8717));
        assert!(catalog.find_location("Recife", "PE", "Nope").is_none());
    }

    #[test]
    fn test_pair_distance() {
        let catalog = recife();
        let report = catalog.pair_distance("Recife", "PE", "Marco Zero", "Instituto Ricardo Brennand");
        let km = report.distance_km().unwrap();
        assert!((km - 9.9).abs() < 0.5, "distance {}", km);

        let missing = catalog.pair_distance("Recife", "PE", "Marco Zero", "Nope");
        assert!(missing.distance_km().is_none());
    }

    #[test]
    fn test_registered_city_required() {
        let mut catalog = recife().with_registered_city_check(true);

        assert_eq!(
            catalog.add_location("Farol", "Olinda", "PE", -8.01, -34.85, "").unwrap(),
            InsertOutcome::UnknownCity
        );
        assert!(matches!(
            catalog.add_location("Farol", "recife", "pe", -8.06, -34.87, "").unwrap(),
            InsertOutcome::Inserted(_)
        ));
    }

    #[test]
    fn test_invalid_location_outcome() {
        let mut catalog = Catalog::in_memory();
        assert_eq!(
            catalog.add_location("Farol", "Recife", "PE", 100.0, -34.8, "...").unwrap(),
            InsertOutcome::Invalid
        );
    }

    #[test]
    fn test_open_from_config() {
        let temp = TempDir::new().unwrap();
        let mut schema = ConfigSchema::default();
        schema.storage.data_dir = temp.path().to_string_lossy().into_owned();
        schema.validation.require_registered_city = true;
        let config = Config::from_schema(schema);

        let mut catalog = Catalog::open(&config).unwrap();
        assert_eq!(
            catalog.add_location("Farol", "Recife", "PE", -8.06, -34.87, "").unwrap(),
            InsertOutcome::UnknownCity
        );
        assert!(config.taxonomy_path().exists());
        assert!(config.locations_path().exists());
    }
}
