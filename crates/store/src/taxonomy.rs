//! Relational-style state and city tables.
//!
//! Two tables with unique constraints, mirroring:
//!
//! ```sql
//! states (id INTEGER PRIMARY KEY, name TEXT NOT NULL, uf TEXT NOT NULL UNIQUE)
//! cities (id INTEGER PRIMARY KEY, name TEXT NOT NULL, state_uf TEXT NOT NULL,
//!         UNIQUE(name, state_uf))
//! ```
//!
//! Inserts behave like `INSERT OR IGNORE`: a constraint violation or invalid
//! input returns `Ok(false)` and leaves the tables untouched.

use crate::persist;
use geocatalog_core::error::Result;
use geocatalog_core::validation::{normalize_uf, validate_city, validate_state};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A state as listed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Two-letter code
    pub uf: String,
    /// Display name
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateRow {
    id: u64,
    name: String,
    uf: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CityRow {
    id: u64,
    name: String,
    state_uf: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Tables {
    #[serde(default)]
    states: Vec<StateRow>,
    #[serde(default)]
    cities: Vec<CityRow>,
}

impl Tables {
    fn next_state_id(&self) -> u64 {
        self.states.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    fn next_city_id(&self) -> u64 {
        self.cities.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }
}

/// States and cities, optionally backed by a JSON file.
#[derive(Debug)]
pub struct TaxonomyStore {
    path: Option<PathBuf>,
    tables: Tables,
}

impl TaxonomyStore {
    /// Open the table file at `path`, creating an empty one if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tables = persist::load_or_init(&path)?;
        Ok(Self {
            path: Some(path),
            tables,
        })
    }

    /// A store that lives only as long as this value.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            tables: Tables::default(),
        }
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Insert a state. Returns `false` for an empty name, a malformed code
    /// or a code that already exists.
    pub fn insert_state(&mut self, name: &str, uf: &str) -> Result<bool> {
        let validation = validate_state(name, uf);
        if !validation.is_valid() {
            debug!(errors = %validation.summary(), "State rejected");
            return Ok(false);
        }

        let uf = normalize_uf(uf);
        if self.state_exists(&uf) {
            debug!(uf = %uf, "State already exists");
            return Ok(false);
        }

        let name = name.trim().to_string();
        self.commit(|tables| {
            let id = tables.next_state_id();
            tables.states.push(StateRow {
                id,
                name: name.clone(),
                uf: uf.clone(),
            });
        })?;

        info!(uf = %uf, name = %name, "State inserted");
        Ok(true)
    }

    /// Insert a city under an existing state. Returns `false` for an empty
    /// name, an unknown state or a duplicate `(name, uf)` pair.
    pub fn insert_city(&mut self, name: &str, uf: &str) -> Result<bool> {
        let validation = validate_city(name, uf);
        if !validation.is_valid() {
            debug!(errors = %validation.summary(), "City rejected");
            return Ok(false);
        }

        let uf = normalize_uf(uf);
        let name = name.trim().to_string();

        if !self.state_exists(&uf) {
            debug!(uf = %uf, "City rejected: state does not exist");
            return Ok(false);
        }
        if self
            .tables
            .cities
            .iter()
            .any(|c| c.state_uf == uf && c.name == name)
        {
            debug!(uf = %uf, city = %name, "City already exists");
            return Ok(false);
        }

        self.commit(|tables| {
            let id = tables.next_city_id();
            tables.cities.push(CityRow {
                id,
                name: name.clone(),
                state_uf: uf.clone(),
            });
        })?;

        info!(uf = %uf, city = %name, "City inserted");
        Ok(true)
    }

    /// All states ordered by name.
    pub fn list_states(&self) -> Vec<State> {
        let mut states: Vec<State> = self
            .tables
            .states
            .iter()
            .map(|r| State {
                uf: r.uf.clone(),
                name: r.name.clone(),
            })
            .collect();
        states.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.uf.cmp(&b.uf)));
        states
    }

    /// City names of the state `uf`, ordered by name.
    pub fn list_cities_by_state(&self, uf: &str) -> Vec<String> {
        let uf = normalize_uf(uf);
        let mut cities: Vec<String> = self
            .tables
            .cities
            .iter()
            .filter(|c| c.state_uf == uf)
            .map(|c| c.name.clone())
            .collect();
        cities.sort();
        cities
    }

    /// Whether a state with code `uf` exists.
    pub fn state_exists(&self, uf: &str) -> bool {
        let uf = normalize_uf(uf);
        self.tables.states.iter().any(|s| s.uf == uf)
    }

    /// Whether `city` is registered under `uf`. City names compare
    /// case-insensitively, as location lookups do.
    pub fn city_exists(&self, city: &str, uf: &str) -> bool {
        let uf = normalize_uf(uf);
        let city = city.trim().to_lowercase();
        self.tables
            .cities
            .iter()
            .any(|c| c.state_uf == uf && c.name.to_lowercase() == city)
    }

    fn commit(&mut self, change: impl FnOnce(&mut Tables)) -> Result<()> {
        let mut next = self.tables.clone();
        change(&mut next);
        if let Some(path) = &self.path {
            persist::save(path, &next)?;
        }
        self.tables = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_insert_state() {
        let mut store = TaxonomyStore::in_memory();
        assert!(store.insert_state("São Paulo", "sp").unwrap());
        assert!(store.state_exists("SP"));
    }

    #[test]
    fn test_empty_state_name_rejected() {
        let mut store = TaxonomyStore::in_memory();
        assert!(!store.insert_state("", "SP").unwrap());
        assert!(!store.insert_state("   ", "SP").unwrap());
        assert!(store.list_states().is_empty());
    }

    #[test]
    fn test_malformed_uf_rejected() {
        let mut store = TaxonomyStore::in_memory();
        assert!(!store.insert_state("Nowhere", "").unwrap());
        assert!(!store.insert_state("Nowhere", "XYZ").unwrap());
    }

    #[test]
    fn test_duplicate_state_ignored() {
        let mut store = TaxonomyStore::in_memory();
        assert!(store.insert_state("Pernambuco", "PE").unwrap());
        assert!(!store.insert_state("Pernambuco again", " pe ").unwrap());
        assert_eq!(store.list_states().len(), 1);
        assert_eq!(store.list_states()[0].name, "Pernambuco");
    }

    #[test]
    fn test_city_requires_state() {
        let mut store = TaxonomyStore::in_memory();
        assert!(!store.insert_city("Recife", "ZZ").unwrap());
        assert!(store.list_cities_by_state("ZZ").is_empty());
    }

    #[test]
    fn test_insert_city_and_duplicates() {
        let mut store = TaxonomyStore::in_memory();
        store.insert_state("Pernambuco", "PE").unwrap();

        assert!(store.insert_city(" Recife ", "pe").unwrap());
        assert!(!store.insert_city("Recife", "PE").unwrap());
        assert!(!store.insert_city("", "PE").unwrap());
        assert_eq!(store.list_cities_by_state("PE"), vec!["Recife".to_string()]);
    }

    #[test]
    fn test_same_city_name_in_two_states() {
        let mut store = TaxonomyStore::in_memory();
        store.insert_state("Pernambuco", "PE").unwrap();
        store.insert_state("Paraíba", "PB").unwrap();

        assert!(store.insert_city("Bonito", "PE").unwrap());
        assert!(store.insert_city("Bonito", "PB").unwrap());
    }

    #[test]
    fn test_listing_is_ordered_by_name() {
        let mut store = TaxonomyStore::in_memory();
        store.insert_state("São Paulo", "SP").unwrap();
        store.insert_state("Bahia", "BA").unwrap();
        store.insert_state("Pernambuco", "PE").unwrap();
        store.insert_city("Olinda", "PE").unwrap();
        store.insert_city("Caruaru", "PE").unwrap();

        let names: Vec<_> = store.list_states().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["Bahia", "Pernambuco", "São Paulo"]);
        assert_eq!(store.list_cities_by_state("pe"), ["Caruaru", "Olinda"]);
    }

    #[test]
    fn test_city_exists_case_insensitive() {
        let mut store = TaxonomyStore::in_memory();
        store.insert_state("São Paulo", "SP").unwrap();
        store.insert_city("São Paulo", "SP").unwrap();

        assert!(store.city_exists("são paulo", "sp"));
        assert!(!store.city_exists("Campinas", "SP"));
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("taxonomy.json");

        {
            let mut store = TaxonomyStore::open(&path).unwrap();
            store.insert_state("Pernambuco", "PE").unwrap();
            store.insert_city("Recife", "PE").unwrap();
        }

        let store = TaxonomyStore::open(&path).unwrap();
        assert!(store.state_exists("PE"));
        assert_eq!(store.list_cities_by_state("PE"), ["Recife"]);
    }

    #[test]
    fn test_ids_increment() {
        let mut store = TaxonomyStore::in_memory();
        store.insert_state("Acre", "AC").unwrap();
        store.insert_state("Alagoas", "AL").unwrap();

        let ids: Vec<u64> = store.tables.states.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2]);
    }
}
