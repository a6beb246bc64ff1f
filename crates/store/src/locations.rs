//! Point-of-interest document collection.
//!
//! Documents are kept as raw JSON so that anything another writer left in
//! the file survives a round trip. Reads convert leniently into
//! [`LocationDocument`]; values that are not objects are skipped with a
//! warning.

use crate::persist;
use geocatalog_core::error::Result;
use geocatalog_core::validation::{normalize_uf, validate_location};
use geocatalog_geo::{Coordinate, LocationDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Collection {
    #[serde(default)]
    documents: Vec<Value>,
}

/// Location documents, optionally backed by a JSON file.
#[derive(Debug)]
pub struct LocationStore {
    path: Option<PathBuf>,
    collection: Collection,
}

impl LocationStore {
    /// Open the document file at `path`, creating an empty one if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let collection = persist::load_or_init(&path)?;
        Ok(Self {
            path: Some(path),
            collection,
        })
    }

    /// A store that lives only as long as this value.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            collection: Collection::default(),
        }
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of stored documents, malformed ones included
    pub fn len(&self) -> usize {
        self.collection.documents.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.collection.documents.is_empty()
    }

    /// Insert a location and return its id.
    ///
    /// Text fields are trimmed and the state code uppercased. Returns
    /// `Ok(None)` when a required field is empty or the coordinates are out
    /// of range or not finite.
    pub fn insert_location(
        &mut self,
        name: &str,
        city: &str,
        state: &str,
        latitude: f64,
        longitude: f64,
        description: &str,
    ) -> Result<Option<String>> {
        let validation = validate_location(name, city, state, latitude, longitude);
        if !validation.is_valid() {
            debug!(errors = %validation.summary(), "Location rejected");
            return Ok(None);
        }
        for warning in validation.warnings() {
            warn!(name = %name.trim(), "{}", warning);
        }

        let id = Uuid::new_v4().to_string();
        let mut document = LocationDocument::new(
            name.trim(),
            city.trim(),
            normalize_uf(state),
            Coordinate::new(latitude, longitude),
            description.trim(),
        );
        document.id = Some(id.clone());
        let value = serde_json::to_value(&document)?;

        self.commit(|collection| collection.documents.push(value))?;

        info!(id = %id, name = %document.name, city = %document.city, state = %document.state, "Location inserted");
        Ok(Some(id))
    }

    /// Every readable document in insertion order.
    pub fn list_all(&self) -> Vec<LocationDocument> {
        self.documents().collect()
    }

    /// Documents in `city`/`state`. City matches case-insensitively and in
    /// full; the state code is normalized before an exact match.
    pub fn list_by_city_state(&self, city: &str, state: &str) -> Vec<LocationDocument> {
        let city = city.trim().to_lowercase();
        let state = normalize_uf(state);
        self.documents()
            .filter(|doc| doc.state == state && doc.city.to_lowercase() == city)
            .collect()
    }

    /// Delete every document named exactly `name`. Returns how many went.
    pub fn delete_by_name(&mut self, name: &str) -> Result<usize> {
        let matches = |value: &Value| value.get("name").and_then(Value::as_str) == Some(name);
        let count = self.collection.documents.iter().filter(|v| matches(*v)).count();
        if count == 0 {
            debug!(name = %name, "Nothing to delete");
            return Ok(0);
        }

        self.commit(|collection| collection.documents.retain(|v| !matches(v)))?;
        info!(name = %name, count, "Locations deleted");
        Ok(count)
    }

    /// Delete everything. Returns how many documents went.
    pub fn delete_all(&mut self) -> Result<usize> {
        let count = self.len();
        if count == 0 {
            return Ok(0);
        }

        self.commit(|collection| collection.documents.clear())?;
        info!(count, "All locations deleted");
        Ok(count)
    }

    fn documents(&self) -> impl Iterator<Item = LocationDocument> + '_ {
        self.collection
            .documents
            .iter()
            .enumerate()
            .filter_map(|(index, value)| match LocationDocument::from_value(value) {
                Ok(doc) => Some(doc),
                Err(err) => {
                    warn!(index, error = %err, "Ignoring unreadable stored document");
                    None
                }
            })
    }

    fn commit(&mut self, change: impl FnOnce(&mut Collection)) -> Result<()> {
        let mut next = self.collection.clone();
        change(&mut next);
        if let Some(path) = &self.path {
            persist::save(path, &next)?;
        }
        self.collection = next;
        Ok(())
    }
}
