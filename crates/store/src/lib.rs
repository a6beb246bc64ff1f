//! Storage for geocatalog.
//!
//! Two stores with different shapes, joined at query time:
//!
//! - [`TaxonomyStore`]: relational-style state and city tables with unique
//!   constraints
//! - [`LocationStore`]: a schemaless collection of point-of-interest documents
//! - [`Catalog`]: both stores together, joined on state code + city name
//!
//! Validation failures and no-op writes are reported as `false`, `None` or
//! `0`. Only backend failures (I/O, a corrupt file) come back as `Err`.
//!
//! # Example
//!
//! ```rust
//! use geocatalog_store::Catalog;
//! use geocatalog_geo::Coordinate;
//!
//! let mut catalog = Catalog::in_memory();
//! catalog.taxonomy.insert_state("Pernambuco", "PE").unwrap();
//! catalog.taxonomy.insert_city("Recife", "PE").unwrap();
//! catalog
//!     .add_location("Marco Zero", "Recife", "PE", -8.0631, -34.8711, "")
//!     .unwrap();
//!
//! let near = catalog.nearby("Recife", "PE", &Coordinate::new(-8.06, -34.87), 2.0);
//! assert_eq!(near.len(), 1);
//! ```

mod catalog;
mod locations;
mod persist;
mod taxonomy;
pub mod ufs;

pub use catalog::{Catalog, InsertOutcome};
pub use locations::LocationStore;
pub use taxonomy::{State, TaxonomyStore};
