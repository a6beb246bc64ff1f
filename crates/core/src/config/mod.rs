//! Configuration loading and schema definitions
//!
//! Shared configuration types used by the stores and the CLI.

mod loader;
mod schema;

pub use loader::{Config, DATA_DIR_ENV, LOG_LEVEL_ENV};
pub use schema::*;
