//! Core utilities for geocatalog
//!
//! This crate provides the functionality shared by the stores and the CLI:
//!
//! - **Error handling**: structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with environment overrides
//! - **Validation**: fluent validators plus the domain rules for states, cities and locations
//!
//! # Example
//!
//! ```rust,no_run
//! use geocatalog_core::{config::Config, validation::validate_state};
//!
//! let config = Config::load(None).expect("config");
//! println!("data dir: {}", config.data_dir().display());
//!
//! let result = validate_state("São Paulo", "sp");
//! assert!(result.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};
