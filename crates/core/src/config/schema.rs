//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Where the two stores keep their files
    #[serde(default)]
    pub storage: StorageConfig,

    /// Radius search defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Extra validation rules for inserts
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding both store files. `~` and `$VARS` are expanded.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// File name of the state/city tables, relative to `data_dir`
    #[serde(default = "default_taxonomy_file")]
    pub taxonomy_file: String,

    /// File name of the location documents, relative to `data_dir`
    #[serde(default = "default_locations_file")]
    pub locations_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            taxonomy_file: default_taxonomy_file(),
            locations_file: default_locations_file(),
        }
    }
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("geocatalog").to_string_lossy().into_owned())
        .unwrap_or_else(|| ".geocatalog".to_string())
}

fn default_taxonomy_file() -> String {
    "taxonomy.json".to_string()
}

fn default_locations_file() -> String {
    "locations.json".to_string()
}

/// Radius search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Radius used when the command line does not give one
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
        }
    }
}

fn default_radius_km() -> f64 {
    10.0
}

/// Insert-time validation rules
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ValidationConfig {
    /// Reject locations whose city/state pair is not in the taxonomy store
    #[serde(default)]
    pub require_registered_city: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
