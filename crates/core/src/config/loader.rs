//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result, ResultExt};
use crate::validation::Validator;
use std::path::{Path, PathBuf};

/// Environment variable overriding `storage.data_dir`
pub const DATA_DIR_ENV: &str = "GEOCATALOG_DATA_DIR";

/// Environment variable overriding `logging.level`
pub const LOG_LEVEL_ENV: &str = "GEOCATALOG_LOG_LEVEL";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults.
    ///
    /// An explicit `path` must exist. Without one, the standard locations are
    /// searched and defaults are used when none is found. Environment
    /// overrides are applied last.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            if !Path::new(p).exists() {
                return Err(Error::config_not_found(p));
            }
        }

        let config_path = path.map(String::from).or_else(find_config_file);

        let mut schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        apply_overrides(&mut schema, |key| std::env::var(key).ok());
        validate_schema(&schema)?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Wrap an already-built schema
    pub fn from_schema(schema: ConfigSchema) -> Self {
        Self { schema, path: None }
    }

    /// Data directory with `~` and environment variables expanded
    pub fn data_dir(&self) -> PathBuf {
        expand_path(&self.schema.storage.data_dir)
    }

    /// Full path of the taxonomy table file
    pub fn taxonomy_path(&self) -> PathBuf {
        self.data_dir().join(&self.schema.storage.taxonomy_file)
    }

    /// Full path of the location document file
    pub fn locations_path(&self) -> PathBuf {
        self.data_dir().join(&self.schema.storage.locations_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_schema(ConfigSchema::default())
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        ".geocatalog.toml",
        "geocatalog.toml",
        ".config/geocatalog.toml",
    ];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path, e)).with_source(e)
    })?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("parsing {}", path))
}

fn apply_overrides(schema: &mut ConfigSchema, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
        schema.storage.data_dir = dir;
    }
    if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.trim().is_empty()) {
        schema.logging.level = level;
    }
}

fn validate_schema(schema: &ConfigSchema) -> Result<()> {
    let radius = schema.search.default_radius_km;
    Validator::new()
        .required("storage.data_dir", &schema.storage.data_dir)
        .required("storage.taxonomy_file", &schema.storage.taxonomy_file)
        .required("storage.locations_file", &schema.storage.locations_file)
        .custom("search.default_radius_km", || {
            (!radius.is_finite() || radius < 0.0)
                .then(|| format!("Must be a non-negative number, got {}", radius))
        })
        .validate()
        .to_result()
        .map_err(|e| Error::new(ErrorCode::ConfigInvalid, e.message))
}

/// Expand `~` and `$VARS`; falls back to the raw string if a variable is unset
fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
    }
}
