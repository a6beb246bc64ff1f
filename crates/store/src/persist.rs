//! JSON file persistence shared by both stores.
//!
//! Each store keeps its whole state in memory and rewrites one file per
//! change. Writes go to a sibling temp file first and are renamed into place.

use geocatalog_core::error::{Error, ErrorCode, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::Path;

/// Load `path`, creating it with `T::default()` if it does not exist yet.
pub(crate) fn load_or_init<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Serialize + Default,
{
    if !path.exists() {
        let initial = T::default();
        save(path, &initial)?;
        tracing::info!(path = %path.display(), "Initialized store file");
        return Ok(initial);
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&content)
        .map_err(|e| Error::store_corrupted(path).with_source(e))
}

/// Atomically replace `path` with the JSON encoding of `value`.
pub(crate) fn save<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_failed(path, e))?;
    }

    let data = serde_json::to_vec_pretty(value)
        .map_err(|e| Error::new(ErrorCode::Internal, "Failed to encode store").with_source(e))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).map_err(|e| write_failed(path, e))?;
    fs::rename(&tmp, path).map_err(|e| write_failed(path, e))?;
    Ok(())
}

fn write_failed(path: &Path, err: std::io::Error) -> Error {
    Error::new(
        ErrorCode::StoreWriteFailed,
        format!("Failed to write {}", path.display()),
    )
    .with_source(err)
    .with_suggestion("Check that the data directory is writable")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn test_init_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/counter.json");

        let loaded: Counter = load_or_init(&path).unwrap();

        assert_eq!(loaded, Counter::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("counter.json");

        save(&path, &Counter { value: 7 }).unwrap();
        let loaded: Counter = load_or_init(&path).unwrap();

        assert_eq!(loaded.value, 7);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_empty_file_is_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("counter.json");
        fs::write(&path, "  \n").unwrap();

        let loaded: Counter = load_or_init(&path).unwrap();
        assert_eq!(loaded, Counter::default());
    }

    #[test]
    fn test_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("counter.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_or_init::<Counter>(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreCorrupted);
    }
}
