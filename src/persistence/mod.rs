//! Key/value persistence
//!
//! Mirrors the browser LocalStorage model: string keys, string values.
//! - `MemoryStorage`: in-process map (tests, headless runs)
//! - `FileStorage`: JSON object on disk (native)
//! - `LocalStorage`: browser storage (wasm32 only)

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("storage encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key/value store
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON file holding one object of string entries.
/// Every write rewrites the file through a temporary sibling.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open (or lazily create) the store at `path`.
    /// A missing file is empty; a corrupt file is reported as an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    /// Open, starting fresh if the existing file cannot be parsed
    pub fn open_or_reset(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        match Self::open(&path) {
            Err(StorageError::Json(e)) => {
                log::warn!("Discarding corrupt storage file: {}", e);
                Ok(Self {
                    path: path.as_ref().to_path_buf(),
                    entries: BTreeMap::new(),
                })
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Result<Self, StorageError> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StorageError::Unavailable("no LocalStorage".to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "neon-drift-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::default();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_storage_persists_across_opens() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set_item("neonDriftBest", "1234").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get_item("neonDriftBest").unwrap().as_deref(),
            Some("1234")
        );
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_reset() {
        let path = temp_path("corrupt");
        fs::write(&path, "][").unwrap();
        assert!(matches!(FileStorage::open(&path), Err(StorageError::Json(_))));

        let storage = FileStorage::open_or_reset(&path).unwrap();
        assert_eq!(storage.get_item("anything").unwrap(), None);
        let _ = fs::remove_file(&path);
    }
}
