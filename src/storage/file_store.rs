//! Key-value store implementations.

use super::KeyValueStore;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A JSON object on disk, rewritten on every save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `state.json` inside the application data directory.
    pub fn in_data_dir() -> Result<Self> {
        Ok(Self::new(crate::config::data_dir()?.join("state.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::persistence(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            Error::persistence(format!("cannot parse {}: {}", self.path.display(), e))
        })
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::persistence(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
        let content = serde_json::to_string_pretty(&values)?;
        std::fs::write(&self.path, content).map_err(|e| {
            Error::persistence(format!("cannot write {}: {}", self.path.display(), e))
        })?;

        tracing::debug!(key, path = %self.path.display(), "persisted value");
        Ok(())
    }
}

/// Process-local store. Values are lost on exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_store() -> FileStore {
        let dir = std::env::temp_dir().join(format!("updown-store-{}", uuid::Uuid::new_v4()));
        FileStore::new(dir.join("state.json"))
    }

    #[test]
    fn test_missing_file_loads_nothing() {
        let store = temp_store();
        assert_eq!(store.load("anything").unwrap(), None);
    }

    #[test]
    fn test_values_survive_a_new_handle() {
        let mut store = temp_store();
        store.save("all_time_high_score", "3").unwrap();
        store.save("api_key_override", "KEY").unwrap();

        let reopened = FileStore::new(store.path());
        assert_eq!(
            reopened.load("all_time_high_score").unwrap(),
            Some("3".to_string())
        );
        assert_eq!(
            reopened.load("api_key_override").unwrap(),
            Some("KEY".to_string())
        );

        if let Some(dir) = store.path().parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let store = temp_store();
        let dir = store.path().parent().unwrap().to_path_buf();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.load("x"), Err(Error::Persistence(_))));

        std::fs::remove_dir_all(dir).ok();
    }
}
