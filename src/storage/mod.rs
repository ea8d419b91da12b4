//! Local persistence for the API key override and the all-time high score.
//!
//! Storage is a small key-value capability. Failures are returned to the
//! caller so they can be reported; nothing here swallows an error.

mod file_store;

pub use file_store::{FileStore, MemoryStore};

use crate::error::{Error, Result};

/// Key holding the user's API key override.
pub const API_KEY_OVERRIDE: &str = "api_key_override";
/// Key holding the best completed-game score.
pub const ALL_TIME_HIGH_SCORE: &str = "all_time_high_score";

/// A string key-value store.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send {
    /// Read a value. `Ok(None)` means the key has never been written.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Write a value.
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Typed access to the persisted values.
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// In-memory persistence, used when no data directory is available.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Stored high score, 0 if never written.
    pub fn load_high_score(&self) -> Result<u32> {
        match self.store.load(ALL_TIME_HIGH_SCORE)? {
            Some(raw) => raw.trim().parse().map_err(|_| {
                Error::persistence(format!("stored high score '{}' is not a number", raw))
            }),
            None => Ok(0),
        }
    }

    pub fn save_high_score(&mut self, score: u32) -> Result<()> {
        self.store.save(ALL_TIME_HIGH_SCORE, &score.to_string())
    }

    /// Stored API key override, if any non-blank key was saved.
    pub fn load_api_key(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .load(API_KEY_OVERRIDE)?
            .filter(|key| !key.trim().is_empty()))
    }

    /// Save an override. A blank key clears it.
    pub fn save_api_key(&mut self, key: &str) -> Result<()> {
        self.store.save(API_KEY_OVERRIDE, key.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_high_score_defaults_to_zero() {
        let persistence = Persistence::in_memory();
        assert_eq!(persistence.load_high_score().unwrap(), 0);
    }

    #[test]
    fn test_high_score_roundtrip_through_store() {
        let mut persistence = Persistence::in_memory();
        persistence.save_high_score(4).unwrap();
        assert_eq!(persistence.load_high_score().unwrap(), 4);
    }

    #[test]
    fn test_corrupt_high_score_is_an_error() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_load()
            .with(eq(ALL_TIME_HIGH_SCORE))
            .returning(|_| Ok(Some("lots".to_string())));

        let persistence = Persistence::new(store);
        assert!(matches!(
            persistence.load_high_score(),
            Err(Error::Persistence(_))
        ));
    }

    #[test]
    fn test_store_failure_is_surfaced() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_save()
            .returning(|_, _| Err(Error::persistence("disk full")));

        let mut persistence = Persistence::new(store);
        assert!(persistence.save_high_score(3).is_err());
    }

    #[test]
    fn test_blank_api_key_reads_as_none() {
        let mut persistence = Persistence::in_memory();
        assert_eq!(persistence.load_api_key().unwrap(), None);

        persistence.save_api_key("  ABC123 ").unwrap();
        assert_eq!(persistence.load_api_key().unwrap(), Some("ABC123".to_string()));

        persistence.save_api_key("").unwrap();
        assert_eq!(persistence.load_api_key().unwrap(), None);
    }
}
