use async_trait::async_trait;
use quiz_core::model::{PreferenceKey, Preferences};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::codec::{decode_dark_mode, decode_high_score, encode_dark_mode, encode_high_score};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the locally persisted preferences.
///
/// Two independent entries are stored: the high score and the theme flag.
/// Writes are last-write-wins.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Read both entries, substituting defaults for absent ones.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if a stored value cannot be
    /// decoded, or other storage errors.
    async fn get_preferences(&self) -> Result<Preferences, StorageError>;

    /// Persist the high score.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn save_high_score(&self, score: f64) -> Result<(), StorageError>;

    /// Persist the theme flag.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn save_dark_mode(&self, dark: bool) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<PreferenceKey, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store an already-encoded value, bypassing validation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_raw(&self, key: PreferenceKey, raw: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key, raw.into());
        Ok(())
    }

    /// The encoded value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn raw(&self, key: PreferenceKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryRepository {
    async fn get_preferences(&self) -> Result<Preferences, StorageError> {
        let high_score = self
            .raw(PreferenceKey::HighScore)?
            .map(|raw| decode_high_score(&raw))
            .transpose()?
            .unwrap_or_default();
        let dark_mode = self
            .raw(PreferenceKey::Theme)?
            .map(|raw| decode_dark_mode(&raw))
            .transpose()?
            .unwrap_or_default();
        Ok(Preferences::new(high_score, dark_mode))
    }

    async fn save_high_score(&self, score: f64) -> Result<(), StorageError> {
        self.insert_raw(PreferenceKey::HighScore, encode_high_score(score)?)
    }

    async fn save_dark_mode(&self, dark: bool) -> Result<(), StorageError> {
        self.insert_raw(PreferenceKey::Theme, encode_dark_mode(dark)?)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub preferences: Arc<dyn PreferenceRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let preferences: Arc<dyn PreferenceRepository> = Arc::new(InMemoryRepository::new());
        Self { preferences }
    }
}
