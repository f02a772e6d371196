use std::sync::Arc;

use log::warn;
use quiz_core::model::Preferences;
use storage::repository::PreferenceRepository;

use crate::error::PreferenceServiceError;

#[derive(Clone)]
pub struct PreferenceService {
    repo: Arc<dyn PreferenceRepository>,
}

impl PreferenceService {
    #[must_use]
    pub fn new(repo: Arc<dyn PreferenceRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted preferences (defaults for absent entries).
    ///
    /// # Errors
    ///
    /// Returns `PreferenceServiceError` on storage failures.
    pub async fn load(&self) -> Result<Preferences, PreferenceServiceError> {
        Ok(self.repo.get_preferences().await?)
    }

    /// Load preferences, logging and replacing unreadable values with defaults.
    pub async fn load_or_default(&self) -> Preferences {
        match self.load().await {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!("preferences unavailable, using defaults: {err}");
                Preferences::default()
            }
        }
    }

    /// # Errors
    ///
    /// Returns `PreferenceServiceError` if persistence fails.
    pub async fn save_high_score(&self, score: f64) -> Result<(), PreferenceServiceError> {
        self.repo.save_high_score(score).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `PreferenceServiceError` if persistence fails.
    pub async fn save_dark_mode(&self, dark: bool) -> Result<(), PreferenceServiceError> {
        self.repo.save_dark_mode(dark).await?;
        Ok(())
    }
}
