use async_trait::async_trait;
use sqlx::Row;

use crate::codec::{decode_dark_mode, decode_high_score, encode_dark_mode, encode_high_score};
use crate::repository::{PreferenceRepository, StorageError};
use quiz_core::model::{PreferenceKey, Preferences};

use super::SqliteRepository;

impl SqliteRepository {
    async fn get_value(&self, key: PreferenceKey) -> Result<Option<String>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT value
            FROM preferences
            WHERE key = ?1
            ",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        row.try_get::<String, _>("value")
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn put_value(&self, key: PreferenceKey, value: String) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key.as_str())
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl PreferenceRepository for SqliteRepository {
    async fn get_preferences(&self) -> Result<Preferences, StorageError> {
        let high_score = match self.get_value(PreferenceKey::HighScore).await? {
            Some(raw) => decode_high_score(&raw)?,
            None => 0.0,
        };
        let dark_mode = match self.get_value(PreferenceKey::Theme).await? {
            Some(raw) => decode_dark_mode(&raw)?,
            None => false,
        };
        Ok(Preferences::new(high_score, dark_mode))
    }

    async fn save_high_score(&self, score: f64) -> Result<(), StorageError> {
        self.put_value(PreferenceKey::HighScore, encode_high_score(score)?)
            .await
    }

    async fn save_dark_mode(&self, dark: bool) -> Result<(), StorageError> {
        self.put_value(PreferenceKey::Theme, encode_dark_mode(dark)?)
            .await
    }
}
