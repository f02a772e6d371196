//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizDocumentError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while configuring a quiz source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizSourceConfigError {
    #[error("invalid quiz URL: {raw}")]
    InvalidUrl { raw: String },
    #[error("unsupported quiz URL scheme: {scheme}")]
    UnsupportedScheme { scheme: String },
}

/// Errors emitted by `QuizSource` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizSourceError {
    #[error("quiz request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("quiz payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid {field} in quiz payload: {raw}")]
    InvalidMarks { field: &'static str, raw: String },
    #[error(transparent)]
    Document(#[from] QuizDocumentError),
}

/// Errors emitted by `PreferenceService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferenceServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizLoopError {
    #[error(transparent)]
    Source(#[from] QuizSourceError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Config(#[from] QuizSourceConfigError),
}
