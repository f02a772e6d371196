use std::env;
use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use url::Url;

use quiz_core::model::QuizDocument;

use crate::error::{QuizSourceConfigError, QuizSourceError};
use crate::quiz_payload::parse_quiz_payload;

/// Endpoint used when no URL is configured.
pub const DEFAULT_QUIZ_URL: &str = "https://api.jsonserve.com/Uw5CrX";

/// One-shot provider of the quiz document.
#[async_trait]
pub trait QuizSource: Send + Sync {
    /// Fetch the quiz document. Called once per session start; never retried.
    ///
    /// # Errors
    ///
    /// Returns `QuizSourceError` if the document cannot be read or decoded.
    async fn fetch(&self) -> Result<QuizDocument, QuizSourceError>;
}

//
// ─── HTTP ──────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct QuizSourceConfig {
    pub url: Url,
}

impl QuizSourceConfig {
    /// Validate an endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns `QuizSourceConfigError` if the URL does not parse or is not http(s).
    pub fn new(raw: &str) -> Result<Self, QuizSourceConfigError> {
        let url = Url::parse(raw.trim()).map_err(|_| QuizSourceConfigError::InvalidUrl {
            raw: raw.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(Self { url }),
            other => Err(QuizSourceConfigError::UnsupportedScheme {
                scheme: other.to_string(),
            }),
        }
    }

    /// Read `QUIZ_API_URL`, falling back to `DEFAULT_QUIZ_URL`.
    ///
    /// # Errors
    ///
    /// Returns `QuizSourceConfigError` if the configured URL is invalid.
    pub fn from_env() -> Result<Self, QuizSourceConfigError> {
        match env::var("QUIZ_API_URL") {
            Ok(raw) if !raw.trim().is_empty() => Self::new(&raw),
            _ => Self::new(DEFAULT_QUIZ_URL),
        }
    }
}

#[derive(Clone)]
pub struct HttpQuizSource {
    client: Client,
    config: QuizSourceConfig,
}

impl HttpQuizSource {
    #[must_use]
    pub fn new(config: QuizSourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.config.url
    }
}

#[async_trait]
impl QuizSource for HttpQuizSource {
    async fn fetch(&self) -> Result<QuizDocument, QuizSourceError> {
        debug!("fetching quiz from {}", self.config.url);
        let response = self.client.get(self.config.url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(QuizSourceError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let document = parse_quiz_payload(&body)?;
        info!(
            "loaded quiz {:?} with {} questions",
            document.title(),
            document.len()
        );
        Ok(document)
    }
}

//
// ─── FILE ──────────────────────────────────────────────────────────────────────
//

/// Reads the endpoint's JSON shape from a local file.
#[derive(Clone, Debug)]
pub struct FileQuizSource {
    path: PathBuf,
}

impl FileQuizSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuizSource for FileQuizSource {
    async fn fetch(&self) -> Result<QuizDocument, QuizSourceError> {
        debug!("reading quiz from {}", self.path.display());
        let body = tokio::fs::read_to_string(&self.path).await?;
        parse_quiz_payload(&body)
    }
}

//
// ─── STATIC ────────────────────────────────────────────────────────────────────
//

/// Serves a fixed in-memory document.
#[derive(Clone, Debug)]
pub struct StaticQuizSource {
    document: QuizDocument,
}

impl StaticQuizSource {
    #[must_use]
    pub fn new(document: QuizDocument) -> Self {
        Self { document }
    }
}

#[async_trait]
impl QuizSource for StaticQuizSource {
    async fn fetch(&self) -> Result<QuizDocument, QuizSourceError> {
        Ok(self.document.clone())
    }
}
