use std::sync::Arc;

use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::quiz_loop::QuizLoopService;
use crate::quiz_source::QuizSource;
use crate::ticker::{IntervalTicker, Ticker};

/// Assembles the app-facing services around one quiz source and one store.
#[derive(Clone)]
pub struct AppServices {
    quiz_loop: Arc<QuizLoopService>,
    ticker: Arc<dyn Ticker>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        source: Arc<dyn QuizSource>,
        time_limit_secs: u32,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, source, time_limit_secs))
    }

    /// Build services on top of an already-initialized store.
    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        source: Arc<dyn QuizSource>,
        time_limit_secs: u32,
    ) -> Self {
        let quiz_loop = QuizLoopService::new(source, Arc::clone(&storage.preferences))
            .with_time_limit(time_limit_secs);
        Self {
            quiz_loop: Arc::new(quiz_loop),
            ticker: Arc::new(IntervalTicker::default()),
        }
    }

    /// Replace the countdown ticker.
    #[must_use]
    pub fn with_ticker(mut self, ticker: Arc<dyn Ticker>) -> Self {
        self.ticker = ticker;
        self
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn ticker(&self) -> Arc<dyn Ticker> {
        Arc::clone(&self.ticker)
    }
}
