use std::sync::Arc;

use log::{debug, info, warn};
use quiz_core::session::{
    AnswerOutcome, DEFAULT_TIME_LIMIT_SECS, NextOutcome, QuizSession, TickOutcome,
};
use storage::repository::PreferenceRepository;

use crate::error::QuizLoopError;
use crate::preference_service::PreferenceService;
use crate::quiz_source::QuizSource;

/// A preference write produced by a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PreferenceChange {
    HighScore(f64),
    DarkMode(bool),
}

impl PreferenceChange {
    /// The write owed after `next_question`, if it set a new high score.
    #[must_use]
    pub fn from_next(outcome: NextOutcome) -> Option<Self> {
        match outcome {
            NextOutcome::Completed {
                new_high_score: Some(score),
            } => Some(Self::HighScore(score)),
            _ => None,
        }
    }
}

/// Orchestrates quiz start, transitions, and write-through of preferences.
///
/// Transitions are synchronous so a view can apply them in place; the
/// resulting `PreferenceChange` is then handed to `persist`. The `*_persisted`
/// variants do both in one call.
#[derive(Clone)]
pub struct QuizLoopService {
    source: Arc<dyn QuizSource>,
    preferences: PreferenceService,
    time_limit_secs: u32,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(source: Arc<dyn QuizSource>, preferences: Arc<dyn PreferenceRepository>) -> Self {
        Self {
            source,
            preferences: PreferenceService::new(preferences),
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
        }
    }

    #[must_use]
    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs;
        self
    }

    #[must_use]
    pub fn preferences(&self) -> &PreferenceService {
        &self.preferences
    }

    /// Fetch the quiz and start a session with the stored preferences.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoopError::Source` if the quiz cannot be fetched.
    pub async fn start_quiz(&self) -> Result<QuizSession, QuizLoopError> {
        let document = self.source.fetch().await?;
        let preferences = self.preferences.load_or_default().await;
        let session = QuizSession::new(Arc::new(document), preferences)
            .with_time_limit(self.time_limit_secs);
        info!(
            "quiz started: {} questions, {}s on the clock",
            session.document().len(),
            session.remaining_secs()
        );
        Ok(session)
    }

    pub fn answer(&self, session: &mut QuizSession, option_index: usize) -> AnswerOutcome {
        let outcome = session.answer(option_index);
        match outcome {
            AnswerOutcome::Recorded {
                feedback,
                score,
                streak,
            } => debug!(
                "question {} answered {feedback:?}; score {score}, streak {streak}",
                session.current_index()
            ),
            AnswerOutcome::Ignored => debug!(
                "answer for question {} ignored",
                session.current_index()
            ),
        }
        outcome
    }

    pub fn next_question(&self, session: &mut QuizSession) -> NextOutcome {
        let outcome = session.next_question();
        if let NextOutcome::Completed { new_high_score } = outcome {
            info!(
                "quiz completed: score {:.2} / {:.2}",
                session.score(),
                session.document().max_score()
            );
            if let Some(score) = new_high_score {
                info!("new high score {score}");
            }
        }
        outcome
    }

    pub fn previous_question(&self, session: &mut QuizSession) -> bool {
        session.previous_question()
    }

    pub fn tick(&self, session: &mut QuizSession) -> TickOutcome {
        let outcome = session.tick();
        if outcome == TickOutcome::Expired {
            info!("time expired at question {}", session.current_index() + 1);
        }
        outcome
    }

    pub fn toggle_theme(&self, session: &mut QuizSession) -> PreferenceChange {
        PreferenceChange::DarkMode(session.toggle_theme())
    }

    pub fn restart(&self, session: &mut QuizSession) {
        session.restart();
        debug!("quiz restarted");
    }

    /// Write a preference change through to the store.
    ///
    /// Failures are logged and swallowed; the in-memory session is already
    /// authoritative.
    pub async fn persist(&self, change: PreferenceChange) {
        let result = match change {
            PreferenceChange::HighScore(score) => self.preferences.save_high_score(score).await,
            PreferenceChange::DarkMode(dark) => self.preferences.save_dark_mode(dark).await,
        };
        if let Err(err) = result {
            warn!("failed to persist {change:?}: {err}");
        }
    }

    /// `next_question` followed by persisting any new high score.
    pub async fn next_question_persisted(&self, session: &mut QuizSession) -> NextOutcome {
        let outcome = self.next_question(session);
        if let Some(change) = PreferenceChange::from_next(outcome) {
            self.persist(change).await;
        }
        outcome
    }

    /// `toggle_theme` followed by persisting the new flag.
    pub async fn toggle_theme_persisted(&self, session: &mut QuizSession) -> bool {
        let change = self.toggle_theme(session);
        self.persist(change).await;
        session.dark_mode()
    }
}
