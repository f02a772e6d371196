#![forbid(unsafe_code)]

pub mod model;
pub mod session;

pub use model::{PreferenceKey, Preferences, Question, QuizDocument, QuizDocumentError, QuizOption};
pub use session::{
    AnswerFeedback, AnswerOutcome, CompletionReason, DEFAULT_TIME_LIMIT_SECS, NextOutcome,
    OptionMark, QuizProgress, QuizSession, SessionStatus, TickOutcome,
};
