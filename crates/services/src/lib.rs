#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod preference_service;
pub mod quiz_loop;
pub mod quiz_payload;
pub mod quiz_source;
pub mod ticker;

pub use app_services::AppServices;
pub use error::{
    AppServicesError, PreferenceServiceError, QuizLoopError, QuizSourceConfigError,
    QuizSourceError,
};
pub use preference_service::PreferenceService;
pub use quiz_loop::{PreferenceChange, QuizLoopService};
pub use quiz_payload::parse_quiz_payload;
pub use quiz_source::{
    DEFAULT_QUIZ_URL, FileQuizSource, HttpQuizSource, QuizSource, QuizSourceConfig,
    StaticQuizSource,
};
pub use ticker::{IntervalTicker, Ticker};
