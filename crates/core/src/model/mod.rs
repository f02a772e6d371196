mod preferences;
mod quiz;

pub use preferences::{PreferenceKey, Preferences};
pub use quiz::{Question, QuizDocument, QuizDocumentError, QuizOption};
