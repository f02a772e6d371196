use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizDocumentError {
    #[error("quiz has no questions")]
    NoQuestions,

    #[error("question {index} has no options")]
    EmptyOptions { index: usize },
}

//
// ─── OPTION / QUESTION ─────────────────────────────────────────────────────────
//

/// A single answer choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    description: String,
    is_correct: bool,
}

impl QuizOption {
    #[must_use]
    pub fn new(description: impl Into<String>, is_correct: bool) -> Self {
        Self {
            description: description.into(),
            is_correct,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

/// A question with its ordered answer choices.
///
/// Exactly one option is expected to be correct. This is not enforced, so
/// `correct_option` may return `None` for a malformed question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    description: String,
    options: Vec<QuizOption>,
}

impl Question {
    #[must_use]
    pub fn new(description: impl Into<String>, options: Vec<QuizOption>) -> Self {
        Self {
            description: description.into(),
            options,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn options(&self) -> &[QuizOption] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&QuizOption> {
        self.options.get(index)
    }

    /// Index of the first option flagged as correct.
    #[must_use]
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(QuizOption::is_correct)
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.is_correct())
    }
}

//
// ─── DOCUMENT ──────────────────────────────────────────────────────────────────
//

/// Immutable quiz definition supplied by a quiz source.
///
/// Deserialization goes through `QuizDocument::new`, so a decoded document
/// holds the same guarantees as a constructed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuizDocumentFields")]
pub struct QuizDocument {
    title: String,
    topic: String,
    correct_answer_marks: f64,
    negative_marks: f64,
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct QuizDocumentFields {
    title: String,
    topic: String,
    correct_answer_marks: f64,
    negative_marks: f64,
    questions: Vec<Question>,
}

impl TryFrom<QuizDocumentFields> for QuizDocument {
    type Error = QuizDocumentError;

    fn try_from(fields: QuizDocumentFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.title,
            fields.topic,
            fields.correct_answer_marks,
            fields.negative_marks,
            fields.questions,
        )
    }
}

impl QuizDocument {
    /// Build a quiz document.
    ///
    /// # Errors
    ///
    /// Returns `QuizDocumentError::NoQuestions` if `questions` is empty, or
    /// `QuizDocumentError::EmptyOptions` if any question has no options.
    pub fn new(
        title: impl Into<String>,
        topic: impl Into<String>,
        correct_answer_marks: f64,
        negative_marks: f64,
        questions: Vec<Question>,
    ) -> Result<Self, QuizDocumentError> {
        if questions.is_empty() {
            return Err(QuizDocumentError::NoQuestions);
        }
        if let Some(index) = questions.iter().position(|q| q.options.is_empty()) {
            return Err(QuizDocumentError::EmptyOptions { index });
        }

        Ok(Self {
            title: title.into(),
            topic: topic.into(),
            correct_answer_marks,
            negative_marks,
            questions,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn correct_answer_marks(&self) -> f64 {
        self.correct_answer_marks
    }

    #[must_use]
    pub fn negative_marks(&self) -> f64 {
        self.negative_marks
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false`; a document cannot be built without questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    /// Best attainable score: every question answered correctly.
    #[must_use]
    pub fn max_score(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let count = self.questions.len() as f64;
        count * self.correct_answer_marks
    }
}
