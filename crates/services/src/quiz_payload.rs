//! Wire shape of the quiz endpoint.
//!
//! The endpoint returns far more fields than the quiz needs; unknown fields
//! are ignored. Marks are sometimes numbers and sometimes numeric strings.

use serde::Deserialize;

use quiz_core::model::{Question, QuizDocument, QuizOption};

use crate::error::QuizSourceError;

pub const DEFAULT_TITLE: &str = "Quiz App";
pub const DEFAULT_TOPIC: &str = "General Knowledge";

#[derive(Debug, Deserialize)]
struct QuizPayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    correct_answer_marks: Option<Marks>,
    #[serde(default)]
    negative_marks: Option<Marks>,
    #[serde(default)]
    questions: Vec<QuestionPayload>,
}

#[derive(Debug, Deserialize)]
struct QuestionPayload {
    #[serde(default)]
    description: String,
    #[serde(default)]
    options: Vec<OptionPayload>,
}

#[derive(Debug, Deserialize)]
struct OptionPayload {
    #[serde(default)]
    description: String,
    #[serde(default)]
    is_correct: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Marks {
    Number(f64),
    Text(String),
}

fn parse_marks(field: &'static str, marks: Option<Marks>) -> Result<f64, QuizSourceError> {
    let value = match marks {
        Some(Marks::Number(value)) => Some(value),
        Some(Marks::Text(ref raw)) => raw.trim().parse::<f64>().ok(),
        None => None,
    };
    match value {
        Some(value) if value.is_finite() => Ok(value),
        _ => Err(QuizSourceError::InvalidMarks {
            field,
            raw: match marks {
                Some(Marks::Number(value)) => value.to_string(),
                Some(Marks::Text(raw)) => raw,
                None => "<missing>".to_string(),
            },
        }),
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Decode a quiz payload into a validated document.
///
/// # Errors
///
/// Returns `QuizSourceError::Decode` for malformed JSON,
/// `QuizSourceError::InvalidMarks` for non-numeric marks, and
/// `QuizSourceError::Document` if the document has no questions.
pub fn parse_quiz_payload(body: &str) -> Result<QuizDocument, QuizSourceError> {
    let payload: QuizPayload = serde_json::from_str(body)?;

    let correct = parse_marks("correct_answer_marks", payload.correct_answer_marks)?;
    let negative = parse_marks("negative_marks", payload.negative_marks)?;

    let questions = payload
        .questions
        .into_iter()
        .map(|question| {
            let options = question
                .options
                .into_iter()
                .map(|option| QuizOption::new(option.description, option.is_correct))
                .collect();
            Question::new(question.description, options)
        })
        .collect();

    Ok(QuizDocument::new(
        or_default(payload.title, DEFAULT_TITLE),
        or_default(payload.topic, DEFAULT_TOPIC),
        correct,
        negative,
        questions,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuizDocumentError;

    const SAMPLE: &str = r#"{
        "id": 60,
        "title": "Genetics and Evolution",
        "topic": "The Molecular Basis of Inheritance",
        "duration": 15,
        "correct_answer_marks": "4.0",
        "negative_marks": "1.0",
        "questions": [
            {
                "id": 3342,
                "description": "If the base sequence in DNA is 5' AAAT 3' then the base sequence in mRNA is:",
                "options": [
                    { "id": 13379, "description": "5'UUUU3'", "is_correct": false },
                    { "id": 13380, "description": "3'UUUU5'", "is_correct": false },
                    { "id": 13381, "description": "5'AAAU3'", "is_correct": true },
                    { "id": 13382, "description": "3'AAAU5'", "is_correct": false }
                ]
            }
        ]
    }"#;

    #[test]
    fn decodes_sample_payload_with_string_marks() {
        let doc = parse_quiz_payload(SAMPLE).unwrap();
        assert_eq!(doc.title(), "Genetics and Evolution");
        assert_eq!(doc.len(), 1);
        assert!((doc.correct_answer_marks() - 4.0).abs() < f64::EPSILON);
        assert!((doc.negative_marks() - 1.0).abs() < f64::EPSILON);
        assert_eq!(doc.questions()[0].correct_index(), Some(2));
    }

    #[test]
    fn numeric_marks_and_missing_titles_fall_back() {
        let body = r#"{
            "correct_answer_marks": 2,
            "negative_marks": 0.5,
            "questions": [{ "description": "Q", "options": [{ "description": "A", "is_correct": true }] }]
        }"#;
        let doc = parse_quiz_payload(body).unwrap();
        assert_eq!(doc.title(), DEFAULT_TITLE);
        assert_eq!(doc.topic(), DEFAULT_TOPIC);
        assert!((doc.negative_marks() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_payload_without_questions() {
        let body = r#"{ "correct_answer_marks": "4", "negative_marks": "1", "questions": [] }"#;
        let err = parse_quiz_payload(body).unwrap_err();
        assert!(matches!(
            err,
            QuizSourceError::Document(QuizDocumentError::NoQuestions)
        ));
    }

    #[test]
    fn rejects_non_numeric_marks() {
        let body = r#"{ "correct_answer_marks": "four", "negative_marks": "1", "questions": [] }"#;
        let err = parse_quiz_payload(body).unwrap_err();
        assert!(matches!(
            err,
            QuizSourceError::InvalidMarks { field: "correct_answer_marks", .. }
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_quiz_payload("{ not json"),
            Err(QuizSourceError::Decode(_))
        ));
    }
}
