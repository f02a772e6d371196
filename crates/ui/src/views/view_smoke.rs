use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{QuizDocument, QuizDocumentError};
use services::{QuizSource, QuizSourceError};
use storage::repository::{PreferenceRepository, Storage};

use super::test_harness::{setup_quiz_harness, setup_quiz_harness_with_storage, static_source};
use crate::vm::QuizIntent;

struct FailingSource;

#[async_trait]
impl QuizSource for FailingSource {
    async fn fetch(&self) -> Result<QuizDocument, QuizSourceError> {
        Err(QuizSourceError::Document(QuizDocumentError::NoQuestions))
    }
}

fn assert_contains(html: &str, needle: &str) {
    assert!(html.contains(needle), "missing {needle:?} in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_quiz_harness(static_source(), 900);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert_contains(&html, "Sample Quiz");
    assert_contains(&html, "Topic: Basics");
    assert_contains(&html, "High Score: 0");
    assert_contains(&html, "Time Remaining: 15:00");
    assert_contains(&html, "Question 1 of 2");
    assert_contains(&html, "Which planet is known as the Red Planet?");
    assert_contains(&html, "Current Streak: 0");
    assert_contains(&html, "theme-light");
    assert!(!html.contains("Correct Answer"), "answer leaked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_wrong_answer_reveals_correct_option() {
    let mut harness = setup_quiz_harness(static_source(), 900);
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::Answer(1));
    let html = harness.render();
    assert_contains(&html, "Correct Answer: Mars");
    assert_contains(&html, "quiz-option--incorrect");
    assert_contains(&html, "quiz-option--revealed");
    assert_contains(&html, "Current Streak: 0");

    // a second pick on the same question is ignored
    harness.dispatch(QuizIntent::Answer(0));
    let vm = harness.handles.vm();
    let score = harness
        .dom
        .in_runtime(|| vm.read().as_ref().map(|vm| vm.session().score()));
    assert_eq!(score, Some(-1.0));
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_completion_persists_high_score() {
    let mut harness = setup_quiz_harness(static_source(), 900);
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::Answer(0));
    harness.dispatch(QuizIntent::Next);
    harness.dispatch(QuizIntent::Answer(1));
    harness.dispatch(QuizIntent::Next);
    harness.settle().await;

    let html = harness.render();
    assert_contains(&html, "Quiz Completed!");
    assert_contains(&html, "Your Score: 8.00 / 8.00");
    assert_contains(&html, "Longest Streak: 2");
    assert_contains(&html, "High Score: 8");
    assert_contains(&html, "Restart Quiz");

    let stored = harness.storage.preferences.get_preferences().await.unwrap();
    assert!((stored.high_score - 8.0).abs() < f64::EPSILON);

    harness.dispatch(QuizIntent::Restart);
    let html = harness.render();
    assert_contains(&html, "Question 1 of 2");
    assert_contains(&html, "Time Remaining: 15:00");
    assert_contains(&html, "High Score: 8");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_countdown_expires() {
    let mut harness = setup_quiz_harness(static_source(), 2);
    harness.rebuild();
    harness.settle().await;
    harness.dispatch(QuizIntent::Answer(0));
    assert_contains(&harness.render(), "Time Remaining: 0:02");

    harness.tick().await;
    assert_contains(&harness.render(), "Time Remaining: 0:01");

    harness.tick().await;
    let html = harness.render();
    assert_contains(&html, "Quiz Completed!");
    assert_contains(&html, "Time's up!");
    assert_contains(&html, "Your Score: 4.00 / 8.00");

    // expiry never writes the high score
    let stored = harness.storage.preferences.get_preferences().await.unwrap();
    assert!(stored.high_score.abs() < f64::EPSILON);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_countdown_stops_on_completion_and_resumes_on_restart() {
    let mut harness = setup_quiz_harness(static_source(), 900);
    harness.rebuild();
    harness.settle().await;

    harness.tick().await;
    assert_eq!(harness.remaining_secs(), Some(899));

    harness.dispatch(QuizIntent::Answer(0));
    harness.dispatch(QuizIntent::Next);
    harness.dispatch(QuizIntent::Answer(1));
    harness.dispatch(QuizIntent::Next);
    harness.settle().await;
    assert_contains(&harness.render(), "Quiz Completed!");

    // no countdown runs once the quiz is over
    harness.tick().await;
    harness.tick().await;
    assert_eq!(harness.remaining_secs(), Some(899));

    harness.dispatch(QuizIntent::Restart);
    harness.settle().await;
    assert_contains(&harness.render(), "Time Remaining: 15:00");

    harness.tick().await;
    assert_contains(&harness.render(), "Time Remaining: 14:59");

    // a single countdown: one tick, one second
    harness.tick().await;
    assert_eq!(harness.remaining_secs(), Some(898));
    assert_contains(&harness.render(), "Time Remaining: 14:58");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_theme_toggle_persists() {
    let mut harness = setup_quiz_harness(static_source(), 900);
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::ToggleTheme);
    harness.settle().await;
    assert_contains(&harness.render(), "theme-dark");
    assert!(harness.storage.preferences.get_preferences().await.unwrap().dark_mode);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_applies_stored_preferences() {
    let storage = Storage::in_memory();
    storage.preferences.save_high_score(5.0).await.unwrap();
    storage.preferences.save_dark_mode(true).await.unwrap();

    let mut harness = setup_quiz_harness_with_storage(static_source(), 900, storage);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert_contains(&html, "High Score: 5");
    assert_contains(&html, "theme-dark");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_load_error() {
    let mut harness = setup_quiz_harness(Arc::new(FailingSource), 900);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert_contains(&html, "Quiz unavailable");
    assert_contains(&html, "The quiz could not be loaded.");
    assert!(!html.contains("Retry"), "unexpected retry in {html}");
}
