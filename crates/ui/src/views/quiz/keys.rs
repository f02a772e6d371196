use dioxus::prelude::Key;

use crate::vm::QuizIntent;

/// Keyboard shortcuts of the quiz page.
///
/// Digits pick an option and arrows move between questions while the quiz
/// runs; `t` toggles the theme at any time; `r` restarts a finished quiz.
pub(super) fn intent_for_key(key: &Key, completed: bool) -> Option<QuizIntent> {
    match key {
        Key::ArrowRight if !completed => Some(QuizIntent::Next),
        Key::ArrowLeft if !completed => Some(QuizIntent::Previous),
        Key::Character(value) => match value.as_str() {
            "t" | "T" => Some(QuizIntent::ToggleTheme),
            "r" | "R" if completed => Some(QuizIntent::Restart),
            digit if !completed => digit
                .parse::<usize>()
                .ok()
                .filter(|value| (1..=9).contains(value))
                .map(|value| QuizIntent::Answer(value - 1)),
            _ => None,
        },
        _ => None,
    }
}
