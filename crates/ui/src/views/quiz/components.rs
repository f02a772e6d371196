use dioxus::prelude::*;

use quiz_core::session::OptionMark;

use crate::vm::{OptionRowVm, QuizIntent};

fn option_class(mark: OptionMark) -> &'static str {
    match mark {
        OptionMark::Neutral => "quiz-option",
        OptionMark::SelectedCorrect => "quiz-option quiz-option--correct",
        OptionMark::SelectedIncorrect => "quiz-option quiz-option--incorrect",
        OptionMark::RevealedCorrect => "quiz-option quiz-option--revealed",
    }
}

#[component]
pub(super) fn ThemeToggle(dark: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    let label = if dark { "Light mode" } else { "Dark mode" };
    rsx! {
        button {
            class: "quiz-theme-toggle",
            id: "quiz-theme-toggle",
            r#type: "button",
            title: "{label} (t)",
            onclick: move |_| on_intent.call(QuizIntent::ToggleTheme),
            "{label}"
        }
    }
}

#[component]
pub(super) fn ProgressBar(percent: f64) -> Element {
    rsx! {
        div { class: "quiz-progress",
            div { class: "quiz-progress__fill", style: "width: {percent:.0}%" }
        }
    }
}

#[component]
pub(super) fn OptionButton(row: OptionRowVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let index = row.index;
    let class = option_class(row.mark);
    rsx! {
        button {
            class: "{class}",
            id: "quiz-option-{index}",
            r#type: "button",
            disabled: row.disabled,
            onclick: move |_| on_intent.call(QuizIntent::Answer(index)),
            if let Some(shortcut) = row.shortcut() {
                span { class: "quiz-option__key", "{shortcut}" }
            }
            span { class: "quiz-option__label", "{row.label}" }
        }
    }
}

#[component]
pub(super) fn CompletionPanel(
    score_label: String,
    longest_streak_label: String,
    note: Option<&'static str>,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        div { class: "quiz-complete",
            h2 { class: "quiz-complete__title", "Quiz Completed!" }
            if let Some(note) = note {
                p { class: "quiz-complete__note", "{note}" }
            }
            p { class: "quiz-complete__score", "{score_label}" }
            p { class: "quiz-complete__streak", "{longest_streak_label}" }
            button {
                class: "quiz-btn quiz-btn--primary quiz-complete__restart",
                id: "quiz-restart",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Restart),
                "Restart Quiz"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_classes_follow_marks() {
        assert_eq!(option_class(OptionMark::Neutral), "quiz-option");
        assert!(option_class(OptionMark::SelectedCorrect).ends_with("--correct"));
        assert!(option_class(OptionMark::SelectedIncorrect).ends_with("--incorrect"));
        assert!(option_class(OptionMark::RevealedCorrect).ends_with("--revealed"));
    }
}
