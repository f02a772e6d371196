use log::error;
use quiz_core::session::{CompletionReason, OptionMark, QuizSession, TickOutcome};
use services::{PreferenceChange, QuizLoopService};

use crate::views::ViewError;
use crate::vm::format_countdown;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Answer(usize),
    Next,
    Previous,
    Restart,
    ToggleTheme,
}

/// One option button of the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRowVm {
    pub index: usize,
    pub label: String,
    pub mark: OptionMark,
    pub disabled: bool,
}

impl OptionRowVm {
    /// Keyboard digit for this option, when it has one.
    #[must_use]
    pub fn shortcut(&self) -> Option<usize> {
        (self.index < 9).then_some(self.index + 1)
    }
}

pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Apply an intent and return the preference write it owes, if any.
    pub fn apply(
        &mut self,
        quiz_loop: &QuizLoopService,
        intent: QuizIntent,
    ) -> Option<PreferenceChange> {
        match intent {
            QuizIntent::Answer(option) => {
                quiz_loop.answer(&mut self.session, option);
                None
            }
            QuizIntent::Next => PreferenceChange::from_next(quiz_loop.next_question(&mut self.session)),
            QuizIntent::Previous => {
                quiz_loop.previous_question(&mut self.session);
                None
            }
            QuizIntent::Restart => {
                quiz_loop.restart(&mut self.session);
                None
            }
            QuizIntent::ToggleTheme => Some(quiz_loop.toggle_theme(&mut self.session)),
        }
    }

    pub fn tick(&mut self, quiz_loop: &QuizLoopService) -> TickOutcome {
        quiz_loop.tick(&mut self.session)
    }

    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.session.timer_running()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.session.is_completed()
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.session.dark_mode()
    }

    #[must_use]
    pub fn theme_class(&self) -> &'static str {
        if self.session.dark_mode() {
            "quiz-root theme-dark"
        } else {
            "quiz-root theme-light"
        }
    }

    //
    // ─── HEADER ────────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn title(&self) -> &str {
        self.session.document().title()
    }

    #[must_use]
    pub fn topic_label(&self) -> String {
        format!("Topic: {}", self.session.document().topic())
    }

    #[must_use]
    pub fn high_score_label(&self) -> String {
        format!("High Score: {}", self.session.high_score())
    }

    //
    // ─── IN PROGRESS ───────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn countdown_label(&self) -> String {
        format!(
            "Time Remaining: {}",
            format_countdown(self.session.remaining_secs())
        )
    }

    #[must_use]
    pub fn question_label(&self) -> String {
        let progress = self.session.progress();
        format!("Question {} of {}", progress.position, progress.total)
    }

    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.session.progress().percent()
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        self.session
            .current_question()
            .map_or("", |question| question.description())
    }

    #[must_use]
    pub fn option_rows(&self) -> Vec<OptionRowVm> {
        let Some(question) = self.session.current_question() else {
            return Vec::new();
        };
        let answered = self.session.is_current_answered();
        question
            .options()
            .iter()
            .enumerate()
            .map(|(index, option)| OptionRowVm {
                index,
                label: option.description().to_string(),
                mark: self.session.option_mark(index),
                disabled: answered,
            })
            .collect()
    }

    #[must_use]
    pub fn correct_answer_label(&self) -> Option<String> {
        self.session
            .revealed_correct_option()
            .map(|option| format!("Correct Answer: {}", option.description()))
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        !self.session.is_first()
    }

    #[must_use]
    pub fn streak_label(&self) -> String {
        format!("Current Streak: {}", self.session.streak())
    }

    //
    // ─── COMPLETED ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn final_score_label(&self) -> String {
        format!(
            "Your Score: {:.2} / {:.2}",
            self.session.score(),
            self.session.document().max_score()
        )
    }

    #[must_use]
    pub fn longest_streak_label(&self) -> String {
        format!("Longest Streak: {}", self.session.longest_streak())
    }

    #[must_use]
    pub fn completion_note(&self) -> Option<&'static str> {
        match self.session.completion_reason() {
            Some(CompletionReason::TimeExpired) => Some("Time's up!"),
            Some(CompletionReason::QuestionsExhausted) | None => None,
        }
    }
}

/// # Errors
///
/// Returns `ViewError::LoadFailed` if the quiz cannot be fetched.
pub async fn start_quiz(quiz_loop: &QuizLoopService) -> Result<QuizVm, ViewError> {
    let session = quiz_loop.start_quiz().await.map_err(|err| {
        error!("quiz failed to load: {err}");
        ViewError::LoadFailed
    })?;
    Ok(QuizVm::new(session))
}
