//! Quiz session state machine.
//!
//! A `QuizSession` exists once a `QuizDocument` is available and is either in
//! progress or completed. Every transition is synchronous and either applies
//! fully or leaves the session untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::model::{Preferences, Question, QuizDocument, QuizOption};

mod progress;
#[cfg(test)]
mod property_tests;

pub use progress::QuizProgress;

/// Countdown length for a fresh session (15 minutes).
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 15 * 60;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerFeedback {
    Correct,
    Incorrect,
}

impl AnswerFeedback {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, AnswerFeedback::Correct)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionReason {
    QuestionsExhausted,
    TimeExpired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Completed(CompletionReason),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnswerOutcome {
    Recorded {
        feedback: AnswerFeedback,
        score: f64,
        streak: u32,
    },
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NextOutcome {
    Advanced { index: usize },
    Completed { new_high_score: Option<f64> },
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining_secs: u32 },
    Expired,
    Idle,
}

/// How an option of the current question should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    SelectedCorrect,
    SelectedIncorrect,
    /// The correct option, highlighted after a wrong pick.
    RevealedCorrect,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

#[derive(Clone)]
pub struct QuizSession {
    document: Arc<QuizDocument>,
    time_limit_secs: u32,
    current_index: usize,
    score: f64,
    streak: u32,
    longest_streak: u32,
    selected_answers: BTreeMap<usize, usize>,
    answer_feedback: BTreeMap<usize, AnswerFeedback>,
    remaining_secs: u32,
    timer_active: bool,
    completion: Option<CompletionReason>,
    high_score: f64,
    dark_mode: bool,
}

impl QuizSession {
    /// Start a session at the first question with the default time limit.
    #[must_use]
    pub fn new(document: Arc<QuizDocument>, preferences: Preferences) -> Self {
        Self {
            document,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            current_index: 0,
            score: 0.0,
            streak: 0,
            longest_streak: 0,
            selected_answers: BTreeMap::new(),
            answer_feedback: BTreeMap::new(),
            remaining_secs: DEFAULT_TIME_LIMIT_SECS,
            timer_active: true,
            completion: None,
            high_score: preferences.high_score,
            dark_mode: preferences.dark_mode,
        }
    }

    /// Override the countdown length. Zero is raised to one second.
    #[must_use]
    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs.max(1);
        self.remaining_secs = self.time_limit_secs;
        self
    }

    #[must_use]
    pub fn document(&self) -> &QuizDocument {
        &self.document
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn timer_active(&self) -> bool {
        self.timer_active
    }

    /// `true` while ticks should be delivered.
    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer_active && !self.is_completed()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    #[must_use]
    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.completion
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.completion
            .map_or(SessionStatus::InProgress, SessionStatus::Completed)
    }

    #[must_use]
    pub fn high_score(&self) -> f64 {
        self.high_score
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    #[must_use]
    pub fn preferences(&self) -> Preferences {
        Preferences::new(self.high_score, self.dark_mode)
    }

    /// Option index chosen for `question_index`, if answered.
    #[must_use]
    pub fn selected_index(&self, question_index: usize) -> Option<usize> {
        self.selected_answers.get(&question_index).copied()
    }

    #[must_use]
    pub fn selected_option(&self, question_index: usize) -> Option<&QuizOption> {
        let option_index = self.selected_index(question_index)?;
        self.document.question(question_index)?.option(option_index)
    }

    #[must_use]
    pub fn feedback(&self, question_index: usize) -> Option<AnswerFeedback> {
        self.answer_feedback.get(&question_index).copied()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selected_answers.len()
    }

    //
    // ─── DERIVED ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.document.question(self.current_index)
    }

    #[must_use]
    pub fn is_current_answered(&self) -> bool {
        self.selected_answers.contains_key(&self.current_index)
    }

    /// The correct choice of the current question, once it has been answered.
    #[must_use]
    pub fn revealed_correct_option(&self) -> Option<&QuizOption> {
        if !self.is_current_answered() {
            return None;
        }
        self.current_question()?.correct_option()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress::new(
            self.current_index,
            self.document.len(),
            self.answered_count(),
        )
    }

    #[must_use]
    pub fn option_mark(&self, option_index: usize) -> OptionMark {
        let Some(option) = self
            .current_question()
            .and_then(|question| question.option(option_index))
        else {
            return OptionMark::Neutral;
        };
        let selected = self.selected_index(self.current_index) == Some(option_index);
        let answered_wrong = self.feedback(self.current_index) == Some(AnswerFeedback::Incorrect);

        match (selected, option.is_correct()) {
            (true, true) => OptionMark::SelectedCorrect,
            (true, false) if answered_wrong => OptionMark::SelectedIncorrect,
            (false, true) if answered_wrong => OptionMark::RevealedCorrect,
            _ => OptionMark::Neutral,
        }
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Record `option_index` as the answer to the current question.
    ///
    /// Ignored once completed, when the question already has an answer, or
    /// when the index does not name an option.
    pub fn answer(&mut self, option_index: usize) -> AnswerOutcome {
        if self.is_completed() || self.is_current_answered() {
            return AnswerOutcome::Ignored;
        }
        let Some(option) = self
            .current_question()
            .and_then(|question| question.option(option_index))
        else {
            return AnswerOutcome::Ignored;
        };

        let feedback = if option.is_correct() {
            AnswerFeedback::Correct
        } else {
            AnswerFeedback::Incorrect
        };

        self.selected_answers.insert(self.current_index, option_index);
        self.answer_feedback.insert(self.current_index, feedback);

        match feedback {
            AnswerFeedback::Correct => {
                self.score += self.document.correct_answer_marks();
                self.streak = self.streak.saturating_add(1);
                self.longest_streak = self.longest_streak.max(self.streak);
            }
            AnswerFeedback::Incorrect => {
                // No floor: the score may go negative.
                self.score -= self.document.negative_marks();
                self.streak = 0;
            }
        }

        AnswerOutcome::Recorded {
            feedback,
            score: self.score,
            streak: self.streak,
        }
    }

    /// Advance, or complete the session when already on the last question.
    ///
    /// Only this path raises the high score; timer expiry does not.
    pub fn next_question(&mut self) -> NextOutcome {
        if self.is_completed() {
            return NextOutcome::Ignored;
        }
        if self.current_index < self.document.last_index() {
            self.current_index += 1;
            return NextOutcome::Advanced {
                index: self.current_index,
            };
        }

        self.completion = Some(CompletionReason::QuestionsExhausted);
        self.timer_active = false;

        let new_high_score = (self.score > self.high_score).then(|| {
            self.high_score = self.score;
            self.score
        });

        NextOutcome::Completed { new_high_score }
    }

    /// Step back one question. Returns `true` if the index moved.
    pub fn previous_question(&mut self) -> bool {
        if self.is_completed() || self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// One second elapsed on the countdown.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.timer_running() {
            return TickOutcome::Idle;
        }
        if self.remaining_secs <= 1 {
            self.remaining_secs = 0;
            self.completion = Some(CompletionReason::TimeExpired);
            self.timer_active = false;
            return TickOutcome::Expired;
        }
        self.remaining_secs -= 1;
        TickOutcome::Running {
            remaining_secs: self.remaining_secs,
        }
    }

    /// Flip the theme flag and return the new value.
    pub fn toggle_theme(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// Reset all progress. High score and theme survive.
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.score = 0.0;
        self.streak = 0;
        self.longest_streak = 0;
        self.selected_answers.clear();
        self.answer_feedback.clear();
        self.remaining_secs = self.time_limit_secs;
        self.timer_active = true;
        self.completion = None;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions", &self.document.len())
            .field("current_index", &self.current_index)
            .field("score", &self.score)
            .field("streak", &self.streak)
            .field("answered", &self.selected_answers.len())
            .field("remaining_secs", &self.remaining_secs)
            .field("timer_active", &self.timer_active)
            .field("completion", &self.completion)
            .field("high_score", &self.high_score)
            .field("dark_mode", &self.dark_mode)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
