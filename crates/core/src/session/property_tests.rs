//! Property tests for the quiz session state machine.

use proptest::prelude::*;

use super::tests::build_document;
use super::*;

#[derive(Debug, Clone, Copy)]
enum Action {
    Answer(usize),
    Next,
    Previous,
    Tick,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0..4usize).prop_map(Action::Answer),
        2 => Just(Action::Next),
        1 => Just(Action::Previous),
        1 => Just(Action::Tick),
    ]
}

fn apply(session: &mut QuizSession, action: Action) -> Option<AnswerFeedback> {
    match action {
        Action::Answer(option) => match session.answer(option) {
            AnswerOutcome::Recorded { feedback, .. } => Some(feedback),
            AnswerOutcome::Ignored => None,
        },
        Action::Next => {
            session.next_question();
            None
        }
        Action::Previous => {
            session.previous_question();
            None
        }
        Action::Tick => {
            session.tick();
            None
        }
    }
}

proptest! {
    #[test]
    fn score_is_sum_of_answered_deltas(
        actions in prop::collection::vec(action_strategy(), 0..60),
        questions in 1..6usize,
    ) {
        let mut session = QuizSession::new(build_document(questions, 4.0, 1.5), Preferences::default())
            .with_time_limit(30);
        for action in actions {
            apply(&mut session, action);
        }

        let expected: f64 = (0..questions)
            .filter_map(|i| session.feedback(i))
            .map(|feedback| if feedback.is_correct() { 4.0 } else { -1.5 })
            .sum();
        prop_assert!((session.score() - expected).abs() < 1e-9);
        prop_assert_eq!(session.answered_count(), (0..questions).filter(|i| session.feedback(*i).is_some()).count());
    }

    #[test]
    fn streak_is_trailing_run_in_answer_order(
        actions in prop::collection::vec(action_strategy(), 0..60),
        questions in 1..6usize,
    ) {
        let mut session = QuizSession::new(build_document(questions, 4.0, 1.0), Preferences::default());
        let mut answered = Vec::new();
        for action in actions {
            if let Some(feedback) = apply(&mut session, action) {
                answered.push(feedback);
            }
        }

        let trailing = answered.iter().rev().take_while(|f| f.is_correct()).count();
        prop_assert_eq!(session.streak() as usize, trailing);
        prop_assert!(session.longest_streak() >= session.streak());
    }

    #[test]
    fn ticks_decrease_by_one_until_expiry(limit in 1..50u32, ticks in 0..80u32) {
        let mut session = QuizSession::new(build_document(2, 4.0, 1.0), Preferences::default())
            .with_time_limit(limit);
        for _ in 0..ticks {
            session.tick();
        }

        let expected = limit.saturating_sub(ticks);
        prop_assert_eq!(session.remaining_secs(), expected);
        prop_assert_eq!(session.is_completed(), expected == 0);
        if expected == 0 {
            prop_assert_eq!(session.completion_reason(), Some(CompletionReason::TimeExpired));
            prop_assert!(!session.timer_running());
        }
    }

    #[test]
    fn restart_returns_to_initial_state(
        actions in prop::collection::vec(action_strategy(), 0..60),
        toggles in 0..3usize,
    ) {
        let mut session = QuizSession::new(build_document(3, 4.0, 1.0), Preferences::new(1.0, false))
            .with_time_limit(20);
        for _ in 0..toggles {
            session.toggle_theme();
        }
        for action in actions {
            apply(&mut session, action);
        }
        let preferences = session.preferences();

        session.restart();

        prop_assert_eq!(session.current_index(), 0);
        prop_assert!(session.score().abs() < f64::EPSILON);
        prop_assert_eq!(session.streak(), 0);
        prop_assert_eq!(session.answered_count(), 0);
        prop_assert_eq!(session.remaining_secs(), 20);
        prop_assert!(session.timer_running());
        prop_assert_eq!(session.status(), SessionStatus::InProgress);
        prop_assert_eq!(session.preferences(), preferences);
    }

    #[test]
    fn high_score_never_decreases(
        actions in prop::collection::vec(action_strategy(), 0..60),
        initial in -5.0..20.0f64,
    ) {
        let mut session = QuizSession::new(build_document(3, 4.0, 1.0), Preferences::new(initial, false));
        let mut previous = session.high_score();
        for action in actions {
            apply(&mut session, action);
            prop_assert!(session.high_score() >= previous);
            previous = session.high_score();
        }
    }
}
