use std::sync::Arc;

use dioxus::document::eval;
use dioxus::prelude::*;
use log::debug;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, QuizVm, start_quiz};
use super::components::{CompletionPanel, OptionButton, ProgressBar, ThemeToggle};
use super::keys::intent_for_key;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let ticker = ctx.ticker();

    let vm = use_signal(|| None::<QuizVm>);
    let countdown = use_signal(|| None::<Task>);

    let quiz_loop_for_resource = Arc::clone(&quiz_loop);
    let resource = use_resource(move || {
        let quiz_loop = Arc::clone(&quiz_loop_for_resource);
        let mut vm = vm;
        async move {
            let started = start_quiz(&quiz_loop).await?;
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    // One countdown task while the timer runs; cancelled as soon as it stops.
    let quiz_loop_for_timer = Arc::clone(&quiz_loop);
    use_effect(move || {
        let running = vm.read().as_ref().is_some_and(QuizVm::timer_running);
        let mut countdown = countdown;
        let existing = *countdown.peek();
        match (running, existing) {
            (true, None) => {
                let ticker = Arc::clone(&ticker);
                let quiz_loop = Arc::clone(&quiz_loop_for_timer);
                let mut vm = vm;
                let task = spawn(async move {
                    loop {
                        ticker.tick().await;
                        let still_running = vm.write().as_mut().is_some_and(|vm| {
                            vm.tick(&quiz_loop);
                            vm.timer_running()
                        });
                        if !still_running {
                            break;
                        }
                    }
                    countdown.set(None);
                });
                countdown.set(Some(task));
            }
            (false, Some(task)) => {
                debug!("countdown stopped");
                task.cancel();
                countdown.set(None);
            }
            _ => {}
        }
    });

    let dispatch_intent = {
        let quiz_loop = Arc::clone(&quiz_loop);
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            let change = vm
                .write()
                .as_mut()
                .and_then(|vm| vm.apply(&quiz_loop, intent));
            if let Some(change) = change {
                let quiz_loop = Arc::clone(&quiz_loop);
                spawn(async move {
                    quiz_loop.persist(change).await;
                });
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let completed = vm.read().as_ref().is_some_and(QuizVm::is_completed);
        if let Some(intent) = intent_for_key(&evt.data.key(), completed) {
            evt.prevent_default();
            dispatch_intent.call(intent);
        }
    });

    let mut did_focus = use_signal(|| false);
    use_effect(move || {
        if did_focus() {
            return;
        }
        did_focus.set(true);
        let _ = eval("document.getElementById(\"quiz-root\")?.focus();");
    });

    let vm_guard = vm.read();
    let theme_class = vm_guard
        .as_ref()
        .map_or("quiz-root theme-light", QuizVm::theme_class);

    rsx! {
        div {
            class: "{theme_class}",
            id: "quiz-root",
            tabindex: "0",
            onkeydown: on_key,
            match (state, vm_guard.as_ref()) {
                (ViewState::Error(err), _) => rsx! {
                    div { class: "quiz-card quiz-error",
                        h1 { class: "quiz-title", "Quiz unavailable" }
                        p { "{err.message()}" }
                    }
                },
                (ViewState::Ready(()), Some(quiz)) => rsx! {
                    ThemeToggle { dark: quiz.dark_mode(), on_intent: dispatch_intent }
                    div { class: "quiz-card",
                        h1 { class: "quiz-title", "{quiz.title()}" }
                        p { class: "quiz-meta", "{quiz.topic_label()}" }
                        p { class: "quiz-meta", "{quiz.high_score_label()}" }
                        if quiz.is_completed() {
                            CompletionPanel {
                                score_label: quiz.final_score_label(),
                                longest_streak_label: quiz.longest_streak_label(),
                                note: quiz.completion_note(),
                                on_intent: dispatch_intent,
                            }
                        } else {
                            p { class: "quiz-timer", id: "quiz-timer", "{quiz.countdown_label()}" }
                            h2 { class: "quiz-question-label", "{quiz.question_label()}" }
                            ProgressBar { percent: quiz.progress_percent() }
                            h3 { class: "quiz-question", "{quiz.question_text()}" }
                            div { class: "quiz-options",
                                for row in quiz.option_rows() {
                                    OptionButton { key: "{row.index}", row: row.clone(), on_intent: dispatch_intent }
                                }
                            }
                            if let Some(correct) = quiz.correct_answer_label() {
                                div { class: "quiz-correct", p { "{correct}" } }
                            }
                            div { class: "quiz-nav",
                                button {
                                    class: "quiz-btn quiz-btn--secondary",
                                    id: "quiz-previous",
                                    r#type: "button",
                                    disabled: !quiz.can_go_previous(),
                                    onclick: move |_| dispatch_intent.call(QuizIntent::Previous),
                                    "Previous"
                                }
                                button {
                                    class: "quiz-btn quiz-btn--primary",
                                    id: "quiz-next",
                                    r#type: "button",
                                    onclick: move |_| dispatch_intent.call(QuizIntent::Next),
                                    "Next"
                                }
                            }
                            p { class: "quiz-streak", "{quiz.streak_label()}" }
                        }
                    }
                },
                _ => rsx! {
                    div { class: "quiz-loading", "Loading..." }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
