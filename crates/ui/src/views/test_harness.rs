use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{Question, QuizDocument, QuizOption};
use services::{QuizLoopService, QuizSource, StaticQuizSource, Ticker};
use storage::repository::Storage;
use tokio::sync::Notify;

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;
use crate::views::quiz::QuizTestHandles;

/// Ticker that fires only when the test advances it.
///
/// An advance with no countdown waiting is dropped, like a second that passes
/// while no timer runs.
#[derive(Default)]
pub struct ManualTicker {
    notify: Notify,
}

impl ManualTicker {
    pub fn advance(&self) {
        self.notify.notify_waiters();
    }
}

#[async_trait]
impl Ticker for ManualTicker {
    async fn tick(&self) {
        self.notify.notified().await;
    }
}

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
    ticker: Arc<ManualTicker>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn ticker(&self) -> Arc<dyn Ticker> {
        self.ticker.clone()
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizHarnessRoot(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct QuizHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub ticker: Arc<ManualTicker>,
    pub handles: QuizTestHandles,
}

impl QuizHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let spawned work (resource, countdown, persistence) run to quiescence.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn dispatch(&mut self, intent: crate::vm::QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub async fn tick(&mut self) {
        self.ticker.advance();
        self.settle().await;
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        let vm = self.handles.vm();
        self.dom
            .in_runtime(|| vm.read().as_ref().map(|vm| vm.session().remaining_secs()))
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Two questions worth 4 marks each, 1 mark off per wrong answer.
/// Option 0 is correct for the first question, option 1 for the second.
pub fn sample_document() -> QuizDocument {
    let questions = vec![
        Question::new(
            "Which planet is known as the Red Planet?",
            vec![QuizOption::new("Mars", true), QuizOption::new("Venus", false)],
        ),
        Question::new(
            "What is 2 + 2?",
            vec![QuizOption::new("3", false), QuizOption::new("4", true)],
        ),
    ];
    QuizDocument::new("Sample Quiz", "Basics", 4.0, 1.0, questions).expect("valid document")
}

pub fn setup_quiz_harness(source: Arc<dyn QuizSource>, time_limit_secs: u32) -> QuizHarness {
    setup_quiz_harness_with_storage(source, time_limit_secs, Storage::in_memory())
}

pub fn setup_quiz_harness_with_storage(
    source: Arc<dyn QuizSource>,
    time_limit_secs: u32,
    storage: Storage,
) -> QuizHarness {
    let quiz_loop = Arc::new(
        QuizLoopService::new(source, Arc::clone(&storage.preferences))
            .with_time_limit(time_limit_secs),
    );
    let ticker = Arc::new(ManualTicker::default());
    let handles = QuizTestHandles::default();
    let app = Arc::new(TestApp {
        quiz_loop,
        ticker: Arc::clone(&ticker),
    });

    let dom = VirtualDom::new_with_props(
        QuizHarnessRoot,
        HarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    QuizHarness {
        dom,
        storage,
        ticker,
        handles,
    }
}

pub fn static_source() -> Arc<dyn QuizSource> {
    Arc::new(StaticQuizSource::new(sample_document()))
}
