use std::sync::Arc;

use services::{AppServices, QuizLoopService, Ticker};

/// What the view layer needs from the composition root.
pub trait UiApp: Send + Sync {
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn ticker(&self) -> Arc<dyn Ticker>;
}

impl UiApp for AppServices {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        AppServices::quiz_loop(self)
    }

    fn ticker(&self) -> Arc<dyn Ticker> {
        AppServices::ticker(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    quiz_loop: Arc<QuizLoopService>,
    ticker: Arc<dyn Ticker>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_loop: app.quiz_loop(),
            ticker: app.ticker(),
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn ticker(&self) -> Arc<dyn Ticker> {
        Arc::clone(&self.ticker)
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
