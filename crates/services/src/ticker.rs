use std::time::Duration;

use async_trait::async_trait;

/// Periodic wake-up source for the quiz countdown.
///
/// The countdown loop awaits `tick` and applies one countdown step each time
/// it completes. Dropping the awaiting future stops the countdown.
#[async_trait]
pub trait Ticker: Send + Sync {
    async fn tick(&self);
}

/// Ticker backed by tokio's timer.
#[derive(Clone, Copy, Debug)]
pub struct IntervalTicker {
    period: Duration,
}

impl IntervalTicker {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&self) {
        tokio::time::sleep(self.period).await;
    }
}
