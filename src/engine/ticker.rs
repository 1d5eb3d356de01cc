//! One-second tick source.
//!
//! Wraps `tokio::time::interval` so that the first tick after arming lands a
//! full period later. The session polls the ticker only while the engine is
//! running, which is what gates ticks on the running flag.

use tokio::time::{interval, Duration, Interval, MissedTickBehavior};

/// The period of one engine tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic trigger for [`IntervalTimerEngine::tick`](super::IntervalTimerEngine::tick).
#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    /// Creates a ticker with the standard one-second period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    /// Creates a ticker with a custom period.
    pub fn with_period(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // `interval` fires immediately on the first poll; push it one period out.
        interval.reset();
        Self { interval }
    }

    /// Restarts the period so that the next tick is one full period from now.
    ///
    /// Called whenever the timer goes from paused to running.
    pub fn arm(&mut self) {
        self.interval.reset();
    }

    /// Waits for the next tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Returns the tick period.
    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}
