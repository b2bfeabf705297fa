use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_HOLD_SECONDS: u32 = 300;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoldState {
    /// Nothing selected, countdown stopped
    Idle,
    /// Selection non-empty, counting down
    Running,
    /// Countdown reached zero; the owner must clear the selection and `reset`
    Expired,
}

/// Result of advancing the countdown by one second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    NotRunning,
    Remaining(u32),
    Expired,
}

/// Countdown that bounds how long a selection may be held without checking out.
///
/// Purely logical: it only moves when `tick` is called. `HoldTicker` supplies
/// the one-second cadence.
#[derive(Debug, Clone)]
pub struct HoldTimer {
    state: HoldState,
    remaining: u32,
    duration: u32,
}

impl Default for HoldTimer {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_SECONDS)
    }
}

impl HoldTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            state: HoldState::Idle,
            remaining: duration_secs,
            duration: duration_secs,
        }
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration
    }

    /// Follow the selection size: a non-empty selection starts a hold, an
    /// empty one stops it.
    pub fn on_selection_changed(&mut self, selected: usize) {
        match (self.state, selected) {
            (HoldState::Idle, n) if n > 0 => {
                self.remaining = self.duration;
                self.state = HoldState::Running;
            }
            (HoldState::Running, 0) => {
                self.state = HoldState::Idle;
            }
            _ => {}
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != HoldState::Running {
            return TickOutcome::NotRunning;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = HoldState::Expired;
            TickOutcome::Expired
        } else {
            TickOutcome::Remaining(self.remaining)
        }
    }

    /// Back to Idle with a full countdown ready for the next hold
    pub fn reset(&mut self) {
        self.state = HoldState::Idle;
        self.remaining = self.duration;
    }

    /// Stop counting without rearming (the selection view was left)
    pub fn stop(&mut self) {
        if self.state == HoldState::Running {
            self.state = HoldState::Idle;
        }
    }
}

/// Cancellable one-second cadence driving a `HoldTimer`.
///
/// The task runs until `stop` is called or the ticker is dropped, or until
/// the callback returns `false`.
#[derive(Debug)]
pub struct HoldTicker {
    handle: JoinHandle<()>,
}

impl HoldTicker {
    pub fn start<F, Fut>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !on_tick().await {
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for HoldTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_idle_until_selection() {
        let mut timer = HoldTimer::default();
        assert_eq!(timer.state(), HoldState::Idle);
        assert_eq!(timer.tick(), TickOutcome::NotRunning);
        assert_eq!(timer.remaining_secs(), 300);

        timer.on_selection_changed(1);
        assert_eq!(timer.state(), HoldState::Running);
        assert_eq!(timer.tick(), TickOutcome::Remaining(299));
    }

    #[test]
    fn test_full_countdown_expires_and_rearms() {
        let mut timer = HoldTimer::default();
        timer.on_selection_changed(1);

        for _ in 0..299 {
            assert!(matches!(timer.tick(), TickOutcome::Remaining(_)));
        }
        assert_eq!(timer.remaining_secs(), 1);
        assert_eq!(timer.tick(), TickOutcome::Expired);
        assert_eq!(timer.state(), HoldState::Expired);
        assert_eq!(timer.tick(), TickOutcome::NotRunning);

        timer.reset();
        assert_eq!(timer.state(), HoldState::Idle);
        assert_eq!(timer.remaining_secs(), 300);
    }

    #[test]
    fn test_emptied_selection_stops_countdown() {
        let mut timer = HoldTimer::default();
        timer.on_selection_changed(2);
        for _ in 0..10 {
            timer.tick();
        }
        timer.on_selection_changed(0);
        assert_eq!(timer.state(), HoldState::Idle);
        assert_eq!(timer.tick(), TickOutcome::NotRunning);
        assert_eq!(timer.remaining_secs(), 290);

        // A new hold starts from the full duration
        timer.on_selection_changed(1);
        assert_eq!(timer.remaining_secs(), 300);
    }

    #[test]
    fn test_growing_selection_keeps_countdown() {
        let mut timer = HoldTimer::default();
        timer.on_selection_changed(1);
        timer.tick();
        timer.on_selection_changed(2);
        assert_eq!(timer.remaining_secs(), 299);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_cadence_and_stop() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = ticks.clone();
        let ticker = HoldTicker::start(Duration::from_secs(1), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            }
        });

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);

        ticker.stop();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert!(!ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_ends_when_callback_declines() {
        let ticker = HoldTicker::start(Duration::from_secs(1), || async { false });
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!ticker.is_running());
    }
}
