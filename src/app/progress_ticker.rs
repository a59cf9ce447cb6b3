//! Periodic progress ticks while a retrieval is in flight

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::ports::ProgressPort;

/// Default interval between two ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Shortest interval a ticker runs with
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Starts background tick tasks
pub struct ProgressTicker;

impl ProgressTicker {
    /// Spawn a task that ticks `progress` for `video_key` every `interval`.
    ///
    /// The first tick happens one interval after the start; intervals below
    /// `MIN_TICK_INTERVAL` are raised to it. Must be called from within a
    /// tokio runtime.
    pub fn start(
        progress: Arc<dyn ProgressPort>,
        video_key: impl Into<String>,
        interval: Duration,
    ) -> TickerHandle {
        let video_key = video_key.into();
        let interval = interval.max(MIN_TICK_INTERVAL);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut count: u64 = 0;

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = ticks.tick() => {
                        progress.tick(&video_key);
                        count += 1;
                    }
                }
            }

            debug!(key = %video_key, ticks = count, "Progress ticker stopped");
            count
        });

        TickerHandle {
            stop_tx: Some(stop_tx),
            task: Some(task),
        }
    }
}

/// Handle to a running ticker.
///
/// `stop` sends the stop signal and waits for the task. A handle dropped
/// without `stop` still sends the signal, so every exit path ends the ticks.
pub struct TickerHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<u64>>,
}

impl TickerHandle {
    /// Stop ticking and return the number of ticks emitted.
    ///
    /// No tick is emitted once this returns.
    pub async fn stop(mut self) -> u64 {
        self.signal_stop();
        match self.task.take() {
            Some(task) => match task.await {
                Ok(count) => count,
                Err(e) => {
                    warn!("Progress ticker ended abnormally: {}", e);
                    0
                }
            },
            None => 0,
        }
    }

    fn signal_stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            // Ticker may already be gone
            let _ = stop_tx.send(());
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.signal_stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Default)]
    struct CountingProgress {
        ticks: AtomicU64,
    }

    impl ProgressPort for CountingProgress {
        fn tick(&self, _video_key: &str) {
            self.ticks.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_ticker_ticks_while_running() {
        let progress = Arc::new(CountingProgress::default());
        let handle = ProgressTicker::start(progress.clone(), "video", Duration::from_millis(10));

        time::sleep(Duration::from_millis(100)).await;
        let reported = handle.stop().await;

        let observed = progress.ticks.load(Ordering::SeqCst);
        assert!(observed >= 2, "expected several ticks, got {}", observed);
        assert_eq!(reported, observed);
    }

    #[tokio::test]
    async fn test_zero_interval_is_raised_to_minimum() {
        let progress = Arc::new(CountingProgress::default());
        let handle = ProgressTicker::start(progress.clone(), "video", Duration::ZERO);

        time::sleep(Duration::from_millis(30)).await;
        let reported = handle.stop().await;

        assert!(reported > 0, "ticker did not run");
        assert_eq!(reported, progress.ticks.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_no_tick_after_stop() {
        let progress = Arc::new(CountingProgress::default());
        let handle = ProgressTicker::start(progress.clone(), "video", Duration::from_millis(5));

        time::sleep(Duration::from_millis(30)).await;
        handle.stop().await;
        let at_stop = progress.ticks.load(Ordering::SeqCst);

        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(progress.ticks.load(Ordering::SeqCst), at_stop);
    }

    #[tokio::test]
    async fn test_immediate_stop_emits_nothing() {
        let progress = Arc::new(CountingProgress::default());
        let handle = ProgressTicker::start(progress.clone(), "video", Duration::from_millis(200));

        assert_eq!(handle.stop().await, 0);
        assert_eq!(progress.ticks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_drop_stops_ticker() {
        let progress = Arc::new(CountingProgress::default());
        let handle = ProgressTicker::start(progress.clone(), "video", Duration::from_millis(5));

        time::sleep(Duration::from_millis(20)).await;
        drop(handle);
        // Let the ticker task observe the signal
        time::sleep(Duration::from_millis(20)).await;
        let after_drop = progress.ticks.load(Ordering::SeqCst);

        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(progress.ticks.load(Ordering::SeqCst), after_drop);
    }

    #[tokio::test]
    async fn test_signal_after_task_ended_does_not_block() {
        let progress = Arc::new(CountingProgress::default());
        let mut handle = ProgressTicker::start(progress, "video", Duration::from_millis(5));

        if let Some(task) = handle.task.take() {
            task.abort();
            let _ = task.await;
        }
        handle.signal_stop();
        assert_eq!(handle.stop().await, 0);
    }
}
