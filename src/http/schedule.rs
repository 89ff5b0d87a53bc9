//! Retry schedule: the `backoff` crate's exponential intervals under a
//! total-time budget measured on the tokio clock.

use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use tokio::time::Instant;

/// Total time budget for one retrying call.
pub const DEFAULT_MAX_ELAPSED_TIME: Duration = Duration::from_secs(10);

/// Exponential backoff bounded by total elapsed time.
///
/// Intervals come from [`backoff::ExponentialBackoff`] (500 ms initial,
/// multiplier 1.5, randomization factor 0.5, 60 s cap by default). There is
/// no attempt limit. Once `max_elapsed_time` has passed since the last
/// [`reset`](Backoff::reset) the schedule ends, and the last delay is clipped
/// to the time that remains, so an exhausted call never ends early.
#[derive(Debug, Clone)]
pub struct BoundedBackoff {
    intervals: ExponentialBackoff,
    max_elapsed_time: Option<Duration>,
    start: Instant,
}

impl Default for BoundedBackoff {
    fn default() -> Self {
        Self::new(
            ExponentialBackoffBuilder::new()
                .with_max_elapsed_time(Some(DEFAULT_MAX_ELAPSED_TIME))
                .build(),
        )
    }
}

impl BoundedBackoff {
    /// Wraps an interval schedule; its `max_elapsed_time` becomes the budget.
    pub fn new(mut intervals: ExponentialBackoff) -> Self {
        let max_elapsed_time = intervals.max_elapsed_time.take();
        Self {
            intervals,
            max_elapsed_time,
            start: Instant::now(),
        }
    }

    /// Replaces the budget; `None` retries forever.
    pub fn with_max_elapsed_time(mut self, max_elapsed_time: Option<Duration>) -> Self {
        self.max_elapsed_time = max_elapsed_time;
        self
    }

    /// Returns the total time budget.
    pub fn max_elapsed_time(&self) -> Option<Duration> {
        self.max_elapsed_time
    }
}

impl Backoff for BoundedBackoff {
    fn reset(&mut self) {
        self.intervals.reset();
        self.start = Instant::now();
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        let elapsed = self.start.elapsed();
        let remaining = match self.max_elapsed_time {
            Some(max) if elapsed >= max => return None,
            Some(max) => Some(max - elapsed),
            None => None,
        };

        let next = self.intervals.next_backoff()?;
        Some(match remaining {
            Some(remaining) => next.min(remaining),
            None => next,
        })
    }
}
