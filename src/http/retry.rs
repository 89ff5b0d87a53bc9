//! Retry driver and the policy deciding which failures are worth retrying.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use backoff::backoff::Backoff;
use log::{debug, error, warn};
use tokio::time::Instant;

use super::schedule::BoundedBackoff;
use crate::error::TimeClientError;

/// What the driver does with a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the next backoff interval and try again.
    Retry,
    /// Return the error to the caller right away.
    FailFast,
}

/// Maps an attempt failure to a retry decision.
///
/// Only failures to send the request are transient. A 415 reflects what the
/// request asked for, and body or parse failures will not change on a
/// second read of the same endpoint.
pub fn classify(error: &TimeClientError) -> RetryDecision {
    match error {
        TimeClientError::Transport { .. } => RetryDecision::Retry,
        TimeClientError::UnsupportedMediaType(_)
        | TimeClientError::BodyRead(_)
        | TimeClientError::Parse { .. }
        | TimeClientError::InvalidConfig(_) => RetryDecision::FailFast,
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// the backoff schedule runs out of time.
///
/// `operation` receives the 1-based attempt number. `notify` is called with
/// the failure and the upcoming delay before every sleep. When the budget is
/// exhausted the last error is returned.
pub async fn retry_notify<T, F, Fut, N>(
    mut schedule: BoundedBackoff,
    mut operation: F,
    mut notify: N,
) -> Result<T, TimeClientError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, TimeClientError>>,
    N: FnMut(&TimeClientError, Duration),
{
    schedule.reset();
    let start = Instant::now();
    let attempts = AtomicUsize::new(0);

    let result = backoff::future::retry_notify(
        schedule,
        || {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            let pending = operation(attempt);
            async move {
                pending.await.map_err(|err| match classify(&err) {
                    RetryDecision::Retry => backoff::Error::transient(err),
                    RetryDecision::FailFast => {
                        debug!("attempt {} failed with non-retryable error: {}", attempt, err);
                        backoff::Error::permanent(err)
                    }
                })
            }
        },
        |err: TimeClientError, delay: Duration| {
            warn!(
                "attempt {} failed ({}), retrying in {}ms...",
                attempts.load(Ordering::SeqCst),
                err,
                delay.as_millis()
            );
            notify(&err, delay);
        },
    )
    .await;

    if let Err(err) = &result {
        if classify(err) == RetryDecision::Retry {
            error!(
                "giving up after {} attempts in {:?}: {}",
                attempts.load(Ordering::SeqCst),
                start.elapsed(),
                err
            );
        }
    }
    result
}
