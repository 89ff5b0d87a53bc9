//! HTTP time client with backoff-driven retry.

mod client;
mod retry;
mod schedule;

pub use client::TimeClient;
pub use retry::{RetryDecision, classify, retry_notify};
pub use schedule::{BoundedBackoff, DEFAULT_MAX_ELAPSED_TIME};
