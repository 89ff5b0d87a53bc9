//! Client for a "datetime" HTTP endpoint.
//!
//! [`TimeClient`] sends one GET per attempt, retries failed sends under a
//! [`BoundedBackoff`] schedule bounded by total elapsed time, and parses
//! the body as an ANSI C timestamp.

pub mod config;
pub mod error;
pub mod http;
pub mod timestamp;

pub use config::ClientConfig;
pub use error::TimeClientError;
pub use http::{BoundedBackoff, TimeClient};
