//! Error types for the time client.

use thiserror::Error;

/// Terminal failure of a time fetch.
#[derive(Debug, Error)]
pub enum TimeClientError {
    /// Every send attempt failed and the retry budget ran out.
    #[error("failed to make the request after {attempts} attempts: {source}")]
    Transport {
        attempts: usize,
        #[source]
        source: reqwest::Error,
    },

    /// The server rejected the requested content type (HTTP 415).
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// The response body could not be read.
    #[error("error in reading response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// The body is not an ANSI C timestamp.
    #[error("cannot parse {body:?} as a timestamp: {source}")]
    Parse {
        body: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The configuration cannot produce a valid request.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}
