//! Client configuration.

use std::time::Duration;

/// Default base URL of the datetime server.
pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Default endpoint serving the current time.
pub const DEFAULT_ENDPOINT: &str = "/datetime";

/// Default server port.
pub const DEFAULT_PORT: &str = "8083";

/// Default content type sent with each request.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Resolved settings for a [`TimeClient`](crate::http::TimeClient).
///
/// Built once by the caller and moved into the client; the client never
/// reads the process environment itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub endpoint: String,
    pub port: String,
    pub content_type: String,
    /// Timeout applied to each individual attempt.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            port: DEFAULT_PORT.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration from explicit values.
    pub fn new(
        base_url: impl Into<String>,
        endpoint: impl Into<String>,
        port: impl Into<String>,
        content_type: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            endpoint: endpoint.into(),
            port: port.into(),
            content_type: content_type.into(),
            timeout,
        }
    }

    /// Sets the base URL, scheme included.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the endpoint path; may be empty.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the server port.
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    /// Sets the content type sent with each request.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full request URL: `{base_url}:{port}{endpoint}`.
    pub fn url(&self) -> String {
        format!("{}:{}{}", self.base_url, self.port, self.endpoint)
    }
}
