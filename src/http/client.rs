//! Time client: one GET per attempt, retried under exponential backoff.

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Response, StatusCode, Url};

use super::retry::retry_notify;
use super::schedule::BoundedBackoff;
use crate::config::ClientConfig;
use crate::error::TimeClientError;
use crate::timestamp::parse_timestamp;

/// Fetches the current time from a datetime server.
#[derive(Debug, Clone)]
pub struct TimeClient {
    config: ClientConfig,
    url: Url,
    content_type: HeaderValue,
    client: Client,
    backoff: BoundedBackoff,
}

impl TimeClient {
    /// Creates a client for the given configuration.
    ///
    /// The URL and the content-type value are validated here, so a bad
    /// configuration fails once instead of being retried.
    pub fn new(config: ClientConfig) -> Result<Self, TimeClientError> {
        let raw_url = config.url();
        let url = Url::parse(&raw_url)
            .map_err(|e| TimeClientError::InvalidConfig(format!("url {:?}: {}", raw_url, e)))?;

        let content_type = HeaderValue::from_str(&config.content_type).map_err(|e| {
            TimeClientError::InvalidConfig(format!(
                "content type {:?}: {}",
                config.content_type, e
            ))
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TimeClientError::InvalidConfig(format!("http client: {}", e)))?;

        info!("New client created for {} ({})", url, config.content_type);

        Ok(Self {
            config,
            url,
            content_type,
            client,
            backoff: BoundedBackoff::default(),
        })
    }

    /// Replaces the retry schedule.
    pub fn with_backoff(mut self, backoff: BoundedBackoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns the configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the validated request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Sends a single GET request, without retry.
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn send_request(&self) -> Result<Response, reqwest::Error> {
        debug!("GET {} (content-type: {})...", self.url, self.config.content_type);

        let response = self
            .client
            .get(self.url.clone())
            .header(CONTENT_TYPE, self.content_type.clone())
            .send()
            .await?;

        debug!("{} responded with {}", self.url, response.status());
        Ok(response)
    }

    /// Sends the request, retrying failed sends until the backoff budget
    /// runs out. Any HTTP status counts as a successful send.
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn retry_send_request(&self) -> Result<Response, TimeClientError> {
        retry_notify(
            self.backoff.clone(),
            |attempt| async move {
                self.send_request()
                    .await
                    .map_err(|source| TimeClientError::Transport {
                        attempts: attempt,
                        source,
                    })
            },
            |_, _| {},
        )
        .await
    }

    /// Fetches and parses the server time.
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_time(&self) -> Result<DateTime<Utc>, TimeClientError> {
        self.fetch_time_notify(|_, _| {}).await
    }

    /// Like [`fetch_time`](Self::fetch_time), calling `notify` with the
    /// failure and the upcoming delay before each retry.
    pub async fn fetch_time_notify<N>(&self, notify: N) -> Result<DateTime<Utc>, TimeClientError>
    where
        N: FnMut(&TimeClientError, Duration),
    {
        retry_notify(
            self.backoff.clone(),
            |attempt| self.fetch_time_once(attempt),
            notify,
        )
        .await
    }

    /// One send-read-parse cycle. The response is consumed before returning.
    async fn fetch_time_once(&self, attempt: usize) -> Result<DateTime<Utc>, TimeClientError> {
        let response = self
            .send_request()
            .await
            .map_err(|source| TimeClientError::Transport {
                attempts: attempt,
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(TimeClientError::BodyRead)?;

        if status == StatusCode::UNSUPPORTED_MEDIA_TYPE {
            let reason = status
                .canonical_reason()
                .unwrap_or("Unsupported Media Type");
            return Err(TimeClientError::UnsupportedMediaType(reason.to_string()));
        }

        parse_timestamp(&body)
    }
}
