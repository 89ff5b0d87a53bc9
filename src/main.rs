use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use datetime_client::config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_CONTENT_TYPE, DEFAULT_ENDPOINT, DEFAULT_PORT,
    DEFAULT_TIMEOUT,
};
use datetime_client::http::{BoundedBackoff, DEFAULT_MAX_ELAPSED_TIME, TimeClient};
use datetime_client::timestamp::format_timestamp;

/// datetime-client - fetch the current time from a datetime server
///
/// Each setting is taken from its flag, then its environment variable,
/// then the built-in default.
///
/// Examples:
///   datetime-client                              # GET http://localhost:8083/datetime
///   datetime-client -c application/json -p 8080  # ask for JSON on port 8080
#[derive(Parser, Debug)]
#[command(author, version = env!("DATETIME_CLIENT_VERSION"), about)]
struct Cli {
    /// Base URL of the server
    #[arg(
        long = "base-url",
        short = 'b',
        env = "DATETIME_BASEURL",
        value_name = "URL",
        default_value = DEFAULT_BASE_URL
    )]
    base_url: String,

    /// Endpoint path serving the time
    #[arg(
        long,
        short = 'e',
        env = "DATETIME_ENDPOINT",
        value_name = "PATH",
        default_value = DEFAULT_ENDPOINT
    )]
    endpoint: String,

    /// Server port
    #[arg(long, short = 'p', env = "DATETIME_PORT", default_value = DEFAULT_PORT)]
    port: String,

    /// Content type to request (text/plain or application/json)
    #[arg(
        long = "content-type",
        short = 'c',
        env = "DATETIME_CONTENT_TYPE",
        value_name = "MIME",
        default_value = DEFAULT_CONTENT_TYPE
    )]
    content_type: String,

    /// Timeout of a single attempt, in seconds
    #[arg(
        long,
        env = "DATETIME_TIMEOUT",
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT.as_secs()
    )]
    timeout: u64,

    /// Total time spent retrying before giving up, in seconds
    #[arg(
        long = "max-elapsed",
        env = "DATETIME_MAX_ELAPSED",
        value_name = "SECONDS",
        default_value_t = DEFAULT_MAX_ELAPSED_TIME.as_secs()
    )]
    max_elapsed: u64,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig::new(
            self.base_url.clone(),
            self.endpoint.clone(),
            self.port.clone(),
            self.content_type.clone(),
            Duration::from_secs(self.timeout),
        )
    }

    fn backoff(&self) -> BoundedBackoff {
        BoundedBackoff::default()
            .with_max_elapsed_time(Some(Duration::from_secs(self.max_elapsed)))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let client = TimeClient::new(cli.client_config())
        .context("Failed to create client")?
        .with_backoff(cli.backoff());

    let time = client
        .fetch_time()
        .await
        .with_context(|| format!("Failed to fetch time from {}", client.url()))?;

    println!("{}", format_timestamp(&time));
    Ok(())
}
