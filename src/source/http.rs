//! HTTP fetcher backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{GlossaError, Result};
use crate::source::fetcher::Fetcher;

const USER_AGENT: &str = concat!("glossa/", env!("CARGO_PKG_VERSION"));

/// Fetches sources over HTTP(S) with a plain `GET`.
///
/// Any transport error or non-2xx status is a fetch error. No retries are
/// performed.
///
/// # Examples
///
/// ```no_run
/// use glossa::source::{Fetcher, HttpFetcher};
///
/// # async fn example() -> glossa::error::Result<()> {
/// let fetcher = HttpFetcher::new()?;
/// let text = fetcher
///     .fetch("https://www.mit.edu/~ecprice/wordlist.10000")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    /// HTTP client for making requests.
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with default client settings.
    pub fn new() -> Result<Self> {
        Self::with_connect_timeout(Duration::from_secs(30))
    }

    /// Create a fetcher whose connection attempts give up after `timeout`.
    pub fn with_connect_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| GlossaError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(HttpFetcher { client })
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: Client) -> Self {
        HttpFetcher { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, source: &str) -> Result<String> {
        let response = self
            .client
            .get(source)
            .send()
            .await
            .map_err(|e| GlossaError::fetch(source, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GlossaError::fetch(source, format!("HTTP status {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| GlossaError::fetch(source, format!("failed to read body: {e}")))
    }

    fn name(&self) -> &str {
        "http"
    }
}
