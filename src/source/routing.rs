//! Scheme-based fetcher dispatch.

use async_trait::async_trait;

use crate::error::Result;
use crate::source::fetcher::Fetcher;
use crate::source::file::FileFetcher;
use crate::source::http::HttpFetcher;

/// Sends `http://` and `https://` sources to an [`HttpFetcher`] and every
/// other identifier to a [`FileFetcher`].
#[derive(Debug, Clone)]
pub struct RoutingFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl RoutingFetcher {
    /// Create a router from its two backends.
    pub fn new(http: HttpFetcher, file: FileFetcher) -> Self {
        RoutingFetcher { http, file }
    }

    /// Create a router with default HTTP settings.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(HttpFetcher::new()?, FileFetcher::new()))
    }

    fn is_remote(source: &str) -> bool {
        let lower = source.get(..8).unwrap_or(source).to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }
}

#[async_trait]
impl Fetcher for RoutingFetcher {
    async fn fetch(&self, source: &str) -> Result<String> {
        if Self::is_remote(source) {
            self.http.fetch(source).await
        } else {
            self.file.fetch(source).await
        }
    }

    fn name(&self) -> &str {
        "routing"
    }
}
