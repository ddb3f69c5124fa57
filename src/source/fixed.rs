//! In-memory fetcher with fixed responses.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{GlossaError, Result};
use crate::source::fetcher::Fetcher;

/// Serves fixed text for known identifiers and fails for everything else.
///
/// Useful for tests and for reproducible generation from bundled data.
///
/// ```
/// use glossa::source::{Fetcher, StaticFetcher};
///
/// # async fn example() -> glossa::error::Result<()> {
/// let fetcher = StaticFetcher::new()
///     .with_source("a", "apple\nbanana")
///     .with_failure("b", "Network error");
///
/// assert_eq!(fetcher.fetch("a").await?, "apple\nbanana");
/// assert!(fetcher.fetch("b").await.is_err());
/// assert!(fetcher.fetch("c").await.is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    responses: HashMap<String, std::result::Result<String, String>>,
}

impl StaticFetcher {
    /// Create a fetcher that knows no sources.
    pub fn new() -> Self {
        StaticFetcher {
            responses: HashMap::new(),
        }
    }

    /// Serve `text` for `source`.
    pub fn with_source<S: Into<String>, T: Into<String>>(mut self, source: S, text: T) -> Self {
        self.responses.insert(source.into(), Ok(text.into()));
        self
    }

    /// Fail with `message` for `source`.
    pub fn with_failure<S: Into<String>, M: Into<String>>(mut self, source: S, message: M) -> Self {
        self.responses.insert(source.into(), Err(message.into()));
        self
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, source: &str) -> Result<String> {
        match self.responses.get(source) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(message)) => Err(GlossaError::fetch(source, message.clone())),
            None => Err(GlossaError::fetch(source, "unknown source")),
        }
    }

    fn name(&self) -> &str {
        "static"
    }
}
