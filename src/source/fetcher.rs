//! The fetcher trait.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Retrieves the raw text of a word-list source.
///
/// Implementations report every failure (unreachable host, non-2xx status,
/// unreadable file, undecodable body) as
/// [`GlossaError::Fetch`](crate::error::GlossaError::Fetch). Callers decide
/// what a failure means; the list builder logs it and moves on.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use glossa::error::{GlossaError, Result};
/// use glossa::source::Fetcher;
///
/// #[derive(Debug)]
/// struct Alphabet;
///
/// #[async_trait]
/// impl Fetcher for Alphabet {
///     async fn fetch(&self, source: &str) -> Result<String> {
///         match source {
///             "alphabet" => Ok("a\nb\nc".to_string()),
///             other => Err(GlossaError::fetch(other, "unknown source")),
///         }
///     }
///
///     fn name(&self) -> &str {
///         "alphabet"
///     }
/// }
/// ```
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    /// Fetch the raw text behind `source`.
    async fn fetch(&self, source: &str) -> Result<String>;

    /// Get the name/identifier of this fetcher.
    fn name(&self) -> &str;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, source: &str) -> Result<String> {
        self.as_ref().fetch(source).await
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }
}
