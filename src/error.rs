//! Error types for the Glossa library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`GlossaError`] enum. Storage backends have their own
//! [`StorageError`](crate::storage::StorageError) which converts into
//! `GlossaError::Storage`.
//!
//! # Examples
//!
//! ```
//! use glossa::error::{GlossaError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(GlossaError::invalid_word("word2test"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::time::Duration;

use thiserror::Error;

/// The main error type for Glossa operations.
#[derive(Error, Debug)]
pub enum GlossaError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A single source could not be fetched.
    ///
    /// The builder logs and records this error and moves on to the next
    /// source; it never aborts a generation run.
    #[error("Failed to fetch from {source_id}: {message}")]
    Fetch { source_id: String, message: String },

    /// The persisted word list is missing, unreadable, or not a JSON array of
    /// strings.
    #[error("Artifact load error: {0}")]
    ArtifactLoad(String),

    /// A string that does not satisfy the word validity predicate.
    #[error("Invalid word: {0:?}")]
    InvalidWord(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with GlossaError.
pub type Result<T> = std::result::Result<T, GlossaError>;

impl GlossaError {
    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        GlossaError::Storage(msg.into())
    }

    /// Create a new fetch error for the given source.
    pub fn fetch<S: Into<String>, M: Into<String>>(source_id: S, msg: M) -> Self {
        GlossaError::Fetch {
            source_id: source_id.into(),
            message: msg.into(),
        }
    }

    /// Create a new artifact load error.
    pub fn artifact_load<S: Into<String>>(msg: S) -> Self {
        GlossaError::ArtifactLoad(msg.into())
    }

    /// Create a new invalid word error.
    pub fn invalid_word<S: Into<String>>(word: S) -> Self {
        GlossaError::InvalidWord(word.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        GlossaError::Config(msg.into())
    }

    /// Create a fetch error for a source that did not answer within `limit`.
    pub fn fetch_timeout<S: Into<String>>(source_id: S, limit: Duration) -> Self {
        Self::fetch(source_id, format!("timed out after {limit:?}"))
    }

    /// Whether this error came from fetching a single source.
    pub fn is_fetch(&self) -> bool {
        matches!(self, GlossaError::Fetch { .. })
    }
}
