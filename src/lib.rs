//! # Glossa
//!
//! A static English word lexicon for Rust.
//!
//! ## Features
//!
//! - Aggregates word lists from many plain-text sources
//! - Normalizes, deduplicates and sorts into one canonical JSON artifact
//! - Atomic replacement of the persisted artifact
//! - Pluggable fetchers (HTTP, local files) and storage backends
//! - Load-once, lock-free lexicon for membership queries

pub mod analysis;
pub mod builder;
pub mod cli;
pub mod error;
pub mod lexicon;
pub mod source;
pub mod storage;
pub mod word_list;

pub mod prelude {
    pub use crate::builder::{BuilderConfig, GenerationReport, ListBuilder};
    pub use crate::error::{GlossaError, Result};
    pub use crate::lexicon::{Lexicon, LexiconConfig};
    pub use crate::source::{Fetcher, SourceConfig};
    pub use crate::storage::{Storage, StorageConfig, StorageFactory};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
