//! Text analysis for raw word-list sources.
//!
//! Raw sources are heterogeneous: different line endings, mixed casing,
//! numbers, punctuation and blank lines. This module turns such text into
//! [`WordToken`]s, the only word representation the rest of the crate
//! accepts.
//!
//! ```text
//! raw text → lines → trim → lowercase → [a-z]+ check → WordToken
//! ```
//!
//! # Examples
//!
//! ```
//! use glossa::analysis::WordNormalizer;
//!
//! let normalizer = WordNormalizer::new();
//! let words: Vec<_> = normalizer
//!     .normalize_text("Apple\r\nword2test\n  banana  \n")
//!     .map(|w| w.into_string())
//!     .collect();
//!
//! assert_eq!(words, vec!["apple", "banana"]);
//! ```

pub mod normalizer;
pub mod token;

pub use normalizer::WordNormalizer;
pub use token::{WordToken, is_valid_word};
