//! Line normalizer for raw word-list text.
//!
//! Every raw line goes through the same steps:
//!
//! - surrounding whitespace is trimmed (this also removes the `\r` left over
//!   from Windows line endings, and a leading byte-order mark)
//! - every character is lowercased
//! - the result is kept only if it is non-empty and consists solely of
//!   `a`-`z`
//!
//! Rejected lines are dropped silently. Third-party lists routinely contain
//! numbers, phrases, abbreviations with punctuation and blank lines; none of
//! that is an error.

use crate::analysis::token::{WordToken, is_valid_word};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Turns raw lines of text into [`WordToken`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct WordNormalizer;

impl WordNormalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        WordNormalizer
    }

    /// Normalize a single raw line into zero or one word.
    ///
    /// # Examples
    ///
    /// ```
    /// use glossa::analysis::WordNormalizer;
    ///
    /// let normalizer = WordNormalizer::new();
    /// assert_eq!(normalizer.normalize_line("  Apple\r").unwrap().as_str(), "apple");
    /// assert!(normalizer.normalize_line("word2test").is_none());
    /// assert!(normalizer.normalize_line("").is_none());
    /// ```
    pub fn normalize_line(&self, line: &str) -> Option<WordToken> {
        let trimmed = line.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK);
        if trimmed.is_empty() {
            return None;
        }

        let lowered = if trimmed.is_ascii() {
            trimmed.to_ascii_lowercase()
        } else {
            // A few non-ASCII characters lowercase into ASCII letters
            // (e.g. KELVIN SIGN → 'k').
            trimmed.to_lowercase()
        };

        is_valid_word(&lowered).then(|| WordToken::new_unchecked(lowered))
    }

    /// Split `text` on `\n` or `\r\n` and normalize every line.
    pub fn normalize_text<'a>(&self, text: &'a str) -> impl Iterator<Item = WordToken> + 'a {
        let normalizer = *self;
        text.lines().filter_map(move |line| normalizer.normalize_line(line))
    }
}
