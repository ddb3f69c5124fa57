//! The validated word type.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GlossaError, Result};

/// Check whether `word` is a valid stored word: non-empty and made only of
/// the 26 lowercase ASCII letters.
pub fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}

/// A single validated word.
///
/// A `WordToken` always satisfies [`is_valid_word`]. It can only be created
/// by the [`WordNormalizer`](crate::analysis::WordNormalizer) or through the
/// validating [`TryFrom`] conversions, and is immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WordToken(String);

impl WordToken {
    /// Wrap a string already known to be valid.
    pub(crate) fn new_unchecked(word: String) -> Self {
        debug_assert!(is_valid_word(&word), "invalid word token: {word:?}");
        WordToken(word)
    }

    /// The word as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the word in bytes (equal to its length in letters).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `str`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the token and return the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for WordToken {
    type Error = GlossaError;

    fn try_from(word: String) -> Result<Self> {
        if is_valid_word(&word) {
            Ok(WordToken(word))
        } else {
            Err(GlossaError::invalid_word(word))
        }
    }
}

impl TryFrom<&str> for WordToken {
    type Error = GlossaError;

    fn try_from(word: &str) -> Result<Self> {
        WordToken::try_from(word.to_string())
    }
}

impl From<WordToken> for String {
    fn from(token: WordToken) -> Self {
        token.0
    }
}

impl AsRef<str> for WordToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for WordToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("apple"));
        assert!(is_valid_word("a"));

        assert!(!is_valid_word(""));
        assert!(!is_valid_word("Apple"));
        assert!(!is_valid_word("word2test"));
        assert!(!is_valid_word("two words"));
        assert!(!is_valid_word("don't"));
        assert!(!is_valid_word("café"));
    }

    #[test]
    fn test_try_from() {
        let token = WordToken::try_from("banana").unwrap();
        assert_eq!(token.as_str(), "banana");
        assert_eq!(token.len(), 6);
        assert_eq!(token.to_string(), "banana");

        let err = WordToken::try_from("INVALID123").unwrap_err();
        assert!(matches!(err, GlossaError::InvalidWord(ref w) if w == "INVALID123"));
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let mut tokens: Vec<WordToken> = ["cherry", "apple", "applesauce", "b"]
            .into_iter()
            .map(|w| WordToken::try_from(w).unwrap())
            .collect();
        tokens.sort();

        let words: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
        assert_eq!(words, vec!["apple", "applesauce", "b", "cherry"]);
    }

    #[test]
    fn test_serde_validates() {
        let token: WordToken = serde_json::from_str("\"grape\"").unwrap();
        assert_eq!(token.as_str(), "grape");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"grape\"");

        assert!(serde_json::from_str::<WordToken>("\"Grape\"").is_err());
    }
}
