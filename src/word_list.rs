//! Word sets and the canonical, persisted word list.
//!
//! [`WordSet`] is the accumulator used while sources are merged: insertion
//! order is irrelevant and re-inserting a word is a no-op. [`WordList`] is the
//! canonical form that gets persisted: strictly ascending by byte value and
//! free of duplicates. The only ways to obtain a `WordList` are sorting a
//! `WordSet` or parsing a persisted artifact, so the ordering invariant holds
//! for every value of the type.
//!
//! The on-disk artifact is a JSON array of strings:
//!
//! ```text
//! ["apple","banana","cherry"]
//! ```

use ahash::AHashSet;

use crate::analysis::token::WordToken;
use crate::error::{GlossaError, Result};
use crate::storage::{self, Storage};

/// An unordered set of unique words.
#[derive(Clone, Debug, Default)]
pub struct WordSet {
    words: AHashSet<WordToken>,
}

impl WordSet {
    /// Create an empty set.
    pub fn new() -> Self {
        WordSet {
            words: AHashSet::new(),
        }
    }

    /// Insert a word. Returns `true` if it was not present before.
    pub fn insert(&mut self, word: WordToken) -> bool {
        self.words.insert(word)
    }

    /// Check whether the set contains `word`.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of unique words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Move every word of `other` into this set.
    pub fn merge(&mut self, other: WordSet) {
        if self.words.len() < other.words.len() {
            let smaller = std::mem::replace(&mut self.words, other.words);
            self.words.extend(smaller);
        } else {
            self.words.extend(other.words);
        }
    }

    /// Sort the set into its canonical list form.
    pub fn into_word_list(self) -> WordList {
        let mut words: Vec<WordToken> = self.words.into_iter().collect();
        words.sort_unstable();
        WordList { words }
    }
}

impl Extend<WordToken> for WordSet {
    fn extend<I: IntoIterator<Item = WordToken>>(&mut self, iter: I) {
        self.words.extend(iter);
    }
}

impl FromIterator<WordToken> for WordSet {
    fn from_iter<I: IntoIterator<Item = WordToken>>(iter: I) -> Self {
        WordSet {
            words: iter.into_iter().collect(),
        }
    }
}

/// The canonical word list: strictly ascending, no duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<WordToken>,
}

impl WordList {
    /// The words in ascending order.
    pub fn words(&self) -> &[WordToken] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words as string slices, in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(WordToken::as_str)
    }

    /// Serialize the list as a compact JSON array of strings.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.words)?)
    }

    /// Parse the raw entries of a persisted artifact.
    ///
    /// The artifact must be a JSON array of strings. Entries come back
    /// exactly as stored, in their original order and with any duplicates;
    /// they are not checked against the word rules.
    pub fn parse_entries(data: &[u8]) -> Result<Vec<String>> {
        serde_json::from_slice::<Vec<String>>(data).map_err(|e| {
            GlossaError::artifact_load(format!("artifact is not a JSON array of strings: {e}"))
        })
    }

    /// Write the list to `name`, replacing any previous content.
    pub fn persist(&self, storage: &dyn Storage, name: &str) -> Result<()> {
        let json = self.to_json()?;
        storage::replace_atomically(storage, name, json.as_bytes())
    }

    /// Read the raw entries of the artifact stored at `name`.
    pub fn load_entries(storage: &dyn Storage, name: &str) -> Result<Vec<String>> {
        let data = storage::read_all(storage, name)
            .map_err(|e| GlossaError::artifact_load(format!("cannot read {name}: {e}")))?;
        Self::parse_entries(&data)
    }

    /// Read the artifact at `name` back into a canonical list.
    ///
    /// Fails if any entry is not a valid word.
    pub fn load(storage: &dyn Storage, name: &str) -> Result<Self> {
        let set = Self::load_entries(storage, name)?
            .into_iter()
            .map(WordToken::try_from)
            .collect::<Result<WordSet>>()
            .map_err(|e| GlossaError::artifact_load(format!("{name}: {e}")))?;
        Ok(set.into_word_list())
    }
}

impl IntoIterator for WordList {
    type Item = WordToken;
    type IntoIter = std::vec::IntoIter<WordToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.into_iter()
    }
}
