//! The runtime lexicon.
//!
//! A [`Lexicon`] is loaded once from the persisted word list and is read-only
//! afterwards, so any number of threads can query it without locking.
//!
//! Most programs use the process-wide instance:
//!
//! - [`init`] loads it from an explicit [`LexiconConfig`] at startup and
//!   reports a missing or malformed artifact as an error;
//! - [`global`] returns it, loading it from [`LexiconConfig::default`] on
//!   first access if [`init`] was never called.
//!
//! The process-wide instance goes from uninitialized to ready exactly once.
//! A failed load leaves it uninitialized.
//!
//! # Examples
//!
//! ```
//! use glossa::lexicon::Lexicon;
//!
//! let lexicon = Lexicon::from_words(["apple", "banana"]);
//! assert!(lexicon.has_word("apple"));
//! assert!(!lexicon.has_word("APPLE"));
//! assert_eq!(lexicon.words().len(), 2);
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;

use ahash::AHashSet;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::builder::DEFAULT_ARTIFACT_NAME;
use crate::error::Result;
use crate::storage::file::FileStorageConfig;
use crate::storage::{Storage, StorageConfig, StorageFactory};
use crate::word_list::WordList;

/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "GLOSSA_DATA_DIR";

/// Where the lexicon artifact lives.
#[derive(Debug, Clone)]
pub struct LexiconConfig {
    /// Storage holding the artifact.
    pub storage: StorageConfig,

    /// Name of the artifact inside the storage.
    pub artifact_name: String,
}

impl LexiconConfig {
    /// Read the default artifact from the given directory.
    pub fn from_dir<P: Into<PathBuf>>(dir: P) -> Self {
        LexiconConfig {
            storage: StorageConfig::File(FileStorageConfig::new(dir.into())),
            artifact_name: DEFAULT_ARTIFACT_NAME.to_string(),
        }
    }

    /// The default data directory: `$GLOSSA_DATA_DIR`, or `data/` inside the
    /// crate.
    pub fn default_data_dir() -> PathBuf {
        std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data")))
    }
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self::from_dir(Self::default_data_dir())
    }
}

/// Summary statistics of a lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconStats {
    /// Number of words.
    pub words: usize,

    /// Length of the shortest word, 0 when empty.
    pub shortest: usize,

    /// Length of the longest word, 0 when empty.
    pub longest: usize,

    /// Mean word length, 0.0 when empty.
    pub average_length: f64,
}

/// An immutable in-memory set of words.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: AHashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from arbitrary words. No normalization is applied.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Lexicon {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Load the artifact `name` from `storage`.
    ///
    /// Fails with [`GlossaError::ArtifactLoad`](crate::error::GlossaError::ArtifactLoad)
    /// if the artifact is missing or is not a JSON array of strings.
    pub fn load(storage: &dyn Storage, name: &str) -> Result<Self> {
        let lexicon = Self::from_words(WordList::load_entries(storage, name)?);
        log::info!("Loaded {} words from {}", lexicon.len(), name);
        Ok(lexicon)
    }

    /// Open the storage described by `config` and load its artifact.
    pub fn open(config: &LexiconConfig) -> Result<Self> {
        let storage = StorageFactory::create(config.storage.clone())?;
        Self::load(storage.as_ref(), &config.artifact_name)
    }

    /// All words, in no particular order. Every call returns a fresh vector.
    pub fn words(&self) -> Vec<String> {
        self.words.iter().cloned().collect()
    }

    /// All words in ascending byte order.
    pub fn sorted_words(&self) -> Vec<String> {
        let mut words = self.words();
        words.sort_unstable();
        words
    }

    /// Whether `word` is in the lexicon, by exact, case-sensitive match.
    ///
    /// Stored words are lowercase, so callers should lowercase their input.
    pub fn has_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Iterate over the words, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Words starting with `prefix`, in ascending order.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut words: Vec<String> = self
            .words
            .iter()
            .filter(|word| word.starts_with(prefix))
            .cloned()
            .collect();
        words.sort_unstable();
        words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the lexicon holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Compute summary statistics.
    pub fn stats(&self) -> LexiconStats {
        let lengths = self.words.iter().map(String::len);
        let total: usize = lengths.clone().sum();

        LexiconStats {
            words: self.len(),
            shortest: lengths.clone().min().unwrap_or(0),
            longest: lengths.max().unwrap_or(0),
            average_length: if self.is_empty() {
                0.0
            } else {
                total as f64 / self.len() as f64
            },
        }
    }
}

static GLOBAL: OnceLock<Lexicon> = OnceLock::new();
static INIT_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Load the process-wide lexicon from `config`.
///
/// Call this at startup to fail fast on a missing or corrupt artifact. If the
/// lexicon is already loaded, the existing instance is returned and `config`
/// is ignored.
pub fn init(config: &LexiconConfig) -> Result<&'static Lexicon> {
    if let Some(lexicon) = GLOBAL.get() {
        return Ok(lexicon);
    }

    let _guard = INIT_LOCK.lock();
    if let Some(lexicon) = GLOBAL.get() {
        return Ok(lexicon);
    }

    let lexicon = Lexicon::open(config)?;
    Ok(GLOBAL.get_or_init(|| lexicon))
}

/// The process-wide lexicon, loading it from the default location if needed.
pub fn try_global() -> Result<&'static Lexicon> {
    match GLOBAL.get() {
        Some(lexicon) => Ok(lexicon),
        None => init(&LexiconConfig::default()),
    }
}

/// The process-wide lexicon.
///
/// # Panics
///
/// Panics if the lexicon is not loaded yet and the default artifact cannot be
/// loaded. The lexicon cannot answer any query without it.
pub fn global() -> &'static Lexicon {
    match try_global() {
        Ok(lexicon) => lexicon,
        Err(e) => panic!("failed to load the lexicon: {e}"),
    }
}

/// Whether the process-wide lexicon has been loaded.
pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GlossaError;
    use crate::storage::memory::MemoryStorage;
    use crate::storage::replace_atomically;

    fn sample() -> Lexicon {
        Lexicon::from_words(["apple", "banana", "cherry", "date", "elder", "fig", "grape"])
    }

    #[test]
    fn test_has_word_is_exact() {
        let lexicon = sample();

        assert!(lexicon.has_word("apple"));
        assert!(!lexicon.has_word("Apple"));
        assert!(!lexicon.has_word("APPLE"));
        assert!(!lexicon.has_word("appl"));
        assert!(!lexicon.has_word(" apple"));
        assert!(!lexicon.has_word("xyznonexistent123"));
        assert!(!lexicon.has_word(""));
    }

    #[test]
    fn test_words_matches_cardinality() {
        let lexicon = sample();
        let words = lexicon.words();

        assert_eq!(words.len(), lexicon.len());
        assert!(words.iter().all(|w| lexicon.has_word(w)));

        // A fresh collection every call.
        let mut again = lexicon.words();
        again.clear();
        assert_eq!(lexicon.words().len(), 7);
    }

    #[test]
    fn test_duplicates_collapse() {
        let lexicon = Lexicon::from_words(["apple", "apple", "banana"]);
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.words().len(), 2);
    }

    #[test]
    fn test_uppercase_never_matches() {
        let lexicon = sample();
        for word in lexicon.words() {
            assert!(lexicon.has_word(&word));
            assert!(!lexicon.has_word(&word.to_uppercase()));
        }
    }

    #[test]
    fn test_sorted_and_prefix() {
        let lexicon = Lexicon::from_words(["grape", "apple", "apricot", "banana"]);

        assert_eq!(
            lexicon.sorted_words(),
            vec!["apple", "apricot", "banana", "grape"]
        );
        assert_eq!(lexicon.words_with_prefix("ap"), vec!["apple", "apricot"]);
        assert!(lexicon.words_with_prefix("z").is_empty());
    }

    #[test]
    fn test_stats() {
        let stats = Lexicon::from_words(["a", "abc", "abcde"]).stats();
        assert_eq!(stats.words, 3);
        assert_eq!(stats.shortest, 1);
        assert_eq!(stats.longest, 5);
        assert!((stats.average_length - 3.0).abs() < f64::EPSILON);

        let empty = Lexicon::default().stats();
        assert_eq!(empty.words, 0);
        assert_eq!(empty.longest, 0);
        assert_eq!(empty.average_length, 0.0);
    }

    #[test]
    fn test_load_from_storage() {
        let storage = MemoryStorage::new_default();
        replace_atomically(&storage, "serialized.json", br#"["apple","banana"]"#).unwrap();

        let lexicon = Lexicon::load(&storage, "serialized.json").unwrap();

        assert_eq!(lexicon.len(), 2);
        assert!(lexicon.has_word("banana"));
    }

    #[test]
    fn test_load_failures() {
        let storage = MemoryStorage::new_default();

        let err = Lexicon::load(&storage, "serialized.json").unwrap_err();
        assert!(matches!(err, GlossaError::ArtifactLoad(_)));

        replace_atomically(&storage, "serialized.json", b"{\"apple\": 1}").unwrap();
        let err = Lexicon::load(&storage, "serialized.json").unwrap_err();
        assert!(matches!(err, GlossaError::ArtifactLoad(_)));
    }

    #[test]
    fn test_open_from_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("serialized.json"), r#"["fig","grape"]"#).unwrap();

        let lexicon = Lexicon::open(&LexiconConfig::from_dir(dir.path())).unwrap();

        assert_eq!(lexicon.sorted_words(), vec!["fig", "grape"]);
    }
}
