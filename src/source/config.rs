//! Source list configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GlossaError, Result};

/// The compiled-in list of public English word lists.
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://raw.githubusercontent.com/dwyl/english-words/master/words.txt",
    "https://raw.githubusercontent.com/lorenbrichter/Words/master/Words/en.txt",
    "https://raw.githubusercontent.com/sindresorhus/word-list/main/words.txt",
    "https://raw.githubusercontent.com/first20hours/google-10000-english/master/google-10000-english.txt",
    "https://raw.githubusercontent.com/first20hours/google-10000-english/master/google-10000-english-usa.txt",
    "https://raw.githubusercontent.com/first20hours/google-10000-english/master/google-10000-english-usa-no-swears.txt",
    "https://raw.githubusercontent.com/first20hours/google-10000-english/master/google-10000-english-no-swears.txt",
    "https://raw.githubusercontent.com/first20hours/google-10000-english/master/20k.txt",
    "https://www.mit.edu/~ecprice/wordlist.10000",
    "https://www.mit.edu/~ecprice/wordlist.100000",
    "https://raw.githubusercontent.com/dolph/dictionary/master/popular.txt",
    "https://raw.githubusercontent.com/dolph/dictionary/master/unix-words",
    "https://raw.githubusercontent.com/en-wl/wordlist/master/alt12dicts/2of12.txt",
    "https://raw.githubusercontent.com/en-wl/wordlist/master/alt12dicts/2of12inf.txt",
    "https://raw.githubusercontent.com/IlyaSemenov/wikipedia-word-frequency/master/results/enwiki-2023-04-13.txt",
    "https://raw.githubusercontent.com/words/moby/master/words.txt",
];

/// The list of sources a generation run draws from.
///
/// Serialized as `{"sources": ["https://...", "file:///..."]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source identifiers, processed in this order.
    pub sources: Vec<String>,
}

impl SourceConfig {
    /// Create a configuration from explicit identifiers.
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SourceConfig {
            sources: sources.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| {
            GlossaError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: SourceConfig = serde_json::from_str(&data).map_err(|e| {
            GlossaError::config(format!("invalid source file {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject blank identifiers.
    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self.sources.iter().position(|s| s.trim().is_empty()) {
            return Err(GlossaError::config(format!(
                "source #{index} is an empty identifier"
            )));
        }
        Ok(())
    }

    /// Number of configured sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no source is configured.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::new(DEFAULT_SOURCES.iter().copied())
    }
}
