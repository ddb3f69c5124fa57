//! The word-list builder.
//!
//! [`ListBuilder`] turns the configured sources into the canonical word list
//! and persists it:
//!
//! ```text
//! for each source:  fetch → normalize → merge into WordSet
//! then:             sort → JSON → storage (atomic replace)
//! ```
//!
//! A source that fails to fetch (or times out) is logged and recorded in the
//! [`GenerationReport`], and the run continues with the next source. If every
//! source fails the result is an empty list, which is still written.
//!
//! By default sources are fetched one after another. With
//! [`BuilderConfig::concurrency`] above one, up to that many fetches run at
//! once; their results are still merged one at a time, and the final sort
//! makes the output independent of completion order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::analysis::WordNormalizer;
use crate::error::{GlossaError, Result};
use crate::source::{Fetcher, SourceConfig};
use crate::storage::{self, Storage};
use crate::word_list::{WordList, WordSet};

/// Default name of the persisted artifact.
pub const DEFAULT_ARTIFACT_NAME: &str = "serialized.json";

/// Configuration for a [`ListBuilder`].
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Maximum number of sources fetched at the same time.
    pub concurrency: usize,

    /// Per-source time limit. A fetch exceeding it counts as failed.
    pub fetch_timeout: Option<Duration>,

    /// Name of the artifact inside the storage.
    pub artifact_name: String,

    /// Copy an existing artifact to `<artifact_name>.bak` before replacing it.
    pub backup_previous: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            concurrency: 1,
            fetch_timeout: Some(Duration::from_secs(60)),
            artifact_name: DEFAULT_ARTIFACT_NAME.to_string(),
            backup_previous: false,
        }
    }
}

impl BuilderConfig {
    /// Name of the backup written when `backup_previous` is set.
    pub fn backup_name(&self) -> String {
        format!("{}.bak", self.artifact_name)
    }
}

/// Outcome of a single source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    /// The source identifier.
    pub source: String,

    /// Whether the fetch succeeded.
    pub succeeded: bool,

    /// Number of distinct valid words the source contributed.
    pub words: usize,

    /// Error message when the fetch failed.
    pub error: Option<String>,

    /// Time spent on the source, in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    /// One entry per configured source, in configuration order.
    pub sources: Vec<SourceReport>,

    /// Number of words in the resulting list.
    pub total_words: usize,

    /// Name of the written artifact, if the list was persisted.
    pub artifact: Option<String>,

    /// Name of the backup of the previous artifact, if one was made.
    pub backup: Option<String>,

    /// When the run finished.
    pub generated_at: DateTime<Utc>,
}

impl GenerationReport {
    /// Number of sources that were fetched successfully.
    pub fn succeeded(&self) -> usize {
        self.sources.iter().filter(|s| s.succeeded).count()
    }

    /// Number of sources that failed.
    pub fn failed(&self) -> usize {
        self.sources.len() - self.succeeded()
    }
}

/// Fetches, merges and persists word-list sources.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use glossa::builder::{BuilderConfig, ListBuilder};
/// use glossa::source::{SourceConfig, StaticFetcher};
/// use glossa::storage::memory::MemoryStorage;
/// use glossa::word_list::WordList;
///
/// # #[tokio::main]
/// # async fn main() -> glossa::error::Result<()> {
/// let fetcher = StaticFetcher::new()
///     .with_source("a", "apple\nbanana\ncherry")
///     .with_source("b", "banana\ndate\nelder");
/// let storage = Arc::new(MemoryStorage::new_default());
///
/// let builder = ListBuilder::new(
///     Arc::new(fetcher),
///     storage.clone(),
///     SourceConfig::new(["a", "b"]),
///     BuilderConfig::default(),
/// );
/// let report = builder.generate().await?;
/// assert_eq!(report.total_words, 5);
///
/// let list = WordList::load(storage.as_ref(), "serialized.json")?;
/// assert_eq!(list.iter().collect::<Vec<_>>(), ["apple", "banana", "cherry", "date", "elder"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ListBuilder {
    fetcher: Arc<dyn Fetcher>,
    storage: Arc<dyn Storage>,
    sources: SourceConfig,
    config: BuilderConfig,
    normalizer: WordNormalizer,
}

impl ListBuilder {
    /// Create a builder.
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        storage: Arc<dyn Storage>,
        sources: SourceConfig,
        config: BuilderConfig,
    ) -> Self {
        ListBuilder {
            fetcher,
            storage,
            sources,
            config,
            normalizer: WordNormalizer::new(),
        }
    }

    /// The configured sources.
    pub fn sources(&self) -> &SourceConfig {
        &self.sources
    }

    /// The builder configuration.
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Fetch and merge every source without writing anything.
    pub async fn collect(&self) -> (WordList, GenerationReport) {
        let concurrency = self.config.concurrency.max(1);
        let mut outcomes = stream::iter(self.sources.sources.iter())
            .map(|source| self.process_source(source))
            .buffered(concurrency);

        let mut all_words = WordSet::new();
        let mut reports = Vec::with_capacity(self.sources.len());

        while let Some((words, report)) = outcomes.next().await {
            all_words.merge(words);
            reports.push(report);
        }

        let list = all_words.into_word_list();
        let report = GenerationReport {
            sources: reports,
            total_words: list.len(),
            artifact: None,
            backup: None,
            generated_at: Utc::now(),
        };

        (list, report)
    }

    /// Build the word list and persist it, replacing any previous artifact.
    ///
    /// Source failures never make this fail; only a storage error does.
    pub async fn generate(&self) -> Result<GenerationReport> {
        let (list, mut report) = self.collect().await;

        if report.failed() == report.sources.len() && !report.sources.is_empty() {
            log::warn!(
                "All {} sources failed; writing an empty word list",
                report.sources.len()
            );
        }

        if self.config.backup_previous {
            report.backup = self.backup_previous()?;
        }

        let name = &self.config.artifact_name;
        list.persist(self.storage.as_ref(), name)?;
        report.artifact = Some(name.clone());

        log::info!(
            "Wrote {} words to {} ({} of {} sources succeeded)",
            report.total_words,
            name,
            report.succeeded(),
            report.sources.len()
        );

        Ok(report)
    }

    async fn process_source(&self, source: &str) -> (WordSet, SourceReport) {
        let start = Instant::now();

        match self.fetch(source).await {
            Ok(text) => {
                let words: WordSet = self.normalizer.normalize_text(&text).collect();
                log::info!("Fetched {} words from {}", words.len(), source);

                let report = SourceReport {
                    source: source.to_string(),
                    succeeded: true,
                    words: words.len(),
                    error: None,
                    duration_ms: start.elapsed().as_millis() as u64,
                };
                (words, report)
            }
            Err(e) => {
                log::error!("{e}");

                let report = SourceReport {
                    source: source.to_string(),
                    succeeded: false,
                    words: 0,
                    error: Some(e.to_string()),
                    duration_ms: start.elapsed().as_millis() as u64,
                };
                (WordSet::new(), report)
            }
        }
    }

    async fn fetch(&self, source: &str) -> Result<String> {
        log::debug!("Fetching {} with {} fetcher", source, self.fetcher.name());

        match self.config.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetcher.fetch(source))
                .await
                .map_err(|_| GlossaError::fetch_timeout(source, limit))?,
            None => self.fetcher.fetch(source).await,
        }
    }

    fn backup_previous(&self) -> Result<Option<String>> {
        let name = &self.config.artifact_name;
        if !self.storage.file_exists(name) {
            return Ok(None);
        }

        let backup = self.config.backup_name();
        let previous = storage::read_all(self.storage.as_ref(), name)?;
        storage::replace_atomically(self.storage.as_ref(), &backup, &previous)?;
        log::info!("Backed up previous {} to {}", name, backup);

        Ok(Some(backup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::source::StaticFetcher;
    use crate::storage::memory::MemoryStorage;

    fn builder_with(fetcher: StaticFetcher, sources: &[&str]) -> (ListBuilder, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new_default());
        let builder = ListBuilder::new(
            Arc::new(fetcher),
            storage.clone(),
            SourceConfig::new(sources.iter().copied()),
            BuilderConfig::default(),
        );
        (builder, storage)
    }

    fn written(storage: &MemoryStorage) -> Vec<String> {
        let data = storage::read_all(storage, DEFAULT_ARTIFACT_NAME).unwrap();
        serde_json::from_slice(&data).unwrap()
    }

    #[tokio::test]
    async fn test_merges_sorts_and_dedupes() {
        let fetcher = StaticFetcher::new()
            .with_source("one", "apple\nbanana\ncherry")
            .with_source("two", "banana\ndate\nelder")
            .with_source("three", "fig\ngrape");
        let (builder, storage) = builder_with(fetcher, &["one", "two", "three"]);

        let report = builder.generate().await.unwrap();

        assert_eq!(
            written(&storage),
            vec!["apple", "banana", "cherry", "date", "elder", "fig", "grape"]
        );
        assert_eq!(report.total_words, 7);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.artifact.as_deref(), Some(DEFAULT_ARTIFACT_NAME));
        assert_eq!(
            report.sources.iter().map(|s| s.words).collect::<Vec<_>>(),
            vec![3, 3, 2]
        );
    }

    #[tokio::test]
    async fn test_filters_invalid_lines() {
        let fetcher =
            StaticFetcher::new().with_source("noisy", "valid\nINVALID123\n  spaces  \nword2test\nok\n\n");
        let (builder, storage) = builder_with(fetcher, &["noisy"]);

        builder.generate().await.unwrap();

        assert_eq!(written(&storage), vec!["ok", "spaces", "valid"]);
    }

    #[tokio::test]
    async fn test_case_folding_dedupes() {
        let fetcher = StaticFetcher::new().with_source("apples", "apple\napple\nApple\nAPPLE");
        let (builder, storage) = builder_with(fetcher, &["apples"]);

        builder.generate().await.unwrap();

        assert_eq!(written(&storage), vec!["apple"]);
    }

    #[tokio::test]
    async fn test_failed_source_does_not_abort() {
        let fetcher = StaticFetcher::new()
            .with_failure("down", "Network error")
            .with_source("up", "word");
        let (builder, storage) = builder_with(fetcher, &["down", "up"]);

        let report = builder.generate().await.unwrap();

        assert_eq!(written(&storage), vec!["word"]);
        assert_eq!(report.failed(), 1);
        assert!(!report.sources[0].succeeded);
        assert_eq!(
            report.sources[0].error.as_deref(),
            Some("Failed to fetch from down: Network error")
        );
        assert!(report.sources[1].succeeded);
    }

    #[tokio::test]
    async fn test_all_sources_failing_writes_empty_list() {
        let storage = Arc::new(MemoryStorage::new_default());
        storage::replace_atomically(storage.as_ref(), DEFAULT_ARTIFACT_NAME, br#"["old"]"#)
            .unwrap();

        let builder = ListBuilder::new(
            Arc::new(StaticFetcher::new()),
            storage.clone(),
            SourceConfig::new(["a", "b"]),
            BuilderConfig::default(),
        );
        let report = builder.generate().await.unwrap();

        assert_eq!(report.failed(), 2);
        assert_eq!(report.total_words, 0);
        assert!(written(&storage).is_empty());
        assert!(report.backup.is_none());
    }

    #[tokio::test]
    async fn test_backup_previous_artifact() {
        let storage = Arc::new(MemoryStorage::new_default());
        storage::replace_atomically(storage.as_ref(), DEFAULT_ARTIFACT_NAME, br#"["old"]"#)
            .unwrap();

        let config = BuilderConfig {
            backup_previous: true,
            ..BuilderConfig::default()
        };
        let builder = ListBuilder::new(
            Arc::new(StaticFetcher::new().with_source("a", "new")),
            storage.clone(),
            SourceConfig::new(["a"]),
            config,
        );
        let report = builder.generate().await.unwrap();

        assert_eq!(report.backup.as_deref(), Some("serialized.json.bak"));
        assert_eq!(written(&storage), vec!["new"]);
        assert_eq!(
            storage::read_all(storage.as_ref(), "serialized.json.bak").unwrap(),
            br#"["old"]"#
        );
    }

    #[tokio::test]
    async fn test_generation_is_idempotent() {
        let fetcher = StaticFetcher::new()
            .with_source("one", "Zebra\nant\r\nmoose")
            .with_source("two", "ant\nbee");
        let (builder, storage) = builder_with(fetcher, &["one", "two"]);

        builder.generate().await.unwrap();
        let first = storage::read_all(storage.as_ref(), DEFAULT_ARTIFACT_NAME).unwrap();
        builder.generate().await.unwrap();
        let second = storage::read_all(storage.as_ref(), DEFAULT_ARTIFACT_NAME).unwrap();

        assert_eq!(first, second);
        assert_eq!(written(&storage), vec!["ant", "bee", "moose", "zebra"]);
    }

    #[tokio::test]
    async fn test_source_order_does_not_matter() {
        let fetcher = StaticFetcher::new()
            .with_source("one", "cherry\napple")
            .with_source("two", "banana\napple");

        let (forward, _) = builder_with(fetcher.clone(), &["one", "two"]);
        let (backward, _) = builder_with(fetcher, &["two", "one"]);

        assert_eq!(forward.collect().await.0, backward.collect().await.0);
    }

    #[derive(Debug, Default)]
    struct SlowFetcher {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Fetcher for SlowFetcher {
        async fn fetch(&self, source: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(20)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(source.to_string())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    async fn run_slow(concurrency: usize) -> (Arc<SlowFetcher>, WordList, GenerationReport) {
        let fetcher = Arc::new(SlowFetcher::default());
        let builder = ListBuilder::new(
            fetcher.clone(),
            Arc::new(MemoryStorage::new_default()),
            SourceConfig::new(["delta", "alpha", "charlie", "bravo"]),
            BuilderConfig {
                concurrency,
                ..BuilderConfig::default()
            },
        );
        let (list, report) = builder.collect().await;
        (fetcher, list, report)
    }

    #[tokio::test]
    async fn test_sequential_by_default() {
        let (fetcher, list, _) = run_slow(1).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 4);
        assert_eq!(fetcher.max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            vec!["alpha", "bravo", "charlie", "delta"]
        );
    }

    #[tokio::test]
    async fn test_bounded_concurrency_gives_same_result() {
        let (_, sequential, _) = run_slow(1).await;
        let (fetcher, parallel, report) = run_slow(2).await;

        assert!(fetcher.max_in_flight.load(Ordering::SeqCst) <= 2);
        assert_eq!(parallel, sequential);
        assert_eq!(
            report
                .sources
                .iter()
                .map(|s| s.source.as_str())
                .collect::<Vec<_>>(),
            vec!["delta", "alpha", "charlie", "bravo"]
        );
    }

    #[derive(Debug)]
    struct HangingFetcher;

    #[async_trait]
    impl Fetcher for HangingFetcher {
        async fn fetch(&self, source: &str) -> Result<String> {
            if source == "hang" {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
            Ok("fast".to_string())
        }

        fn name(&self) -> &str {
            "hanging"
        }
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failure() {
        let builder = ListBuilder::new(
            Arc::new(HangingFetcher),
            Arc::new(MemoryStorage::new_default()),
            SourceConfig::new(["hang", "quick"]),
            BuilderConfig {
                fetch_timeout: Some(Duration::from_millis(20)),
                ..BuilderConfig::default()
            },
        );

        let (list, report) = builder.collect().await;

        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["fast"]);
        assert!(!report.sources[0].succeeded);
        assert!(report.sources[0].error.as_deref().unwrap().contains("timed out"));
        assert!(report.sources[1].succeeded);
    }
}
