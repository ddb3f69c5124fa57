//! Local file fetcher.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{GlossaError, Result};
use crate::source::fetcher::Fetcher;

/// Reads sources from the local filesystem.
///
/// Accepts `file://` URIs and plain paths. Relative paths resolve against
/// the configured base directory, or the working directory if none is set.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    base_dir: Option<PathBuf>,
}

impl FileFetcher {
    /// Create a fetcher resolving relative paths against the working directory.
    pub fn new() -> Self {
        FileFetcher { base_dir: None }
    }

    /// Create a fetcher resolving relative paths against `base_dir`.
    pub fn with_base_dir<P: AsRef<Path>>(base_dir: P) -> Self {
        FileFetcher {
            base_dir: Some(base_dir.as_ref().to_path_buf()),
        }
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let path = Path::new(source.strip_prefix("file://").unwrap_or(source));
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    async fn fetch(&self, source: &str) -> Result<String> {
        let path = self.resolve(source);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| GlossaError::fetch(source, format!("{}: {e}", path.display())))?;

        String::from_utf8(bytes)
            .map_err(|e| GlossaError::fetch(source, format!("not valid UTF-8: {e}")))
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_plain_path_and_uri() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "apple\nbanana\n").unwrap();

        let fetcher = FileFetcher::new();
        let by_path = fetcher.fetch(path.to_str().unwrap()).await.unwrap();
        let by_uri = fetcher
            .fetch(&format!("file://{}", path.display()))
            .await
            .unwrap();

        assert_eq!(by_path, "apple\nbanana\n");
        assert_eq!(by_uri, by_path);
    }

    #[tokio::test]
    async fn test_relative_to_base_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("en.txt"), "cherry").unwrap();

        let fetcher = FileFetcher::with_base_dir(dir.path());
        assert_eq!(fetcher.fetch("en.txt").await.unwrap(), "cherry");
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let dir = TempDir::new().unwrap();
        let fetcher = FileFetcher::with_base_dir(dir.path());

        let err = fetcher.fetch("missing.txt").await.unwrap_err();
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_fetch_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("latin1.txt"), [0x63, 0x61, 0x66, 0xe9]).unwrap();

        let fetcher = FileFetcher::with_base_dir(dir.path());
        let err = fetcher.fetch("latin1.txt").await.unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }
}
