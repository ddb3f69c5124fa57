//! Storage abstraction layer for Glossa.
//!
//! The word-list pipeline and the lexicon never touch the filesystem
//! directly; they go through the [`Storage`] trait. File and memory backends
//! can be swapped without touching higher-level code, which is how the tests
//! run the full generate-then-load cycle without a disk.
//!
//! Writers never overwrite an artifact in place: [`replace_atomically`]
//! writes a temporary file and renames it over the target.
//!
//! # Example
//!
//! ```
//! use glossa::storage::{StorageConfig, StorageFactory};
//! use glossa::storage::memory::MemoryStorageConfig;
//!
//! # fn main() -> glossa::error::Result<()> {
//! let storage = StorageFactory::create(StorageConfig::Memory(MemoryStorageConfig::default()))?;
//! glossa::storage::replace_atomically(storage.as_ref(), "serialized.json", b"[]")?;
//! assert_eq!(glossa::storage::read_all(storage.as_ref(), "serialized.json")?, b"[]");
//! # Ok(())
//! # }
//! ```

use std::io::{Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{GlossaError, Result};

pub mod file;
pub mod memory;

/// A named-blob store holding word list artifacts.
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Open a file for reading.
    ///
    /// The file must exist, or this returns [`StorageError::FileNotFound`].
    fn open_input(&self, name: &str) -> Result<Box<dyn StorageInput>>;

    /// Create a new temporary file whose name starts with `prefix`.
    ///
    /// Returns the generated name together with the output. The content is
    /// complete once the output is closed.
    fn create_temp_output(&self, prefix: &str) -> Result<(String, Box<dyn StorageOutput>)>;

    /// Rename a file, replacing `new_name` if it already exists.
    ///
    /// Readers observe either the old content or the new content of
    /// `new_name`, never a partially written file.
    fn rename_file(&self, old_name: &str, new_name: &str) -> Result<()>;

    /// Check if a file exists.
    fn file_exists(&self, name: &str) -> bool;

    /// Delete a file. Deleting a missing file is not an error.
    fn delete_file(&self, name: &str) -> Result<()>;
}

/// A file opened for reading.
pub trait StorageInput: Read + Send + std::fmt::Debug {
    /// Size of the file in bytes.
    fn size(&self) -> u64;
}

/// A file opened for writing.
pub trait StorageOutput: Write + Send + std::fmt::Debug {
    /// Flush all written data and make it durable.
    fn close(&mut self) -> Result<()>;
}

/// Configuration for storage backends.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// File-based storage configuration (includes path)
    File(file::FileStorageConfig),

    /// Memory-based storage configuration
    Memory(memory::MemoryStorageConfig),
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Memory(memory::MemoryStorageConfig::default())
    }
}

/// A factory for creating storage instances.
pub struct StorageFactory;

impl StorageFactory {
    /// Create a new storage instance with the given configuration.
    pub fn create(config: StorageConfig) -> Result<Arc<dyn Storage>> {
        match config {
            StorageConfig::Memory(mem_config) => {
                let storage = memory::MemoryStorage::new(mem_config);
                Ok(Arc::new(storage))
            }
            StorageConfig::File(file_config) => {
                let path = file_config.path.clone();
                let storage = file::FileStorage::new(&path, file_config)?;
                Ok(Arc::new(storage))
            }
        }
    }
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A temporary file name for `prefix`, unique within this process.
pub(crate) fn temp_name(prefix: &str) -> String {
    let id = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}_{}_{id}.tmp", std::process::id())
}

/// Read the whole content of `name` into memory.
pub fn read_all(storage: &dyn Storage, name: &str) -> Result<Vec<u8>> {
    let mut input = storage.open_input(name)?;
    let mut buffer = Vec::with_capacity(input.size() as usize);
    input.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Replace the content of `name` with `data`.
///
/// The data goes to a temporary file first and is renamed over `name` only
/// after it has been fully written and synced.
pub fn replace_atomically(storage: &dyn Storage, name: &str, data: &[u8]) -> Result<()> {
    let (temp_name, mut output) = storage.create_temp_output(name)?;

    let written = output
        .write_all(data)
        .map_err(GlossaError::from)
        .and_then(|_| output.close());
    drop(output);

    if let Err(e) = written {
        let _ = storage.delete_file(&temp_name);
        return Err(e);
    }

    storage.rename_file(&temp_name, name)
}

/// Error types specific to storage operations.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// File not found.
    FileNotFound(String),

    /// I/O error.
    IoError(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::FileNotFound(name) => write!(f, "File not found: {name}"),
            StorageError::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for GlossaError {
    fn from(err: StorageError) -> Self {
        GlossaError::storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::file::FileStorageConfig;
    use crate::storage::memory::MemoryStorageConfig;

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();

        // Default is Memory
        match config {
            StorageConfig::Memory(mem_config) => {
                assert_eq!(mem_config.initial_capacity, 16);
            }
            _ => panic!("Expected Memory config"),
        }
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::FileNotFound("serialized.json".to_string());
        assert_eq!(err.to_string(), "File not found: serialized.json");

        let err = StorageError::IoError("connection failed".to_string());
        assert_eq!(err.to_string(), "I/O error: connection failed");
    }

    #[test]
    fn test_storage_factory_file() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::File(FileStorageConfig::new(temp_dir.path()));
        let storage = StorageFactory::create(config).unwrap();

        assert!(!storage.file_exists("serialized.json"));
        replace_atomically(storage.as_ref(), "serialized.json", b"[]").unwrap();
        assert!(temp_dir.path().join("serialized.json").is_file());
    }

    #[test]
    fn test_temp_names_are_unique() {
        let first = temp_name("serialized.json");
        let second = temp_name("serialized.json");

        assert_ne!(first, second);
        assert!(first.starts_with("serialized.json_"));
        assert!(first.ends_with(".tmp"));
    }

    #[test]
    fn test_replace_atomically_overwrites() {
        let storage =
            StorageFactory::create(StorageConfig::Memory(MemoryStorageConfig::default())).unwrap();

        replace_atomically(storage.as_ref(), "serialized.json", b"[\"old\"]").unwrap();
        replace_atomically(storage.as_ref(), "serialized.json", b"[\"new\"]").unwrap();

        assert_eq!(
            read_all(storage.as_ref(), "serialized.json").unwrap(),
            b"[\"new\"]"
        );
    }

    #[test]
    fn test_concurrent_replacements_of_same_name() {
        let storage =
            StorageFactory::create(StorageConfig::Memory(MemoryStorageConfig::default())).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let storage = Arc::clone(&storage);
                std::thread::spawn(move || {
                    let data = format!("[\"word{i}\"]");
                    replace_atomically(storage.as_ref(), "serialized.json", data.as_bytes())
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let data = read_all(storage.as_ref(), "serialized.json").unwrap();
        let words: Vec<String> = serde_json::from_slice(&data).unwrap();
        assert_eq!(words.len(), 1);
    }

    #[test]
    fn test_read_all_missing_file() {
        let storage = StorageFactory::create(StorageConfig::default()).unwrap();

        let err = read_all(storage.as_ref(), "missing.json").unwrap_err();
        assert!(err.to_string().contains("File not found: missing.json"));
    }
}
