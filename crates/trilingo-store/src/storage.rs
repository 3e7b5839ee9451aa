//! Durable key/value backends for persisted locale choices.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to write the storage file.
    #[error("Failed to write locale storage: {0}")]
    Io(#[from] io::Error),
    /// Failed to serialize the stored values.
    #[error("Failed to serialize locale storage: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The backend refused the write.
    #[error("Locale storage rejected the write for key '{key}': {reason}")]
    Rejected { key: String, reason: String },
}

/// A per-client key/value store that survives reloads.
///
/// Reads are infallible: anything that cannot be read is treated as absent.
pub trait LocaleStorage: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: LocaleStorage + ?Sized> LocaleStorage for Arc<T> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// In-memory storage shared by every clone, standing in for one browser
/// session's local storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    /// Sets a value directly, as another tab sharing the storage would.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(key)
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.read().clone()
    }
}

impl LocaleStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert(key, value);
        Ok(())
    }
}

/// Storage backed by a flat TOML file of string keys and values.
///
/// The file is re-read on every access, so separate instances pointing at the
/// same path see each other's writes on their next read (last write wins).
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let content = match fs_err::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::debug!("Treating unreadable locale storage as empty: {}", e);
                return BTreeMap::new();
            },
        };

        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(
                "Ignoring malformed locale storage '{}': {}",
                self.path.display(),
                e
            );
            BTreeMap::new()
        })
    }
}

impl LocaleStorage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.load();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs_err::create_dir_all(parent)?;
        }

        let content = toml::to_string(&values)?;
        fs_err::write(&self.path, content)?;
        Ok(())
    }
}
