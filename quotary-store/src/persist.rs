//! Durable and session-scoped key/blob persistence.
//!
//! Storage is synchronous, local, and never a suspension point. Failures
//! surface as [`StorageError`] values the caller can report and survive; a
//! broken disk must never take the process down.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Persistence errors. Non-fatal: callers report these and keep running.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading a key failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File backing the key.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing a key failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// File backing the key.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Encoding a snapshot for persistence failed.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backing store refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Key/blob storage for one scope (durable or session).
///
/// Keys are short ASCII names; blobs are serialized JSON documents. The
/// adapter never retains live references to store state, only snapshots.
pub trait Storage: Send + Sync {
    /// Load the blob stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous blob.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed storage: one `<key>.json` document per key in a directory.
///
/// Used for the durable scope; data survives process restarts.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Write {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|source| StorageError::Write { path, source })
    }
}

/// In-memory storage for the session scope and for tests.
///
/// All data dies with the process. Clones share state, and failures can be
/// forced for testing the non-fatal error contract.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryStorageInner>>,
}

#[derive(Debug, Default)]
struct MemoryStorageInner {
    entries: HashMap<String, String>,
    fail_next_load: Option<String>,
    fail_next_save: Option<String>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cause the next `load()` to fail with the given error.
    pub fn fail_next_load(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_load = Some(error.to_string());
    }

    /// Cause the next `save()` to fail with the given error.
    pub fn fail_next_save(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_save = Some(error.to_string());
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_load.take() {
            return Err(StorageError::Unavailable(error));
        }
        Ok(inner.entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_save.take() {
            return Err(StorageError::Unavailable(error));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The durable/session storage pair backing a store.
#[derive(Clone)]
pub struct Persistence {
    durable: Arc<dyn Storage>,
    session: Arc<dyn Storage>,
}

impl Persistence {
    /// Pair an explicit durable and session scope.
    pub fn new(durable: Arc<dyn Storage>, session: Arc<dyn Storage>) -> Self {
        Self { durable, session }
    }

    /// File-backed durable scope under `dir`, in-memory session scope.
    pub fn at_dir(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self::new(
            Arc::new(FileStorage::new(dir)?),
            Arc::new(MemoryStorage::new()),
        ))
    }

    /// Both scopes in memory; for tests.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), Arc::new(MemoryStorage::new()))
    }

    /// Load a blob from the durable scope.
    pub fn load_durable(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.durable.load(key)
    }

    /// Save a blob to the durable scope.
    pub fn save_durable(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.durable.save(key, value)
    }

    /// Load a blob from the session scope.
    pub fn load_session(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.session.load(key)
    }

    /// Save a blob to the session scope.
    pub fn save_session(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.session.save(key, value)
    }
}
