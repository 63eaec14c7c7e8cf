//! Persistence port: string key/value storage for effect handlers
//!
//! Reducers never touch storage. They emit effects, and the host applies
//! those effects against a [`KeyValueStore`]. Two implementations ship here:
//! [`MemoryStore`] for tests and [`JsonFileStore`], a single JSON object on
//! disk that plays the role browser local storage plays for web clients.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name used by [`JsonFileStore::default_path`].
pub const LOCAL_STORAGE_FILE: &str = "local-storage.json";

/// Errors from a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings
    #[error("Corrupt store file {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded before writing
    #[error("Failed to encode value for key {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The store refused the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed storage with synchronous get/put.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Replace the value stored under `key`.
    fn put(&mut self, key: &str, value: String) -> Result<(), PersistError>;

    /// Encode `value` as JSON text and store it under `key`.
    fn put_json<T>(&mut self, key: &str, value: &T) -> Result<(), PersistError>
    where
        T: serde::Serialize + ?Sized,
        Self: Sized,
    {
        let text = serde_json::to_string(value).map_err(|source| PersistError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.put(key, text)
    }
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: String) -> Result<(), PersistError> {
        (**self).put(key, value)
    }
}

/// In-memory store.
///
/// Counts successful writes so tests can assert how often an effect
/// reached storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `put` always fails.
    pub fn rejecting() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    /// Number of successful `put` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> Result<(), PersistError> {
        if self.reject_writes {
            return Err(PersistError::Unavailable(format!(
                "writes disabled (key {key:?})"
            )));
        }
        self.entries.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

/// Store backed by one JSON object file, rewritten on every `put`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| {
                PersistError::Corrupt {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(PersistError::Io { path, source }),
        };
        Ok(Self { path, entries })
    }

    /// `<data dir>/<app>/local-storage.json`, if the platform has a data dir.
    pub fn default_path(app: &str) -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(app).join(LOCAL_STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str) -> Result<(), PersistError> {
        let io_err = |source| PersistError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let data = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            PersistError::Encode {
                key: key.to_string(),
                source,
            }
        })?;
        // Write-then-rename so readers never observe a half-written file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> Result<(), PersistError> {
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(e) = self.flush(key) {
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}
