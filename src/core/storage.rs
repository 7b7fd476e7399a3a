// SPDX-License-Identifier: GPL-3.0-only

//! Key-value persistence used by the collection store.
//!
//! Values are opaque strings. [`FileStore`] keeps one `<key>.json` file per key
//! inside a data directory, [`MemoryStore`] keeps them in process.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use crate::utils::DexError;

/// Synchronous get/set access to a persistent medium
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, DexError>;

    /// Durably stores `value` under `key` before returning
    fn set(&self, key: &str, value: &str) -> Result<(), DexError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, DexError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DexError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DexError> {
        let values = self.values.read().map_err(|_| poisoned(key))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DexError> {
        let mut values = self.values.write().map_err(|_| poisoned(key))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn poisoned(key: &str) -> DexError {
    DexError::Storage {
        key: key.to_string(),
        reason: String::from("store lock poisoned"),
    }
}

/// Stores every key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) the directory backing the store
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, DexError> {
        let dir = dir.into();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DexError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(DexError::Storage {
                key: key.to_string(),
                reason: String::from("key is not a plain file name"),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, DexError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DexError::Storage {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DexError> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");

        // write aside then rename, a failed write keeps the previous value intact
        std::fs::write(&tmp_path, value)
            .and_then(|_| std::fs::rename(&tmp_path, &path))
            .map_err(|e| {
                let _ = std::fs::remove_file(&tmp_path);
                DexError::Storage {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
            })
    }
}
