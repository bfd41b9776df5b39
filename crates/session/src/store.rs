//! Durable key/value persistence for session state.
//!
//! The store is a cache of server truth. Session mutation never fails on a
//! persistence error; callers log and move on.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

/// Persisted entry names. All four are written on successful login/fetch
/// and removed together on logout.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER_INFO: &str = "userInfo";
    pub const MENUS: &str = "menus";
    pub const PERMISSIONS: &str = "permissions";

    pub const ALL: [&str; 4] = [TOKEN, USER_INFO, MENUS, PERMISSIONS];
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// String key/value persistence with localStorage semantics.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store for tests and bootstrap wiring.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// Single-document JSON store under the platform data directory.
///
/// The whole map is rewritten on every mutation; session state is a handful
/// of small entries.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or create) the store backing file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Default location under the platform data dir, when one exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("medconsole").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_some() {
            return self.flush(&entries);
        }
        Ok(())
    }
}
