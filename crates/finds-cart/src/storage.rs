//! # Storage Port
//!
//! Where the cart snapshot lives between sessions. The store only sees the
//! [`CartStorage`] trait; backends are injected at construction.
//!
//! ```text
//! CartStore ──save(key, json)──► CartStorage
//!                                  ├── MemoryStorage  (tests, ephemeral carts)
//!                                  └── FileStorage    (<dir>/<key>.json, atomic replace)
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use atomicwrites::{AtomicFile, OverwriteBehavior};
use tracing::debug;

use crate::error::StorageResult;

/// Key/value persistence for cart snapshots.
pub trait CartStorage: Send + Sync + std::fmt::Debug {
    /// Returns the stored payload, or `None` if nothing was saved yet.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the stored payload.
    fn save(&self, key: &str, payload: &str) -> StorageResult<()>;
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-process storage. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a payload (e.g. a snapshot from an earlier session).
    pub fn with_entry(key: impl Into<String>, payload: impl Into<String>) -> Self {
        let storage = Self::default();
        storage
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), payload.into());
        storage
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

// =============================================================================
// File Backend
// =============================================================================

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9._-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, key: &str, payload: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
            .write(|f| {
                f.write_all(payload.as_bytes())?;
                f.flush()
            })
            .map_err(|err| match err {
                atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => e,
            })?;
        debug!(path = %path.display(), bytes = payload.len(), "Cart snapshot written");
        Ok(())
    }
}
