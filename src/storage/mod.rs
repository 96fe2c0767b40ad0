//! Persistence for recently executed commands.
//!
//! The palette only needs to load and save a list of command ids. Stores are
//! allowed to fail; the palette logs the failure and carries on without
//! recency data.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised by recent-command stores.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("Storage IO error: {0}")]
    Io(#[from] io::Error),

    /// The stored data is not a JSON list of ids.
    #[error("Corrupt recent commands data: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// No platform data directory could be determined.
    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Key-value persistence for the recent commands list.
pub trait RecentStore {
    /// Load stored ids, most recent first. Absent data is an empty list.
    fn load_recents(&self) -> Result<Vec<String>>;

    /// Replace the stored ids.
    fn save_recents(&self, ids: &[String]) -> Result<()>;

    /// File backing the store, if any.
    fn location(&self) -> Option<&Path> {
        None
    }
}

/// Stores recent commands as a JSON array in a file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// File name used inside the data directory.
    pub const FILE_NAME: &'static str = "recent.json";

    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store in `<data_local_dir>/synapse-palette/recent.json`.
    pub fn in_data_dir() -> Result<Self> {
        let base = dirs::data_local_dir().ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(base.join("synapse-palette").join(Self::FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecentStore for JsonFileStore {
    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn load_recents(&self) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(path = ?self.path, "No recent commands file");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let ids: Vec<String> = serde_json::from_str(&content)?;
        debug!(count = ids.len(), "Loaded recent commands");
        Ok(ids)
    }

    fn save_recents(&self, ids: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(ids)?;
        fs::write(&self.path, content)?;
        trace!(path = ?self.path, count = ids.len(), "Saved recent commands");
        Ok(())
    }
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ids: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with ids.
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: Mutex::new(ids.into_iter().map(Into::into).collect()),
        }
    }

    /// Snapshot of the stored ids.
    pub fn snapshot(&self) -> Vec<String> {
        self.ids.lock().map(|ids| ids.clone()).unwrap_or_default()
    }
}

impl RecentStore for MemoryStore {
    fn load_recents(&self) -> Result<Vec<String>> {
        Ok(self.snapshot())
    }

    fn save_recents(&self, ids: &[String]) -> Result<()> {
        if let Ok(mut stored) = self.ids.lock() {
            *stored = ids.to_vec();
        }
        Ok(())
    }
}

impl<T: RecentStore + ?Sized> RecentStore for std::sync::Arc<T> {
    fn load_recents(&self) -> Result<Vec<String>> {
        (**self).load_recents()
    }

    fn save_recents(&self, ids: &[String]) -> Result<()> {
        (**self).save_recents(ids)
    }

    fn location(&self) -> Option<&Path> {
        (**self).location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("recent.json"));
        assert!(store.load_recents().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_save_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("recent.json");
        let store = JsonFileStore::new(&path);

        store
            .save_recents(&["nav.training".to_string(), "view.theme".to_string()])
            .unwrap();

        assert!(path.exists());
        assert_eq!(store.load_recents().unwrap(), vec!["nav.training", "view.theme"]);
    }

    #[test]
    fn test_store_location() {
        let file = JsonFileStore::new("/tmp/recent.json");
        assert_eq!(file.location(), Some(Path::new("/tmp/recent.json")));
        assert_eq!(std::sync::Arc::new(file).location(), Some(Path::new("/tmp/recent.json")));
        assert!(MemoryStore::new().location().is_none());
    }

    #[test]
    fn test_file_store_corrupt_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recent.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load_recents(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_file_store_unwritable_path() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be
        let store = JsonFileStore::new(dir.path());
        assert!(store.save_recents(&["a".to_string()]).is_err());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::with_ids(["a"]);
        assert_eq!(store.load_recents().unwrap(), vec!["a"]);

        store.save_recents(&["b".to_string(), "a".to_string()]).unwrap();
        assert_eq!(store.snapshot(), vec!["b", "a"]);
    }
}
