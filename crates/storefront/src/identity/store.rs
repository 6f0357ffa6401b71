//! Key/value storage for the logged-in profile.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key under which the logged-in profile is stored.
pub const USER_INFO_KEY: &str = "userInfo";

/// Small string key/value store, the storefront's stand-in for browser
/// local storage.
pub trait ProfileStore: Send {
    /// Read a value. A missing key is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backing storage cannot be read.
    fn load(&self, key: &str) -> std::io::Result<Option<String>>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backing storage cannot be written.
    fn save(&mut self, key: &str, value: &str) -> std::io::Result<()>;

    /// Delete a value. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backing storage cannot be modified.
    fn remove(&mut self, key: &str) -> std::io::Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    dir: PathBuf,
}

impl FileProfileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self, key: &str) -> std::io::Result<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)
    }

    fn remove(&mut self, key: &str) -> std::io::Result<()> {
        match std::fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-memory store, used in tests and when nothing should touch disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    entries: HashMap<String, String>,
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self, key: &str) -> std::io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> std::io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> std::io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileProfileStore::new(dir.path().join("profiles"));

        assert_eq!(store.load(USER_INFO_KEY).unwrap(), None);

        store.save(USER_INFO_KEY, r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(
            store.load(USER_INFO_KEY).unwrap().as_deref(),
            Some(r#"{"name":"Ada"}"#)
        );
        assert!(dir.path().join("profiles/userInfo.json").exists());

        store.remove(USER_INFO_KEY).unwrap();
        assert_eq!(store.load(USER_INFO_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileProfileStore::new(dir.path());
        assert!(store.remove("nothing-here").is_ok());
    }
}
