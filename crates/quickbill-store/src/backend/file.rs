//! # File Store
//!
//! Directory-backed key/value store: the native counterpart of browser
//! local storage.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ~/.local/share/quickbill/                                              │
//! │  ├── quickbill_v2_inventory        ← one file per key, raw value        │
//! │  ├── quickbill_v2_transactions                                          │
//! │  └── quickbill_user_profile                                             │
//! │                                                                         │
//! │  set(): write .<key>.tmp, then rename over <key>                        │
//! │         a crash mid-write leaves the previous value intact              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::backend::KeyValueStore;
use crate::error::{StoreError, StoreResult};

/// Key/value store keeping each key in its own file under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) the data directory.
    ///
    /// ## Example
    /// ```rust,no_run
    /// use quickbill_store::{FileStore, KeyValueStore};
    ///
    /// let store = FileStore::open("./data")?;
    /// store.set("greeting", "hello")?;
    /// # Ok::<(), quickbill_store::StoreError>(())
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!(?dir, "File store opened");
        Ok(FileStore { dir })
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Checks that the directory is still writable.
    pub fn health_check(&self) -> bool {
        let probe = self.dir.join(".probe");
        let ok = fs::write(&probe, b"ok").is_ok();
        let _ = fs::remove_file(&probe);
        ok
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        // Keys never start with '.', so temp files cannot shadow a key.
        let tmp = self.dir.join(format!(".{}.tmp", key));

        debug!(key, bytes = value.len(), "Writing key");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        debug!(key, "Removing key");
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("quickbill_v2_inventory").unwrap(), None);

        store.set("quickbill_v2_inventory", "[]").unwrap();
        assert_eq!(
            store.get("quickbill_v2_inventory").unwrap().as_deref(),
            Some("[]")
        );
        assert!(dir.path().join("quickbill_v2_inventory").exists());
        assert!(!dir.path().join(".quickbill_v2_inventory.tmp").exists());

        store.remove("quickbill_v2_inventory").unwrap();
        assert_eq!(store.get("quickbill_v2_inventory").unwrap(), None);
        store.remove("quickbill_v2_inventory").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::open(dir.path()).unwrap().set("k", "v").unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_open_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert!(store.health_check());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", ".hidden", "sp ace"] {
            assert!(
                matches!(store.set(key, "x"), Err(StoreError::InvalidKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_tmp_suffixed_key_is_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("foo.tmp", "mine").unwrap();
        store.set("foo", "theirs").unwrap();

        assert_eq!(store.get("foo.tmp").unwrap().as_deref(), Some("mine"));
        assert_eq!(store.get("foo").unwrap().as_deref(), Some("theirs"));
    }
}
