//! File-backed key-value store
//!
//! Each key is one JSON document at `<dir>/<key>.json`. Writers take an
//! exclusive `fs2` lock on `<dir>/<key>.lock` and replace the document by
//! writing a temp file and renaming it over the old one, so readers never
//! see a torn write and concurrent read-modify-write cycles serialize.

use fs2::FileExt;
use phishguard_core::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

/// Exclusive lock on one key, released on drop
struct KeyLock {
    file: File,
}

impl Drop for KeyLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            debug!("Failed to release store lock: {}", e);
        }
    }
}

impl KvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn lock(&self, key: &str) -> Result<KeyLock> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::store(key, format!("Failed to create store dir: {e}")))?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.dir.join(format!("{key}.lock")))
            .map_err(|e| Error::store(key, format!("Failed to open lock file: {e}")))?;

        // Blocks while another writer holds the key
        file.lock_exclusive()
            .map_err(|e| Error::store(key, format!("Failed to lock: {e}")))?;

        Ok(KeyLock { file })
    }

    /// Whether a document exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.document_path(key).is_file()
    }

    /// Read and decode the document for `key`; `None` when absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.document_path(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::store(key, format!("Failed to read: {e}"))),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::store(key, format!("Corrupt document: {e}")))
    }

    /// Replace the document for `key`
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let _lock = self.lock(key)?;
        self.write_atomic(key, value)
    }

    /// Delete the document for `key`. Deleting a missing key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        let _lock = self.lock(key)?;
        match std::fs::remove_file(self.document_path(key)) {
            Ok(()) => {
                debug!("Removed store key {}", key);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::store(key, format!("Failed to remove: {e}"))),
        }
    }

    /// Read-modify-write under the key lock.
    ///
    /// `f` receives the current value (`None` if absent) and returns the new
    /// value plus a result passed back to the caller. Nothing is written if
    /// `f` fails.
    pub fn update<T, R, F>(&self, key: &str, f: F) -> Result<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> Result<(T, R)>,
    {
        let _lock = self.lock(key)?;
        let current = self.get::<T>(key)?;
        let (next, out) = f(current)?;
        self.write_atomic(key, &next)?;
        Ok(out)
    }

    fn write_atomic<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.document_path(key);
        let temp_path = self.dir.join(format!(".{key}.{}.tmp", std::process::id()));

        let content = serde_json::to_vec(value)?;

        let mut file = File::create(&temp_path)
            .map_err(|e| Error::store(key, format!("Failed to create temp file: {e}")))?;
        file.write_all(&content)
            .and_then(|_| file.sync_all())
            .map_err(|e| Error::store(key, format!("Failed to write temp file: {e}")))?;
        drop(file);

        std::fs::rename(&temp_path, &path)
            .map_err(|e| Error::store(key, format!("Failed to replace document: {e}")))?;

        trace!("Wrote store key {} ({} bytes)", key, content.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_key() {
        let dir = TempDir::new().unwrap();
        let store = KvStore::new(dir.path());
        assert_eq!(store.get::<Vec<u32>>("nothing").unwrap(), None);
        assert!(!store.contains("nothing"));
    }

    #[test]
    fn test_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = KvStore::new(dir.path().join("store"));

        store.set("numbers", &vec![1, 2, 3]).unwrap();
        assert!(store.contains("numbers"));
        assert_eq!(store.get::<Vec<u32>>("numbers").unwrap(), Some(vec![1, 2, 3]));

        store.remove("numbers").unwrap();
        assert_eq!(store.get::<Vec<u32>>("numbers").unwrap(), None);

        // Second remove is a no-op
        store.remove("numbers").unwrap();
    }

    #[test]
    fn test_corrupt_document_is_store_error() {
        let dir = TempDir::new().unwrap();
        let store = KvStore::new(dir.path());
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();

        let err = store.get::<Vec<u32>>("bad").unwrap_err();
        assert!(matches!(err, Error::Store { ref key, .. } if key == "bad"));
    }

    #[test]
    fn test_update_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = KvStore::new(dir.path());
        store.set("list", &vec![1u32]).unwrap();

        let result: Result<()> = store.update("list", |_: Option<Vec<u32>>| {
            Err(Error::store("list", "refused"))
        });
        assert!(result.is_err());
        assert_eq!(store.get::<Vec<u32>>("list").unwrap(), Some(vec![1]));
    }

    #[test]
    fn test_keys_are_independent() {
        let dir = TempDir::new().unwrap();
        let store = KvStore::new(dir.path());
        store.set("a", &"one").unwrap();
        store.set("b", &"two").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get::<String>("b").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_concurrent_updates_lose_nothing() {
        let dir = TempDir::new().unwrap();
        let store = KvStore::new(dir.path());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..10 {
                        store
                            .update("list", |cur: Option<Vec<u32>>| {
                                let mut v = cur.unwrap_or_default();
                                v.push(t * 100 + i);
                                Ok((v, ()))
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let list: Vec<u32> = store.get("list").unwrap().unwrap();
        assert_eq!(list.len(), 80);
    }
}
