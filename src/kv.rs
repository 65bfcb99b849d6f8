//! Persistent key-value store for tm
//!
//! Each key maps to a JSON file inside the store directory:
//!
//! ```text
//! <store dir>/
//!   tasks.json    # ordered task collection
//!   theme.json    # dark-mode flag
//! ```
//!
//! Reads never fail: a missing or corrupt file falls back to the caller's
//! default. Writes go through the atomic temp-file + rename pattern so a
//! reader never observes a partial file. An in-memory cache mirrors every
//! write, so a read-after-write returns the written value even if the disk
//! write itself failed.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Key-value store over a directory of JSON files.
#[derive(Debug)]
pub struct KvStore {
    dir: PathBuf,
    cache: HashMap<String, Value>,
}

impl KvStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: HashMap::new(),
        }
    }

    /// Directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Return the stored value for `key`, or `default` when the key is
    /// missing or its contents cannot be deserialized.
    pub fn read<T>(&mut self, key: &str, default: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(cached) = self.cache.get(key) {
            if let Ok(value) = serde_json::from_value(cached.clone()) {
                return value;
            }
        }

        let value = match fs::read_to_string(self.path_for(key)) {
            Ok(content) => match serde_json::from_str::<T>(&content) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(key, %err, "discarding unreadable store entry");
                    default
                }
            },
            Err(_) => default,
        };

        self.remember(key, &value);
        value
    }

    /// Store `value` under `key`, replacing any prior value.
    ///
    /// The cache is updated before the disk write, so the in-memory state
    /// stays authoritative even when persistence fails; the caller decides
    /// whether a disk failure is worth more than a log line.
    pub fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.remember(key, value);
        let json = serde_json::to_string_pretty(value)?;
        write_atomic(&self.path_for(key), json.as_bytes())
    }

    /// Drop the cache entry for `key` so the next read hits disk. Used when
    /// another process may have rewritten the backing file.
    pub fn invalidate(&mut self, key: &str) {
        self.cache.remove(key);
    }

    fn remember<T: Serialize>(&mut self, key: &str, value: &T) {
        if let Ok(value) = serde_json::to_value(value) {
            self.cache.insert(key.to_string(), value);
        }
    }
}

/// Write data atomically using temp file + rename, so concurrent readers
/// see either the old contents or the new, never a torn write.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_key_returns_default() {
        let temp = TempDir::new().unwrap();
        let mut kv = KvStore::new(temp.path());

        assert!(!kv.read("theme", false));
        assert_eq!(kv.read("tasks", Vec::<String>::new()), Vec::<String>::new());
    }

    #[test]
    fn write_then_read_round_trips() {
        let temp = TempDir::new().unwrap();
        let mut kv = KvStore::new(temp.path());

        kv.write("theme", &true).unwrap();
        assert!(kv.read("theme", false));

        let items = vec!["a".to_string(), "b".to_string()];
        kv.write("items", &items).unwrap();
        assert_eq!(kv.read("items", Vec::<String>::new()), items);
    }

    #[test]
    fn round_trip_survives_a_fresh_store() {
        let temp = TempDir::new().unwrap();
        let mut kv = KvStore::new(temp.path());
        kv.write("theme", &true).unwrap();

        let mut fresh = KvStore::new(temp.path());
        assert!(fresh.read("theme", false));
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("tasks.json"), "{not json").unwrap();

        let mut kv = KvStore::new(temp.path());
        assert_eq!(kv.read("tasks", Vec::<u32>::new()), Vec::<u32>::new());
    }

    #[test]
    fn cache_masks_external_corruption_until_invalidated() {
        let temp = TempDir::new().unwrap();
        let mut kv = KvStore::new(temp.path());
        kv.write("count", &7u32).unwrap();

        // Clobber the backing file behind the store's back.
        fs::write(kv.path_for("count"), "garbage").unwrap();
        assert_eq!(kv.read("count", 0u32), 7);

        kv.invalidate("count");
        assert_eq!(kv.read("count", 0u32), 0);
    }

    #[test]
    fn invalidate_picks_up_external_writes() {
        let temp = TempDir::new().unwrap();
        let mut kv = KvStore::new(temp.path());
        kv.write("count", &1u32).unwrap();

        let mut other = KvStore::new(temp.path());
        other.write("count", &2u32).unwrap();

        assert_eq!(kv.read("count", 0u32), 1);
        kv.invalidate("count");
        assert_eq!(kv.read("count", 0u32), 2);
    }
}
