//! Snapshot Module
//!
//! Versioned JSON snapshots of a whole [`TimedLruCache`], and the file adapter
//! that loads them at startup and writes them at shutdown.

use std::hash::Hash;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::TimedLruCache;
use crate::error::{CacheError, Result};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

// == Snapshot ==
/// Serializable image of a cache: its entries from least to most recently used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot<K, V> {
    pub version: u32,
    pub entries: Vec<SnapshotEntry<K, V>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry<K, V> {
    pub key: K,
    pub value: V,
    pub inserted_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct SnapshotHeader {
    version: u32,
}

impl<'a, K, V> Snapshot<&'a K, &'a V>
where
    K: Eq + Hash + Clone,
{
    /// Borrows the cache contents in LRU order, timestamps included.
    pub fn capture(cache: &'a TimedLruCache<K, V>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            entries: cache
                .iter()
                .map(|(key, entry)| SnapshotEntry {
                    key,
                    value: &entry.content,
                    inserted_at: entry.inserted_at,
                })
                .collect(),
        }
    }
}

impl<K, V> Snapshot<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Rebuilds a cache with the given capacity and maximum age.
    ///
    /// Entries are replayed in order with their original timestamps, so a
    /// snapshot larger than `capacity` keeps only its most recent entries and a
    /// duplicated key keeps its last occurrence.
    pub fn restore(self, capacity: usize, max_age: Duration) -> Result<TimedLruCache<K, V>> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CacheError::IncompatibleVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let mut cache = TimedLruCache::new(capacity, max_age);
        for entry in self.entries {
            cache.set_at(entry.key, entry.value, entry.inserted_at);
        }
        cache.reset_stats();
        Ok(cache)
    }
}

/// Decodes a snapshot, rejecting unknown versions before looking at entries.
pub fn decode_snapshot<K, V>(contents: &str) -> Result<Snapshot<K, V>>
where
    K: DeserializeOwned,
    V: DeserializeOwned,
{
    let header: SnapshotHeader = serde_json::from_str(contents)?;
    if header.version != SNAPSHOT_VERSION {
        return Err(CacheError::IncompatibleVersion {
            found: header.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(serde_json::from_str(contents)?)
}

// == Snapshot File ==
/// Persists one cache to one file.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Save ==
    /// Writes the whole cache, replacing the file atomically.
    ///
    /// The snapshot goes to a sibling `.tmp` file first and is then renamed
    /// over the target, so readers never observe a partial file.
    pub fn save<K, V>(&self, cache: &TimedLruCache<K, V>) -> Result<()>
    where
        K: Eq + Hash + Clone + Serialize,
        V: Serialize,
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string(&Snapshot::capture(cache))?;
        let temp_path = self.temp_path();
        std::fs::write(&temp_path, contents)?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), entries = cache.len(), "Saved cache snapshot");
        Ok(())
    }

    // == Load ==
    /// Reads the snapshot, surfacing any failure.
    pub fn try_load<K, V>(&self, capacity: usize, max_age: Duration) -> Result<TimedLruCache<K, V>>
    where
        K: Eq + Hash + Clone + DeserializeOwned,
        V: DeserializeOwned,
    {
        let contents = std::fs::read_to_string(&self.path)?;
        decode_snapshot(&contents)?.restore(capacity, max_age)
    }

    /// Reads the snapshot, falling back to an empty cache on any failure.
    pub fn load<K, V>(&self, capacity: usize, max_age: Duration) -> TimedLruCache<K, V>
    where
        K: Eq + Hash + Clone + DeserializeOwned,
        V: DeserializeOwned,
    {
        match self.try_load(capacity, max_age) {
            Ok(cache) => {
                debug!(path = %self.path.display(), entries = cache.len(), "Restored cache snapshot");
                cache
            }
            Err(CacheError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No cache snapshot, starting empty");
                TimedLruCache::new(capacity, max_age)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unusable cache snapshot, starting empty");
                TimedLruCache::new(capacity, max_age)
            }
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}
