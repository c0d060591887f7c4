//! Timed LRU Cache Module
//!
//! Bounded key-value store combining HashMap storage with LRU ordering and
//! read-time staleness.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Timed LRU Cache ==
/// Bounded cache with LRU eviction and a maximum entry age.
///
/// Staleness is only evaluated when reading: a stale entry is reported as
/// absent by [`get`](Self::get) but stays in place, keeps its LRU position and
/// is still yielded by [`values`](Self::values). Eviction only happens when
/// [`set`](Self::set) needs room, and always removes the least recently used
/// entry regardless of age.
///
/// A capacity of zero disables the cache: it stores nothing and never hits.
#[derive(Debug, Clone)]
pub struct TimedLruCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker, always holding exactly the keys of `entries`
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Age beyond which entries are no longer returned by reads
    max_age: Duration,
}

impl<K, V> TimedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries (0 disables the cache)
    /// * `max_age` - Age beyond which reads treat an entry as absent
    pub fn new(capacity: usize, max_age: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
            max_age,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub fn is_disabled(&self) -> bool {
        self.capacity == 0
    }

    // == Get ==
    /// Returns the value for `key` if present and fresh.
    ///
    /// A fresh hit promotes the key to the most recently used slot. A stale
    /// entry is reported as absent without being evicted or moved.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_at(key, Utc::now())
    }

    /// Same as [`get`](Self::get), evaluating staleness at `now`.
    pub fn get_at<Q>(&mut self, key: &Q, now: DateTime<Utc>) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.touch_fresh(key, now) {
            return None;
        }
        self.entries.get(key).map(|entry| &entry.content)
    }

    // == Get Mut ==
    /// Mutable variant of [`get`](Self::get), with the same promotion rules.
    ///
    /// Mutating through the returned reference does not refresh the entry's
    /// timestamp.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_mut_at(key, Utc::now())
    }

    pub fn get_mut_at<Q>(&mut self, key: &Q, now: DateTime<Utc>) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.touch_fresh(key, now) {
            return None;
        }
        self.entries.get_mut(key).map(|entry| &mut entry.content)
    }

    /// Checks for a fresh entry without promoting it or recording stats.
    pub fn contains_fresh<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Utc::now();
        !self.is_disabled()
            && self
                .entries
                .get(key)
                .is_some_and(|entry| !entry.is_stale_at(now, self.max_age))
    }

    // == Set ==
    /// Stores a value stamped with the current time.
    ///
    /// Any existing entry for the key is replaced and its position reset. While
    /// the cache is full, the least recently used entry is evicted.
    pub fn set(&mut self, key: K, value: V) {
        self.set_at(key, value, Utc::now());
    }

    /// Same as [`set`](Self::set), stamping the entry with `now`.
    pub fn set_at(&mut self, key: K, value: V, now: DateTime<Utc>) {
        if self.is_disabled() {
            return;
        }

        if self.entries.remove(&key).is_some() {
            self.lru.remove(&key);
        }

        while self.entries.len() >= self.capacity {
            match self.lru.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                }
                None => break,
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, now));
        self.lru.insert(key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Remove ==
    /// Removes an entry, fresh or stale. Removing an absent key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.entries.remove(key)?;
        self.lru.remove(key);
        self.stats.set_total_entries(self.entries.len());
        Some(removed.content)
    }

    // == Values ==
    /// Iterates all stored values, stale ones included, from least to most
    /// recently used.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, entry)| &entry.content)
    }

    /// Iterates keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.lru.iter()
    }

    /// Iterates keys with their entries from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &CacheEntry<V>)> + '_ {
        self.lru
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|entry| (key, entry)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Zeroes the counters, keeping the entries.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::new();
        self.stats.set_total_entries(self.entries.len());
    }

    // Records the read and promotes the key when its entry is fresh.
    fn touch_fresh<Q>(&mut self, key: &Q, now: DateTime<Utc>) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.is_disabled() {
            return false;
        }

        let age = match self.entries.get(key) {
            Some(entry) => entry.age_at(now),
            None => {
                self.stats.record_miss();
                return false;
            }
        };

        if age > self.max_age {
            debug!(
                age_secs = age.num_seconds(),
                max_age_secs = self.max_age.num_seconds(),
                "Stale cache entry"
            );
            self.stats.record_stale_read();
            return false;
        }

        self.lru.promote(key);
        self.stats.record_hit();
        true
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> TimedLruCache<String, i32> {
        TimedLruCache::new(capacity, Duration::days(365))
    }

    fn keys(cache: &TimedLruCache<String, i32>) -> Vec<&str> {
        cache.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_cache_new() {
        let cache = cache(10);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert!(!cache.is_disabled());
        assert_eq!(cache.capacity(), 10);
    }

    #[test]
    fn test_set_and_get() {
        let mut cache = cache(10);

        cache.set("key1".to_string(), 1);

        assert_eq!(cache.get("key1"), Some(&1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let mut cache = cache(10);
        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn test_overwrite_resets_position() {
        let mut cache = cache(10);

        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);
        cache.set("a".to_string(), 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(keys(&cache), vec!["b", "a"]);
        assert_eq!(cache.get("a"), Some(&3));
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = cache(3);

        cache.set("key1".to_string(), 1);
        cache.set("key2".to_string(), 2);
        cache.set("key3".to_string(), 3);
        cache.set("key4".to_string(), 4);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("key1"), None);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_get_promotes_key() {
        let mut cache = cache(3);

        cache.set("key1".to_string(), 1);
        cache.set("key2".to_string(), 2);
        cache.set("key3".to_string(), 3);

        cache.get("key1");
        cache.set("key4".to_string(), 4);

        assert_eq!(keys(&cache), vec!["key3", "key1", "key4"]);
    }

    #[test]
    fn test_stale_entry_is_hidden_but_kept() {
        let mut cache = TimedLruCache::new(3, Duration::seconds(60));
        let then = Utc::now();

        cache.set_at("old".to_string(), 1, then);
        cache.set_at("new".to_string(), 2, then + Duration::seconds(100));

        let now = then + Duration::seconds(120);
        assert_eq!(cache.get_at("old", now), None);
        assert_eq!(cache.get_at("new", now), Some(&2));

        // Still stored, still the least recently used
        assert_eq!(cache.len(), 2);
        assert_eq!(keys(&cache), vec!["old", "new"]);
        assert_eq!(cache.values().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(cache.stats().stale_reads, 1);
    }

    #[test]
    fn test_stale_entry_replaced_by_set() {
        let mut cache = TimedLruCache::new(3, Duration::seconds(60));
        let then = Utc::now();

        cache.set_at("k".to_string(), 1, then);
        let later = then + Duration::seconds(600);
        assert_eq!(cache.get_at("k", later), None);

        cache.set_at("k".to_string(), 2, later);
        assert_eq!(cache.get_at("k", later), Some(&2));
    }

    #[test]
    fn test_get_does_not_refresh_timestamp() {
        let mut cache = TimedLruCache::new(3, Duration::seconds(60));
        let then = Utc::now();

        cache.set_at("k".to_string(), 1, then);
        assert!(cache.get_at("k", then + Duration::seconds(50)).is_some());
        assert!(cache.get_at("k", then + Duration::seconds(70)).is_none());
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut cache = cache(3);

        cache.set("k".to_string(), 1);
        if let Some(value) = cache.get_mut("k") {
            *value += 10;
        }

        assert_eq!(cache.get("k"), Some(&11));
    }

    #[test]
    fn test_remove() {
        let mut cache = cache(3);

        cache.set("key1".to_string(), 1);
        assert_eq!(cache.remove("key1"), Some(1));
        assert_eq!(cache.remove("key1"), None);

        assert!(cache.is_empty());
        assert_eq!(cache.keys().count(), 0);
    }

    #[test]
    fn test_disabled_cache() {
        let mut cache = cache(0);

        cache.set("key1".to_string(), 1);

        assert!(cache.is_disabled());
        assert!(cache.is_empty());
        assert_eq!(cache.get("key1"), None);
        assert!(!cache.contains_fresh("key1"));
        assert_eq!(cache.stats(), CacheStats::new());
    }

    #[test]
    fn test_contains_fresh_does_not_promote() {
        let mut cache = cache(2);

        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);

        assert!(cache.contains_fresh("a"));
        cache.set("c".to_string(), 3);

        assert!(!cache.contains_fresh("a"));
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_values_is_restartable() {
        let mut cache = cache(5);

        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);
        assert_eq!(cache.values().count(), 2);

        cache.set("c".to_string(), 3);
        assert_eq!(cache.values().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut cache = cache(2);

        cache.set("A".to_string(), 1);
        cache.set("B".to_string(), 2);
        cache.set("C".to_string(), 3);
        assert_eq!(keys(&cache), vec!["B", "C"]);
        assert_eq!(cache.values().copied().collect::<Vec<_>>(), vec![2, 3]);

        assert_eq!(cache.get("B"), Some(&2));
        cache.set("D".to_string(), 4);

        assert_eq!(keys(&cache), vec!["B", "D"]);
        assert_eq!(cache.get("C"), None);
    }

    #[test]
    fn test_stats() {
        let mut cache = cache(10);

        cache.set("key1".to_string(), 1);
        cache.get("key1"); // hit
        cache.get("nonexistent"); // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);

        cache.reset_stats();
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.stats().total_entries, 1);
    }
}
