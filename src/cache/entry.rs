//! Cache Entry Module
//!
//! Defines a cached value together with the time it was stored.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// Represents a single cache entry with its insertion time.
///
/// The timestamp is set when the entry is stored and never refreshed by reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<V> {
    /// The stored value
    pub content: V,
    /// When the value was stored
    pub inserted_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with `now`.
    pub fn new(content: V, now: DateTime<Utc>) -> Self {
        Self {
            content,
            inserted_at: now,
        }
    }

    // == Age ==
    /// Returns how long ago the entry was stored, relative to `now`.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.inserted_at
    }

    // == Is Stale ==
    /// Checks whether the entry is older than `max_age` at `now`.
    ///
    /// Boundary condition: an entry whose age is exactly `max_age` is still
    /// fresh; it becomes stale only once the age strictly exceeds it.
    pub fn is_stale_at(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.age_at(now) > max_age
    }
}
