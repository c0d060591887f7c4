//! Cache Module
//!
//! Provides the bounded, time-aware LRU cache shared by the profile directory
//! and the friends list, plus its on-disk snapshots.

mod entry;
mod lru;
mod snapshot;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use snapshot::{decode_snapshot, Snapshot, SnapshotEntry, SnapshotFile, SNAPSHOT_VERSION};
pub use stats::CacheStats;
pub use store::TimedLruCache;
