//! Commander Cache - session state and profile caches for remote commanders
//!
//! Provides a time-aware LRU cache, per-commander social state tracking, and a
//! two-tier profile directory merging local and external profiles.

pub mod cache;
pub mod config;
pub mod directory;
pub mod entity;
pub mod error;
pub mod models;

pub use cache::{SnapshotFile, TimedLruCache};
pub use config::Config;
pub use directory::{DirectorySource, LocalSource, ProfileDirectory, ProfileStorage};
pub use entity::{EntityState, FriendStatus, GameMode};
pub use error::{CacheError, Result};
pub use models::{DexRecord, DirectoryProfile, LocalProfile, Profile};
