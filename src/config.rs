//! Configuration Module
//!
//! Handles loading cache sizes, maximum ages and the snapshot directory from
//! environment variables.

use std::env;
use std::path::PathBuf;

use chrono::Duration;

/// Snapshot file for the local profile cache
pub const LOCAL_PROFILES_SNAPSHOT: &str = "cmdrs.v4.json";
/// Snapshot file for the external directory cache
pub const DIRECTORY_PROFILES_SNAPSHOT: &str = "directory.v1.json";
/// Snapshot file for the friends cache
pub const FRIENDS_SNAPSHOT: &str = "friends.v1.json";

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity of each profile cache (0 disables caching)
    pub max_cache_size: usize,
    /// Maximum age in seconds of a cached local profile
    pub max_local_profile_age: u64,
    /// Maximum age in seconds of a cached directory profile
    pub max_directory_profile_age: u64,
    /// Capacity of the friends cache
    pub max_friends_size: usize,
    /// Maximum age in seconds of a friend status
    pub max_friends_age: u64,
    /// Directory holding the cache snapshots
    pub cache_dir: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_MAX_SIZE` - Profile cache capacity (default: 1000)
    /// - `CMDRS_MAX_AGE` - Local profile max age in seconds (default: 86400)
    /// - `DIRECTORY_MAX_AGE` - Directory profile max age in seconds (default: 604800)
    /// - `FRIENDS_MAX_SIZE` - Friends cache capacity (default: 10000)
    /// - `FRIENDS_MAX_AGE` - Friend status max age in seconds (default: 604800)
    /// - `CACHE_DIR` - Snapshot directory (default: ./cache)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_cache_size: parse_var("LRU_MAX_SIZE").unwrap_or(defaults.max_cache_size),
            max_local_profile_age: parse_var("CMDRS_MAX_AGE")
                .unwrap_or(defaults.max_local_profile_age),
            max_directory_profile_age: parse_var("DIRECTORY_MAX_AGE")
                .unwrap_or(defaults.max_directory_profile_age),
            max_friends_size: parse_var("FRIENDS_MAX_SIZE").unwrap_or(defaults.max_friends_size),
            max_friends_age: parse_var("FRIENDS_MAX_AGE").unwrap_or(defaults.max_friends_age),
            cache_dir: env::var("CACHE_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
        }
    }

    pub fn local_profile_age(&self) -> Duration {
        seconds(self.max_local_profile_age)
    }

    pub fn directory_profile_age(&self) -> Duration {
        seconds(self.max_directory_profile_age)
    }

    pub fn friends_age(&self) -> Duration {
        seconds(self.max_friends_age)
    }

    /// Path of the friends snapshot inside `cache_dir`.
    pub fn friends_snapshot_path(&self) -> PathBuf {
        self.cache_dir.join(FRIENDS_SNAPSHOT)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cache_size: 1000,
            max_local_profile_age: 60 * 60 * 24,
            max_directory_profile_age: 60 * 60 * 24 * 7,
            max_friends_size: 10_000,
            max_friends_age: 60 * 60 * 24 * 7,
            cache_dir: PathBuf::from("cache"),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

// Saturates instead of overflowing for absurdly large ages.
fn seconds(secs: u64) -> Duration {
    Duration::try_seconds(i64::try_from(secs).unwrap_or(i64::MAX / 1000))
        .unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_cache_size, 1000);
        assert_eq!(config.max_local_profile_age, 86_400);
        assert_eq!(config.max_directory_profile_age, 604_800);
        assert_eq!(config.max_friends_size, 10_000);
        assert_eq!(config.max_friends_age, 604_800);
        assert_eq!(config.cache_dir, PathBuf::from("cache"));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("LRU_MAX_SIZE");
        env::remove_var("CMDRS_MAX_AGE");
        env::remove_var("DIRECTORY_MAX_AGE");
        env::remove_var("FRIENDS_MAX_SIZE");
        env::remove_var("FRIENDS_MAX_AGE");
        env::remove_var("CACHE_DIR");

        let config = Config::from_env();
        assert_eq!(config.max_cache_size, 1000);
        assert_eq!(config.max_local_profile_age, 86_400);
        assert_eq!(config.max_friends_size, 10_000);
        assert_eq!(config.cache_dir, PathBuf::from("cache"));
    }

    #[test]
    fn test_age_accessors() {
        let config = Config::default();
        assert_eq!(config.local_profile_age(), Duration::days(1));
        assert_eq!(config.directory_profile_age(), Duration::days(7));
        assert_eq!(config.friends_age(), Duration::days(7));
    }

    #[test]
    fn test_huge_age_does_not_overflow() {
        assert!(seconds(u64::MAX) > Duration::days(365 * 1000));
    }

    #[test]
    fn test_friends_snapshot_path() {
        let config = Config {
            cache_dir: PathBuf::from("/tmp/edr"),
            ..Config::default()
        };
        assert_eq!(
            config.friends_snapshot_path(),
            PathBuf::from("/tmp/edr/friends.v1.json")
        );
    }
}
