//! Profile Directory Module
//!
//! Two-tier lookup of commander profiles: the local source is authoritative,
//! the external directory fills in what the local profile lacks.

use serde::Serialize;
use tracing::{debug, error, info};

use crate::cache::{CacheStats, TimedLruCache};
use crate::config::Config;
use crate::directory::{DirectorySource, LocalSource, ProfileStorage};
use crate::error::Result;
use crate::models::{DirectoryProfile, LocalProfile, Profile};

/// Counters of both profile caches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub local: CacheStats,
    pub directory: CacheStats,
}

// == Profile Directory ==
/// Caches and merges profiles from a [`LocalSource`] and a [`DirectorySource`].
///
/// The directory cache stores `None` for commanders the external directory
/// does not know, so they are not queried again until that entry goes stale.
pub struct ProfileDirectory<L, D> {
    local: L,
    directory: D,
    local_cache: TimedLruCache<String, LocalProfile>,
    directory_cache: TimedLruCache<String, Option<DirectoryProfile>>,
    storage: Option<ProfileStorage>,
}

impl<L, D> ProfileDirectory<L, D>
where
    L: LocalSource,
    D: DirectorySource,
{
    // == Constructors ==
    /// Creates a directory with empty in-memory caches and no storage.
    pub fn new(config: &Config, local: L, directory: D) -> Self {
        Self {
            local,
            directory,
            local_cache: TimedLruCache::new(config.max_cache_size, config.local_profile_age()),
            directory_cache: TimedLruCache::new(
                config.max_cache_size,
                config.directory_profile_age(),
            ),
            storage: None,
        }
    }

    /// Creates a directory whose caches are restored from `storage`.
    ///
    /// Unreadable snapshots yield empty caches.
    pub fn with_storage(config: &Config, local: L, directory: D, storage: ProfileStorage) -> Self {
        let local_cache = storage
            .local_profiles()
            .load(config.max_cache_size, config.local_profile_age());
        let directory_cache = storage
            .directory_profiles()
            .load(config.max_cache_size, config.directory_profile_age());

        info!(
            local = local_cache.len(),
            directory = directory_cache.len(),
            "Profile caches restored"
        );

        Self {
            local,
            directory,
            local_cache,
            directory_cache,
            storage: Some(storage),
        }
    }

    // == Persist ==
    /// Writes both caches to storage. Without storage this does nothing.
    pub fn persist(&self) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        storage.local_profiles().save(&self.local_cache)?;
        storage.directory_profiles().save(&self.directory_cache)?;
        Ok(())
    }

    // == Lookup ==
    /// Returns the best profile known for `name`.
    ///
    /// The local profile comes from the cache or, on a miss, from the local
    /// source (`autocreate` is forwarded). The directory cache is consulted on
    /// every call; the external directory is only queried on a miss and when
    /// `check_external` is set. When both exist, the local profile wins and is
    /// complemented with the directory's fields.
    pub fn lookup(&mut self, name: &str, autocreate: bool, check_external: bool) -> Option<Profile> {
        let local = self.local_profile(name, autocreate);
        let directory = self.directory_profile(name, check_external);

        match (local, directory) {
            (None, None) => {
                error!(cmdr = name, "Failed to retrieve or create commander profile");
                None
            }
            (Some(mut local), Some(directory)) => {
                info!(cmdr = name, "Combining local and directory profiles");
                local.complement(&directory);
                Some(Profile::Local(local))
            }
            (Some(local), None) => Some(Profile::Local(local)),
            (None, Some(directory)) => Some(Profile::Directory(directory)),
        }
    }

    // == Dex Mutations ==
    /// Tags an existing local profile and pushes the new dex record.
    pub fn tag(&mut self, name: &str, tag: &str) -> bool {
        debug!(cmdr = name, tag, "Tagging");
        self.update_dex(name, |profile| profile.tag(tag))
    }

    /// Removes a tag from an existing local profile and pushes the new dex record.
    pub fn untag(&mut self, name: &str, tag: &str) -> bool {
        debug!(cmdr = name, tag, "Removing tag");
        self.update_dex(name, |profile| profile.untag(tag))
    }

    /// Writes a memo on an existing local profile; a blank memo removes it.
    pub fn memo(&mut self, name: &str, memo: &str) -> bool {
        debug!(cmdr = name, "Writing memo");
        if memo.trim().is_empty() {
            self.update_dex(name, LocalProfile::remove_memo)
        } else {
            self.update_dex(name, |profile| profile.set_memo(memo))
        }
    }

    // == Evict ==
    /// Forgets `name` in both caches.
    pub fn evict(&mut self, name: &str) {
        self.local_cache.remove(name);
        self.directory_cache.remove(name);
    }

    pub fn stats(&self) -> DirectoryStats {
        DirectoryStats {
            local: self.local_cache.stats(),
            directory: self.directory_cache.stats(),
        }
    }

    pub fn local_source(&self) -> &L {
        &self.local
    }

    pub fn directory_source(&self) -> &D {
        &self.directory
    }

    fn local_profile(&mut self, name: &str, autocreate: bool) -> Option<LocalProfile> {
        if let Some(profile) = self.local_cache.get(name) {
            debug!(cmdr = name, id = %profile.id, "Local profile cache hit");
            return Some(profile.clone());
        }

        let mut profile = self.local.fetch(name, autocreate)?;
        if let Some(dex) = self.local.fetch_dex_record(&profile.id) {
            debug!(cmdr = name, id = %profile.id, "Dex record found");
            profile.apply_dex(dex);
        }

        self.local_cache.set(name.to_string(), profile.clone());
        debug!(cmdr = name, id = %profile.id, "Cached local profile");
        Some(profile)
    }

    fn directory_profile(&mut self, name: &str, check_external: bool) -> Option<DirectoryProfile> {
        match self.directory_cache.get(name) {
            Some(Some(profile)) => {
                debug!(cmdr = name, "Directory profile cache hit");
                return Some(profile.clone());
            }
            Some(None) => {
                debug!(cmdr = name, "Known absent from the directory");
                return None;
            }
            None => {}
        }

        if !check_external {
            return None;
        }

        info!(cmdr = name, "No directory cache match, querying the directory");
        let fetched = self.directory.fetch(name);
        match &fetched {
            Some(profile) => debug!(
                cmdr = name,
                squadron = ?profile.squadron,
                role = ?profile.role,
                "Cached directory profile"
            ),
            None => info!(cmdr = name, "No directory match, caching the absence"),
        }
        self.directory_cache.set(name.to_string(), fetched.clone());
        fetched
    }

    // Applies a dex mutation to the local profile and pushes the result.
    fn update_dex<F>(&mut self, name: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut LocalProfile) -> bool,
    {
        let Some(mut profile) = self.local_profile(name, false) else {
            debug!(cmdr = name, "No local profile to annotate");
            return false;
        };

        if !mutate(&mut profile) {
            debug!(cmdr = name, "Dex record unchanged (e.g. tag already present)");
            return false;
        }

        if let Some(cached) = self.local_cache.get_mut(name) {
            cached.dex.clone_from(&profile.dex);
        }

        let dex = profile.dex_record();
        debug!(cmdr = name, ?dex, "New dex state");
        self.local.push_dex_record(&profile.id, &dex)
    }
}
