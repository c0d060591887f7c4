//! Profile sources consulted by the directory on cache misses.
//!
//! Implementations own their transport, retries and timeouts; a call either
//! returns a value or `None`.

use crate::models::{DexRecord, DirectoryProfile, LocalProfile};

/// The locally authoritative profile service.
pub trait LocalSource {
    /// Fetches a profile, creating it when `autocreate` is set and none exists.
    fn fetch(&self, name: &str, autocreate: bool) -> Option<LocalProfile>;

    /// Fetches the dex record attached to a profile id.
    fn fetch_dex_record(&self, id: &str) -> Option<DexRecord>;

    /// Replaces the dex record of a profile id. Returns whether it was accepted.
    fn push_dex_record(&self, id: &str, dex: &DexRecord) -> bool;
}

/// The external reputation directory.
pub trait DirectorySource {
    fn fetch(&self, name: &str) -> Option<DirectoryProfile>;
}
