//! Snapshot locations for the profile caches.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cache::SnapshotFile;
use crate::config::{DIRECTORY_PROFILES_SNAPSHOT, LOCAL_PROFILES_SNAPSHOT};

/// Snapshots written by earlier, incompatible releases
const LEGACY_SNAPSHOTS: &[&str] = &["cmdrs.json", "cmdrs.v3.json"];

// == Profile Storage ==
/// Directory holding the local and external profile snapshots.
#[derive(Debug, Clone)]
pub struct ProfileStorage {
    dir: PathBuf,
}

impl ProfileStorage {
    /// Uses `dir` for snapshots, deleting legacy snapshot files found there.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let storage = Self { dir: dir.into() };
        storage.remove_legacy_snapshots();
        storage
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn local_profiles(&self) -> SnapshotFile {
        SnapshotFile::new(self.dir.join(LOCAL_PROFILES_SNAPSHOT))
    }

    pub fn directory_profiles(&self) -> SnapshotFile {
        SnapshotFile::new(self.dir.join(DIRECTORY_PROFILES_SNAPSHOT))
    }

    fn remove_legacy_snapshots(&self) {
        for name in LEGACY_SNAPSHOTS {
            let path = self.dir.join(name);
            match std::fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "Removed legacy snapshot"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to remove legacy snapshot")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_removes_legacy_snapshots() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("cmdrs.v3.json"), "old").unwrap();
        std::fs::write(temp.path().join("unrelated.json"), "keep").unwrap();

        let storage = ProfileStorage::open(temp.path());

        assert!(!temp.path().join("cmdrs.v3.json").exists());
        assert!(temp.path().join("unrelated.json").exists());
        assert_eq!(storage.dir(), temp.path());
    }

    #[test]
    fn test_snapshot_paths() {
        let storage = ProfileStorage::open("/nonexistent/edr");

        assert_eq!(
            storage.local_profiles().path(),
            Path::new("/nonexistent/edr/cmdrs.v4.json")
        );
        assert_eq!(
            storage.directory_profiles().path(),
            Path::new("/nonexistent/edr/directory.v1.json")
        );
    }
}
