//! In-memory path to digest map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::scanner::{hash_to_hex, Hash};

/// Process-local record of the last digest written for each path.
#[derive(Debug, Default)]
pub struct HashCache {
    entries: Mutex<HashMap<PathBuf, Hash>>,
}

impl HashCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Hash>> {
        // A panicking worker cannot leave a half-written entry behind
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Last recorded digest for a path, if any.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<Hash> {
        self.lock().get(path).copied()
    }

    /// Record the digest of content just written to `path`.
    pub fn record(&self, path: PathBuf, hash: Hash) {
        log::trace!("Recording digest {} for {}", hash_to_hex(&hash), path.display());
        self.lock().insert(path, hash);
    }

    /// Whether `hash` equals the digest recorded for `path`.
    ///
    /// A path with no record is never unchanged.
    #[must_use]
    pub fn is_unchanged(&self, path: &Path, hash: &Hash) -> bool {
        self.get(path).is_some_and(|recorded| &recorded == hash)
    }

    /// Number of recorded paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
