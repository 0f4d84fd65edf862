use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use super::content_hasher::compute_sha256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupOutcome {
    New,
    /// Content matched an earlier file; the file has been deleted.
    Duplicate,
}

/// In-memory content-hash guard for one collection run of one category.
///
/// Nothing is persisted: a fresh `Deduplicator` knows no hashes.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes `path` and records it, deleting the file if already seen.
    ///
    /// On a hashing error the file is deleted as well, since it cannot be
    /// vouched for.
    pub fn check(&mut self, path: &Path) -> io::Result<DedupOutcome> {
        let hash = match compute_sha256(path) {
            Ok(hash) => hash,
            Err(e) => {
                let _ = fs::remove_file(path);
                return Err(e);
            }
        };
        if self.seen.insert(hash) {
            Ok(DedupOutcome::New)
        } else {
            fs::remove_file(path)?;
            Ok(DedupOutcome::Duplicate)
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
