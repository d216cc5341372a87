//! Digest index and duplicate groups.
//!
//! # Overview
//!
//! The [`DigestIndex`] accumulates one entry per hashed file, keyed by
//! content digest. Insertion order within a bucket reflects scan order.
//! Once scanning completes, buckets with two or more members become
//! [`DuplicateGroup`]s.
//!
//! # Example
//!
//! ```
//! use sigdupe::duplicates::DigestIndex;
//! use std::path::PathBuf;
//!
//! let mut index = DigestIndex::new();
//! index.insert([1u8; 32], PathBuf::from("/d/a.pdf"));
//! index.insert([1u8; 32], PathBuf::from("/d/b.pdf"));
//! index.insert([2u8; 32], PathBuf::from("/d/c.pdf"));
//!
//! let groups = index.into_groups();
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].paths.len(), 2);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{digest_to_hex, Digest};

/// Accumulator mapping content digests to the paths that produced them.
///
/// Invariants: no bucket is ever empty, and a path appears in exactly one
/// bucket (each file is hashed once per run).
#[derive(Debug, Clone, Default)]
pub struct DigestIndex {
    buckets: HashMap<Digest, Vec<PathBuf>>,
    total_paths: usize,
}

impl DigestIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hashed file under its digest.
    pub fn insert(&mut self, digest: Digest, path: PathBuf) {
        self.buckets.entry(digest).or_default().push(path);
        self.total_paths += 1;
    }

    /// Number of distinct digests seen.
    #[must_use]
    pub fn unique_digests(&self) -> usize {
        self.buckets.len()
    }

    /// Number of paths recorded across all buckets.
    #[must_use]
    pub fn total_paths(&self) -> usize {
        self.total_paths
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Consume the index, keeping only buckets with two or more members.
    ///
    /// Bucket ordering follows hash-map iteration; callers wanting stable
    /// output sort groups by digest and paths within each group.
    #[must_use]
    pub fn into_groups(self) -> Vec<DuplicateGroup> {
        self.buckets
            .into_iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(digest, paths)| DuplicateGroup { digest, paths })
            .collect()
    }
}

/// A set of two or more distinct paths sharing an identical digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Shared SHA-256 content digest
    pub digest: Digest,
    /// Member paths, in scan order
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of redundant copies (total minus one original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Digest as lowercase hexadecimal.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        digest_to_hex(&self.digest)
    }
}

/// Counts describing one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Files yielded by the tree walk, before extension filtering
    pub total_files: usize,
    /// Files whose suffix matched the requested extension
    pub candidate_files: usize,
    /// Candidates whose signature failed to validate
    pub mismatched_files: usize,
    /// Candidates accepted and hashed
    pub hashed_files: usize,
    /// Distinct digests among the hashed files
    pub unique_digests: usize,
    /// Groups with two or more identical files
    pub duplicate_groups: usize,
    /// Redundant copies across all groups
    pub duplicate_files: usize,
}
