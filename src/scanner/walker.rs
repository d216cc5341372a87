//! Sequential directory walker.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and yielding every regular file under it, one at a time, in a
//! deterministic order.
//!
//! # Traversal rules
//!
//! - Depth-first, children sorted by file name for deterministic output
//! - Hidden entries (names starting with `.`) are neither yielded nor
//!   descended into
//! - Symbolic links are never followed; a symlink to a directory is
//!   yielded as a leaf entry, which prevents cycles
//! - Entries that cannot be read (permission denied, vanished mid-walk)
//!   are skipped and the walk continues with their siblings
//!
//! The walker does not filter by extension; that happens at the consumer.
//!
//! # Example
//!
//! ```no_run
//! use sigdupe::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"));
//! for path in walker.walk() {
//!     println!("{}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Directory walker for sequential file discovery.
///
/// Each call to [`Walker::walk`] re-walks from the disk state at call
/// time, so the iterator is restartable.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
}

impl Walker {
    /// Create a new walker for the given root directory.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Walk the tree, yielding paths of regular files and symlink leaves.
    ///
    /// Unreadable entries are logged at debug level and skipped; they
    /// never stop the iteration.
    pub fn walk(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => {
                    if entry.depth() == 0 || entry.file_type().is_dir() {
                        return None;
                    }
                    Some(entry.into_path())
                }
                Err(e) => {
                    log::debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
    }
}

/// Whether an entry's name marks it as hidden.
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
