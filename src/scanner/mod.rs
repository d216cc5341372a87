//! Scanner module for directory traversal and file hashing.
//!
//! The scanner is divided into submodules:
//! - [`walker`]: sequential directory traversal and file discovery
//! - [`hasher`]: streaming SHA-256 content hashing

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{digest_to_hex, Digest, Hasher, CHUNK_SIZE};
pub use walker::Walker;

/// Errors that can occur during file hashing.
///
/// Unlike signature verification, which tolerates a file that vanished
/// between enumeration and read, a failed hash read is fatal for the
/// whole run: a partial digest would silently corrupt grouping.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
