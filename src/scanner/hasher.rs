//! Streaming SHA-256 file hasher.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing SHA-256
//! digests of file contents in fixed-size chunks, so memory use stays
//! independent of file size.
//!
//! # Example
//!
//! ```no_run
//! use sigdupe::scanner::{digest_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let digest = hasher.digest_file(Path::new("/d/report.pdf")).unwrap();
//! println!("{}", digest_to_hex(&digest));
//! ```

use std::fmt::Write as _;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use sha2::{Digest as _, Sha256};

use super::HashError;

/// Read block size for streaming hashes.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// A SHA-256 content digest.
pub type Digest = [u8; 32];

/// SHA-256 file hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hasher;

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the SHA-256 digest of a file's full content.
    ///
    /// The file is read in [`CHUNK_SIZE`] blocks. Chunking never changes
    /// the result; the digest equals a single-pass hash of the same
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or a read
    /// fails mid-stream. Callers treat this as fatal for the run.
    pub fn digest_file(&self, path: &Path) -> Result<Digest, HashError> {
        let mut file = File::open(path).map_err(|e| map_io_error(path, e))?;

        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = file.read(&mut buf).map_err(|e| map_io_error(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(hasher.finalize().into())
    }
}

/// Render a digest as lowercase hex.
#[must_use]
pub fn digest_to_hex(digest: &Digest) -> String {
    digest.iter().fold(
        String::with_capacity(digest.len() * 2),
        |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        },
    )
}

fn map_io_error(path: &Path, error: std::io::Error) -> HashError {
    match error.kind() {
        ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
