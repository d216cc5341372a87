//! File-signature verification.
//!
//! This module maps file extensions to their expected magic-byte
//! signatures and checks candidate files against them before any content
//! hashing happens:
//! - [`catalog`]: the static extension-to-signature catalog
//! - [`verifier`]: per-file signature and MIME verification
//! - [`mime`]: extension-to-MIME lookup used as a secondary confirmation

pub mod catalog;
pub mod mime;
pub mod verifier;

pub use catalog::{CatalogError, SignatureCatalog, SignatureRule};
pub use verifier::{SignatureVerifier, VerificationResult};

/// Normalize a user-supplied extension for catalog lookup.
///
/// Lowercases and strips any leading dots, so `".PDF"`, `"PDF"` and
/// `"pdf"` all resolve to the same rule.
#[must_use]
pub fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}
