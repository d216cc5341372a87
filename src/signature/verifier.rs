//! Per-file signature verification.
//!
//! # Overview
//!
//! The [`SignatureVerifier`] confirms that a candidate file's actual bytes
//! match one of the signatures cataloged for its claimed extension.
//! Verification reads only the first `offset + max(signature length)`
//! bytes of the file, never the full content.
//!
//! A file that passes the byte check is additionally confirmed against
//! the MIME table: the type guessed from the file's own name must agree
//! with the type registered for the requested extension.
//!
//! # Example
//!
//! ```no_run
//! use sigdupe::signature::{SignatureCatalog, SignatureVerifier, VerificationResult};
//! use std::path::Path;
//!
//! let catalog = SignatureCatalog::load().unwrap();
//! let verifier = SignatureVerifier::new(&catalog);
//!
//! match verifier.verify(Path::new("/d/report.pdf"), "pdf") {
//!     VerificationResult::Accepted => println!("genuine PDF"),
//!     VerificationResult::SignatureMismatch => println!("extension lies"),
//!     VerificationResult::ExtensionUnknown => println!("no rule for this extension"),
//! }
//! ```

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use super::{mime, normalize_extension, SignatureCatalog, SignatureRule};

/// Outcome of verifying one candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationResult {
    /// The bytes at the rule offset match a cataloged signature and the
    /// MIME confirmation agrees.
    Accepted,
    /// The file's bytes match none of the candidate signatures, or the
    /// file could not be read.
    SignatureMismatch,
    /// No rule exists for the requested extension. Callers treat this as
    /// fatal for the whole run, not as a per-file skip.
    ExtensionUnknown,
}

/// Read-only signature checker over a loaded catalog.
#[derive(Debug, Clone, Copy)]
pub struct SignatureVerifier<'a> {
    catalog: &'a SignatureCatalog,
}

impl<'a> SignatureVerifier<'a> {
    /// Create a verifier borrowing the given catalog.
    #[must_use]
    pub fn new(catalog: &'a SignatureCatalog) -> Self {
        Self { catalog }
    }

    /// Verify that `path`'s content matches its claimed `extension`.
    ///
    /// The extension is normalized before lookup. A file that disappears
    /// or becomes unreadable between enumeration and this check is
    /// reported as [`VerificationResult::SignatureMismatch`] so the scan
    /// can continue.
    #[must_use]
    pub fn verify(&self, path: &Path, extension: &str) -> VerificationResult {
        let extension = normalize_extension(extension);
        let Some(rule) = self.catalog.rule(&extension) else {
            return VerificationResult::ExtensionUnknown;
        };

        let header = match read_signature_window(path, rule) {
            Ok(header) => header,
            Err(e) => {
                log::debug!("Cannot read {} for verification: {}", path.display(), e);
                return VerificationResult::SignatureMismatch;
            }
        };

        let matched = rule
            .signatures
            .iter()
            .any(|signature| header.starts_with(signature));
        if !matched {
            log::trace!("Signature mismatch: {}", path.display());
            return VerificationResult::SignatureMismatch;
        }

        // Secondary confirmation: the name-derived MIME type must agree
        // with the one registered for the requested extension.
        if mime::guess(path) != mime::for_extension(&extension) {
            log::trace!("MIME disagreement: {}", path.display());
            return VerificationResult::SignatureMismatch;
        }

        VerificationResult::Accepted
    }
}

/// Read the window of bytes the rule's signatures occupy.
///
/// Seeks to the rule offset and reads up to the longest candidate length.
/// A short read (file smaller than the window) is not an error; the
/// shorter buffer simply cannot match longer candidates.
fn read_signature_window(path: &Path, rule: &SignatureRule) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(rule.offset))?;

    let mut buf = vec![0u8; rule.max_signature_len()];
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    buf.truncate(filled);
    Ok(buf)
}
