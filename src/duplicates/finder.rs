//! Duplicate finder orchestration.
//!
//! # Overview
//!
//! [`DuplicateFinder`] drives the whole pipeline:
//! 1. **Validate**: normalize the requested extension and check it
//!    against the signature catalog (fatal abort before any I/O if
//!    unknown)
//! 2. **Count**: walk the tree once, collecting every file path
//! 3. **Scan**: filter the collected paths by extension, verify each
//!    candidate's signature, hash the accepted ones into a
//!    [`DigestIndex`]
//! 4. **Group**: keep digests shared by two or more paths and compute
//!    summary counts
//!
//! The count pass and the scan pass operate on the same collected path
//! list, so the progress total always agrees with the scanned set.
//!
//! # Example
//!
//! ```no_run
//! use sigdupe::duplicates::{DuplicateFinder, FinderConfig};
//! use sigdupe::signature::SignatureCatalog;
//! use std::path::Path;
//!
//! let catalog = SignatureCatalog::load().unwrap();
//! let finder = DuplicateFinder::new(catalog, FinderConfig::default());
//! let report = finder.run(Path::new("/d"), "pdf").unwrap();
//!
//! for group in report.sorted_groups() {
//!     println!("{} x{}", group.digest_hex(), group.len());
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::progress::ProgressCallback;
use crate::scanner::{HashError, Hasher, Walker};
use crate::signature::{
    normalize_extension, SignatureCatalog, SignatureVerifier, VerificationResult,
};

use super::index::{DigestIndex, DuplicateGroup, ScanSummary};

/// Run-level errors from the finder.
#[derive(Debug, Error)]
pub enum FinderError {
    /// The scan root is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The requested extension has no signature rule. Raised before any
    /// scanning work starts.
    #[error("unsupported file extension '{extension}'")]
    UnknownExtension {
        /// The normalized extension that failed the lookup
        extension: String,
        /// Every extension the catalog supports, sorted
        supported: Vec<String>,
        /// Closest known extension, if one is similar enough
        suggestion: Option<String>,
    },

    /// The run was interrupted by a shutdown signal. No report exists.
    #[error("interrupted")]
    Interrupted,

    /// A file failed to hash. A partial digest would corrupt grouping,
    /// so this aborts the run instead of skipping the file.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Configuration for a finder run.
#[derive(Default)]
pub struct FinderConfig {
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl FinderConfig {
    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    fn on_phase_start(&self, phase: &str, total: usize) {
        if let Some(ref callback) = self.progress_callback {
            callback.on_phase_start(phase, total);
        }
    }

    fn on_progress(&self, current: usize, path: &Path) {
        if let Some(ref callback) = self.progress_callback {
            callback.on_progress(current, path.to_string_lossy().as_ref());
        }
    }

    fn on_phase_end(&self, phase: &str) {
        if let Some(ref callback) = self.progress_callback {
            callback.on_phase_end(phase);
        }
    }
}

/// Final output of a completed run. Immutable once produced.
#[derive(Debug, Clone)]
pub struct DuplicateReport {
    /// Groups of two or more identical files
    pub groups: Vec<DuplicateGroup>,
    /// Candidates whose signature failed to validate, in scan order
    pub mismatches: Vec<PathBuf>,
    /// Counts describing the run
    pub summary: ScanSummary,
}

impl DuplicateReport {
    /// Whether any duplicate group was found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Groups sorted by digest, paths sorted within each group.
    ///
    /// Bucket membership is deterministic for a static tree; this
    /// ordering makes the rendering deterministic too.
    #[must_use]
    pub fn sorted_groups(&self) -> Vec<DuplicateGroup> {
        let mut groups = self.groups.clone();
        for group in &mut groups {
            group.paths.sort();
        }
        groups.sort_by_key(|g| g.digest);
        groups
    }
}

/// Signature-verifying duplicate finder.
///
/// All accumulator state lives inside a single `run` call, so one finder
/// can serve any number of runs without leaking state between them.
#[derive(Debug)]
pub struct DuplicateFinder {
    catalog: SignatureCatalog,
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a finder over a loaded catalog.
    #[must_use]
    pub fn new(catalog: SignatureCatalog, config: FinderConfig) -> Self {
        Self {
            catalog,
            config,
            hasher: Hasher::new(),
        }
    }

    /// The catalog this finder validates against.
    #[must_use]
    pub fn catalog(&self) -> &SignatureCatalog {
        &self.catalog
    }

    /// Run the full pipeline over `directory` for files claiming
    /// `extension`.
    ///
    /// # Errors
    ///
    /// - [`FinderError::UnknownExtension`] before any filesystem I/O if
    ///   the extension has no catalog rule
    /// - [`FinderError::NotADirectory`] if the root is unusable
    /// - [`FinderError::Hash`] if any accepted file fails to hash
    /// - [`FinderError::Interrupted`] if the shutdown flag was set;
    ///   no partial report is returned
    pub fn run(&self, directory: &Path, extension: &str) -> Result<DuplicateReport, FinderError> {
        // Validating
        let extension = normalize_extension(extension);
        if !self.catalog.contains(&extension) {
            return Err(self.unknown_extension(extension));
        }
        if !directory.is_dir() {
            return Err(FinderError::NotADirectory(directory.to_path_buf()));
        }

        log::info!(
            "Scanning {} for '{}' files",
            directory.display(),
            extension
        );

        // Counting
        let paths = self.collect_paths(directory)?;
        log::info!("{} files found under {}", paths.len(), directory.display());

        // Scanning
        let (index, mismatches, candidate_files) = self.scan(&paths, &extension)?;

        // Grouping
        let hashed_files = index.total_paths();
        let unique_digests = index.unique_digests();
        let groups = index.into_groups();

        let summary = ScanSummary {
            total_files: paths.len(),
            candidate_files,
            mismatched_files: mismatches.len(),
            hashed_files,
            unique_digests,
            duplicate_groups: groups.len(),
            duplicate_files: groups.iter().map(DuplicateGroup::duplicate_count).sum(),
        };

        log::info!(
            "Scan complete: {} candidates, {} hashed, {} duplicate groups",
            summary.candidate_files,
            summary.hashed_files,
            summary.duplicate_groups
        );

        // Done
        Ok(DuplicateReport {
            groups,
            mismatches,
            summary,
        })
    }

    /// Walk the tree once, materializing every file path.
    ///
    /// The collected list backs both the progress total and the scan
    /// pass, so count and content always agree for a static tree.
    fn collect_paths(&self, directory: &Path) -> Result<Vec<PathBuf>, FinderError> {
        self.config.on_phase_start("walking", 0);

        let walker = Walker::new(directory);
        let mut paths = Vec::new();
        for path in walker.walk() {
            if self.config.is_shutdown_requested() {
                self.config.on_phase_end("walking");
                return Err(FinderError::Interrupted);
            }
            self.config.on_progress(paths.len() + 1, &path);
            paths.push(path);
        }

        self.config.on_phase_end("walking");
        Ok(paths)
    }

    /// Verify and hash every candidate, building the digest index.
    fn scan(
        &self,
        paths: &[PathBuf],
        extension: &str,
    ) -> Result<(DigestIndex, Vec<PathBuf>, usize), FinderError> {
        let verifier = SignatureVerifier::new(&self.catalog);
        let mut index = DigestIndex::new();
        let mut mismatches = Vec::new();
        let mut candidate_files = 0;

        self.config.on_phase_start("scanning", paths.len());

        for (i, path) in paths.iter().enumerate() {
            if self.config.is_shutdown_requested() {
                self.config.on_phase_end("scanning");
                return Err(FinderError::Interrupted);
            }
            self.config.on_progress(i + 1, path);

            if !suffix_matches(path, extension) {
                continue;
            }
            candidate_files += 1;

            match verifier.verify(path, extension) {
                VerificationResult::Accepted => {
                    let digest = self.hasher.digest_file(path)?;
                    index.insert(digest, path.clone());
                }
                VerificationResult::SignatureMismatch => {
                    mismatches.push(path.clone());
                }
                VerificationResult::ExtensionUnknown => {
                    // Validation already ruled this out; surface it the
                    // same way if the catalog and verifier ever disagree.
                    self.config.on_phase_end("scanning");
                    return Err(self.unknown_extension(extension.to_string()));
                }
            }
        }

        self.config.on_phase_end("scanning");
        Ok((index, mismatches, candidate_files))
    }

    fn unknown_extension(&self, extension: String) -> FinderError {
        let supported = self.catalog.known_extensions();
        let suggestion = closest_extension(&extension, &supported);
        FinderError::UnknownExtension {
            extension,
            supported,
            suggestion,
        }
    }
}

/// Case-insensitive suffix match against the requested extension.
fn suffix_matches(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case(extension))
}

/// Closest known extension by Jaro-Winkler similarity, if any is close
/// enough to be a plausible typo.
fn closest_extension(input: &str, known: &[String]) -> Option<String> {
    known
        .iter()
        .map(|ext| (ext, strsim::jaro_winkler(input, ext)))
        .filter(|(_, score)| *score >= 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(ext, _)| ext.clone())
}
