//! Duplicate detection module.
//!
//! This module provides:
//! - [`index`]: the digest-to-paths accumulator and duplicate groups
//! - [`finder`]: the verify-then-hash orchestration pipeline

pub mod finder;
pub mod index;

pub use finder::{DuplicateFinder, DuplicateReport, FinderConfig, FinderError};
pub use index::{DigestIndex, DuplicateGroup, ScanSummary};
