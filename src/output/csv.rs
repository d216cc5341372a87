//! CSV export for duplicate matches.
//!
//! # Columns
//!
//! - `File`: full path of a file belonging to a duplicate group
//! - `Hash`: the group's SHA-256 digest (lowercase hex)
//!
//! One row per file in a group of size ≥ 2; rows of the same group are
//! contiguous. Groups are sorted by digest and paths within a group are
//! sorted, so the export is stable across runs on a static tree.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::duplicates::DuplicateReport;

/// Errors that can occur during CSV export.
#[derive(Debug, Error)]
pub enum CsvExportError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow {
    /// Full path to the duplicate file
    #[serde(rename = "File")]
    file: String,
    /// SHA-256 digest shared by the group
    #[serde(rename = "Hash")]
    hash: String,
}

/// CSV export over a finished report.
pub struct CsvExport<'a> {
    report: &'a DuplicateReport,
}

impl<'a> CsvExport<'a> {
    /// Create a new CSV exporter.
    #[must_use]
    pub fn new(report: &'a DuplicateReport) -> Self {
        Self { report }
    }

    /// Write the CSV rows to the given writer.
    ///
    /// # Errors
    ///
    /// Returns [`CsvExportError`] if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for group in self.report.sorted_groups() {
            let hash = group.digest_hex();
            for path in &group.paths {
                csv_writer.serialize(CsvRow {
                    file: path.to_string_lossy().to_string(),
                    hash: hash.clone(),
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write the CSV to a file path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`CsvExportError`] if the directories or file cannot be
    /// created, or writing fails.
    pub fn write_to_path(&self, path: &Path) -> Result<(), CsvExportError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.write_to(File::create(path)?)
    }

    /// Generate the CSV as a string.
    ///
    /// # Errors
    ///
    /// Returns [`CsvExportError`] if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvExportError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::{DuplicateGroup, ScanSummary};
    use std::path::PathBuf;

    fn report_with_groups(groups: Vec<DuplicateGroup>) -> DuplicateReport {
        DuplicateReport {
            groups,
            mismatches: Vec::new(),
            summary: ScanSummary::default(),
        }
    }

    #[test]
    fn test_csv_header_and_rows() {
        let report = report_with_groups(vec![DuplicateGroup {
            digest: [0u8; 32],
            paths: vec![PathBuf::from("/d/a.pdf"), PathBuf::from("/d/b.pdf")],
        }]);

        let csv_str = CsvExport::new(&report).to_string().unwrap();
        let mut lines = csv_str.lines();

        assert_eq!(lines.next(), Some("File,Hash"));
        assert_eq!(lines.next(), Some(&*format!("/d/a.pdf,{}", "0".repeat(64))));
        assert_eq!(lines.next(), Some(&*format!("/d/b.pdf,{}", "0".repeat(64))));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_groups_contiguous_and_sorted_by_digest() {
        let report = report_with_groups(vec![
            DuplicateGroup {
                digest: [9u8; 32],
                paths: vec![PathBuf::from("/z2"), PathBuf::from("/z1")],
            },
            DuplicateGroup {
                digest: [1u8; 32],
                paths: vec![PathBuf::from("/a2"), PathBuf::from("/a1")],
            },
        ]);

        let csv_str = CsvExport::new(&report).to_string().unwrap();
        let lines: Vec<&str> = csv_str.lines().collect();

        // Low digest first, paths sorted within the group.
        assert!(lines[1].starts_with("/a1,"));
        assert!(lines[2].starts_with("/a2,"));
        assert!(lines[3].starts_with("/z1,"));
        assert!(lines[4].starts_with("/z2,"));
    }

    #[test]
    fn test_empty_report_is_header_only() {
        let report = report_with_groups(Vec::new());
        let csv_str = CsvExport::new(&report).to_string().unwrap();
        // The csv crate emits no header until the first record; an empty
        // report produces an empty document.
        assert!(csv_str.is_empty());
    }

    #[test]
    fn test_path_with_comma_is_quoted() {
        let report = report_with_groups(vec![DuplicateGroup {
            digest: [0u8; 32],
            paths: vec![
                PathBuf::from("/d/file,with,comma.pdf"),
                PathBuf::from("/d/plain.pdf"),
            ],
        }]);

        let csv_str = CsvExport::new(&report).to_string().unwrap();
        assert!(csv_str.contains("\"/d/file,with,comma.pdf\""));
    }

    #[test]
    fn test_write_to_path_creates_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("results").join("duplicate_matches.csv");

        let report = report_with_groups(vec![DuplicateGroup {
            digest: [2u8; 32],
            paths: vec![PathBuf::from("/x"), PathBuf::from("/y")],
        }]);

        CsvExport::new(&report).write_to_path(&target).unwrap();
        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.starts_with("File,Hash"));
    }
}
