use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use sigdupe::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use sigdupe::signature::SignatureCatalog;
use tempfile::TempDir;

fn finder() -> DuplicateFinder {
    let catalog = SignatureCatalog::load().unwrap();
    DuplicateFinder::new(catalog, FinderConfig::default())
}

fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap().write_all(content).unwrap();
    path
}

#[test]
fn test_pdf_scenario() {
    // /d contains a.pdf, b.pdf (identical, valid signature), c.pdf
    // (valid signature, different content), d.pdf (text content).
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.pdf", b"%PDF-1.7\nshared body");
    let b = write_file(dir.path(), "b.pdf", b"%PDF-1.7\nshared body");
    let c = write_file(dir.path(), "c.pdf", b"%PDF-1.7\nits own body");
    let d = write_file(dir.path(), "d.pdf", b"plain text, no magic");

    let report = finder().run(dir.path(), "pdf").unwrap();

    // One duplicate group holding exactly a and b.
    assert_eq!(report.groups.len(), 1);
    let mut members = report.groups[0].paths.clone();
    members.sort();
    assert_eq!(members, vec![a, b]);

    // c hashed but unique, so absent from every group.
    assert!(!report.groups.iter().any(|g| g.paths.contains(&c)));
    assert_eq!(report.summary.hashed_files, 3);
    assert_eq!(report.summary.unique_digests, 2);

    // d rejected by the signature check and never hashed.
    assert_eq!(report.mismatches, vec![d]);
}

#[test]
fn test_empty_directory_is_success_not_error() {
    let dir = TempDir::new().unwrap();

    let report = finder().run(dir.path(), "pdf").unwrap();

    assert!(!report.has_duplicates());
    assert!(report.mismatches.is_empty());
    assert_eq!(report.summary.total_files, 0);
    assert_eq!(report.summary.duplicate_groups, 0);
}

#[test]
fn test_hidden_directories_never_descended() {
    let dir = TempDir::new().unwrap();

    write_file(dir.path(), "visible.pdf", b"%PDF-1.7 visible");

    let hidden = dir.path().join(".stash");
    fs::create_dir(&hidden).unwrap();
    let hidden_valid = write_file(&hidden, "copy1.pdf", b"%PDF-1.7 hidden dup");
    let hidden_valid2 = write_file(&hidden, "copy2.pdf", b"%PDF-1.7 hidden dup");
    let hidden_fake = write_file(&hidden, "fake.pdf", b"not a pdf at all");

    let report = finder().run(dir.path(), "pdf").unwrap();

    // Nothing under the hidden directory surfaces anywhere: not in
    // groups, not in mismatches, not in the counts.
    for path in [&hidden_valid, &hidden_valid2, &hidden_fake] {
        assert!(!report.groups.iter().any(|g| g.paths.contains(path)));
        assert!(!report.mismatches.contains(path));
    }
    assert_eq!(report.summary.total_files, 1);
    assert_eq!(report.summary.candidate_files, 1);
    assert!(report.groups.is_empty());
}

#[test]
fn test_hidden_files_excluded() {
    let dir = TempDir::new().unwrap();

    write_file(dir.path(), "a.pdf", b"%PDF-1.7 dup");
    write_file(dir.path(), ".b.pdf", b"%PDF-1.7 dup");

    let report = finder().run(dir.path(), "pdf").unwrap();

    // The hidden twin is invisible, so no group forms.
    assert!(report.groups.is_empty());
    assert_eq!(report.summary.total_files, 1);
}

#[test]
fn test_unknown_extension_aborts_before_any_io() {
    // The directory does not exist; an unknown extension must still win,
    // proving validation precedes all filesystem work.
    let err = finder()
        .run(Path::new("/definitely/not/here"), "nope")
        .unwrap_err();

    match err {
        FinderError::UnknownExtension {
            extension,
            supported,
            ..
        } => {
            assert_eq!(extension, "nope");
            assert!(!supported.is_empty());
            assert!(supported.windows(2).all(|w| w[0] <= w[1]));
        }
        other => panic!("expected UnknownExtension, got {other:?}"),
    }
}

#[test]
fn test_extension_normalization_end_to_end() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.pdf", b"%PDF-1.7 one");
    write_file(dir.path(), "b.PDF", b"%PDF-1.7 one");

    // Leading dot and mixed case on the request side.
    let report = finder().run(dir.path(), ".PDF").unwrap();

    assert_eq!(report.summary.candidate_files, 2);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].paths.len(), 2);
}

#[test]
fn test_bucket_membership_idempotent() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "x.pdf", b"%PDF-1.5 alpha");
    write_file(dir.path(), "y.pdf", b"%PDF-1.5 alpha");
    let sub = dir.path().join("deeper");
    fs::create_dir(&sub).unwrap();
    write_file(&sub, "z.pdf", b"%PDF-1.5 alpha");
    write_file(&sub, "w.pdf", b"%PDF-1.5 beta");

    let finder = finder();
    let first = finder.run(dir.path(), "pdf").unwrap();
    let second = finder.run(dir.path(), "pdf").unwrap();

    assert_eq!(first.sorted_groups(), second.sorted_groups());
    assert_eq!(first.summary, second.summary);
    assert_eq!(first.groups[0].paths.len(), 3);
}

#[test]
fn test_every_hashed_path_in_exactly_one_bucket() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.gif", b"GIF89a dup payload");
    write_file(dir.path(), "b.gif", b"GIF89a dup payload");
    write_file(dir.path(), "c.gif", b"GIF87a other payload");
    write_file(dir.path(), "d.gif", b"GIF87a other payload");

    let report = finder().run(dir.path(), "gif").unwrap();

    assert_eq!(report.groups.len(), 2);
    let mut all_paths: Vec<_> = report
        .groups
        .iter()
        .flat_map(|g| g.paths.iter().cloned())
        .collect();
    let total = all_paths.len();
    all_paths.sort();
    all_paths.dedup();
    assert_eq!(all_paths.len(), total, "a path appeared in two buckets");
}

#[test]
fn test_offset_signature_end_to_end() {
    let dir = TempDir::new().unwrap();

    let mut tar = vec![0u8; 257];
    tar.extend_from_slice(b"ustar\x0000");
    tar.extend_from_slice(&[0u8; 512]);

    write_file(dir.path(), "one.tar", &tar);
    write_file(dir.path(), "two.tar", &tar);
    write_file(dir.path(), "broken.tar", b"short and wrong");

    let report = finder().run(dir.path(), "tar").unwrap();

    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].paths.len(), 2);
    assert_eq!(report.mismatches.len(), 1);
}
