use std::fs::File;
use std::io::Write;

use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

use sigdupe::duplicates::{DuplicateFinder, FinderConfig};
use sigdupe::scanner::Hasher;
use sigdupe::signature::SignatureCatalog;

fn bench_hashing(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("payload.bin");
    let content: Vec<u8> = (0..4 * 1024 * 1024).map(|i| (i % 251) as u8).collect();
    File::create(&path).unwrap().write_all(&content).unwrap();

    let hasher = Hasher::new();
    c.bench_function("hash_4mib_file", |b| {
        b.iter(|| hasher.digest_file(&path).unwrap());
    });
}

fn bench_full_scan(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    for i in 0..50 {
        let path = dir.path().join(format!("doc{i}.pdf"));
        let mut f = File::create(&path).unwrap();
        // Half the files share content, the rest are unique.
        if i % 2 == 0 {
            f.write_all(b"%PDF-1.7 shared body").unwrap();
        } else {
            write!(f, "%PDF-1.7 body {i}").unwrap();
        }
    }

    let catalog = SignatureCatalog::load().unwrap();
    let finder = DuplicateFinder::new(catalog, FinderConfig::default());

    c.bench_function("scan_50_pdfs", |b| {
        b.iter(|| finder.run(dir.path(), "pdf").unwrap());
    });
}

criterion_group!(benches, bench_hashing, bench_full_scan);
criterion_main!(benches);
