//! Performance benchmarks for the indexing front half.
//!
//! **Benchmarks included:**
//! - `chunk_lines`: line-window chunking throughput on synthetic files
//! - `tree_scan`: ignore-rule-aware tree traversal over a generated tree
//! - `document_id`: content-addressed id derivation
//!
//! **Run benchmarks:**
//! ```bash
//! cargo bench                    # Run all benchmarks
//! cargo bench -- chunk_lines     # Chunking only
//! ```
//!
//! Embedding and store round-trips are network-bound and are not
//! benchmarked here.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::TempDir;

use trawl::chunker::chunk_lines;
use trawl::identity::{document_id, file_hash};
use trawl::scan::{IgnoreRules, TreeScan};

/// Generate `lines` lines of plausible source text.
fn synthetic_source(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("    let value_{i} = compute({i}) + offset;"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lay out a tree with `dirs` directories of `files_per_dir` small
/// files each, plus an ignored subtree that the scan must prune.
fn synthetic_tree(dirs: usize, files_per_dir: usize) -> TempDir {
    let tmp = TempDir::new().expect("failed to create temp dir");
    for dir in 0..dirs {
        let dir_path = tmp.path().join(format!("module_{dir}"));
        std::fs::create_dir_all(&dir_path).expect("failed to create dir");
        for file in 0..files_per_dir {
            std::fs::write(
                dir_path.join(format!("file_{file}.rs")),
                synthetic_source(40),
            )
            .expect("failed to write file");
        }
    }
    let ignored = tmp.path().join("node_modules").join("pkg");
    std::fs::create_dir_all(&ignored).expect("failed to create dir");
    for file in 0..files_per_dir {
        std::fs::write(ignored.join(format!("dep_{file}.js")), "module.exports = 1;")
            .expect("failed to write file");
    }
    tmp
}

fn bench_chunk_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_lines");
    group.sample_size(20);

    for lines in [1_000, 10_000, 100_000] {
        let text = synthetic_source(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &text, |b, text| {
            b.iter(|| chunk_lines(black_box(text), 50, 5).unwrap());
        });
    }

    group.finish();
}

fn bench_tree_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_scan");
    group.sample_size(10);

    let tmp = synthetic_tree(20, 25);
    let rules = IgnoreRules::load(tmp.path()).expect("failed to load rules");

    group.bench_function("500_files", |b| {
        b.iter(|| TreeScan::new(black_box(tmp.path()), &rules).count());
    });

    group.finish();
}

fn bench_document_id(c: &mut Criterion) {
    let hash = file_hash(synthetic_source(500).as_bytes());

    c.bench_function("document_id", |b| {
        b.iter(|| document_id(black_box("src/module/deep/file.rs"), 46, 95, &hash));
    });
}

criterion_group!(benches, bench_chunk_lines, bench_tree_scan, bench_document_id);
criterion_main!(benches);
