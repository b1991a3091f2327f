use confstate::state::StateTracker;
use confstate::state::format::parse_line;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::fs;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn create_test_files(dir: &Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("file_{i}.conf"));
            fs::write(&path, format!("setting = {i}")).unwrap();
            path
        })
        .collect()
}

fn benchmark_parse_line(c: &mut Criterion) {
    let line = b"1700000000:/usr/lib/modules/6.1.0-13-amd64/kernel/drivers/gpu";
    c.bench_function("parse_line", |b| b.iter(|| parse_line(1, black_box(line))));
}

fn benchmark_write_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_file");

    for count in &[100, 1000] {
        let dir = tempdir().unwrap();
        let files = create_test_files(dir.path(), *count);
        let state_file = dir.path().join("state/status");

        let mut tracker = StateTracker::new(&state_file);
        for path in &files {
            tracker.record_path(path).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("write", count), &tracker, |b, tracker| {
            b.iter(|| tracker.write().unwrap());
        });

        tracker.write().unwrap();
        group.bench_with_input(BenchmarkId::new("load", count), &state_file, |b, state_file| {
            b.iter(|| {
                let mut fresh = StateTracker::new(state_file);
                fresh.load().unwrap();
                black_box(fresh.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("needs_update", count), &files, |b, files| {
            b.iter(|| files.iter().filter(|p| tracker.needs_update(p, false)).count());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse_line, benchmark_write_load);
criterion_main!(benches);
