//! Benchmarks for folder sizing and the selection walk

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fs::{self, File};
use std::io::Write;
use tempfile::TempDir;
use uninstall_targets::target::{folder_size, TargetTree, TreeOptions};

/// Create an install-like directory with the given number of files spread over subfolders
fn create_install_dir(file_count: usize, dir_count: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    let files_per_dir = file_count / dir_count.max(1);

    for d in 0..dir_count {
        let subdir = root.join(format!("component{}", d));
        fs::create_dir(&subdir).unwrap();

        for f in 0..files_per_dir {
            let mut file = File::create(subdir.join(format!("part{}.dll", f))).unwrap();
            file.write_all(&vec![b'x'; 1024]).unwrap();
        }
    }

    File::create(root.join("app.exe"))
        .unwrap()
        .write_all(b"MZ")
        .unwrap();

    dir
}

fn benchmark_folder_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("folder_size");

    for size in [100, 500, 1000].iter() {
        let dir = create_install_dir(*size, 10);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| folder_size(black_box(dir.path())))
        });
    }

    group.finish();
}

fn benchmark_populate_and_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");

    let dir = create_install_dir(1000, 20);

    group.bench_function("populate", |b| {
        b.iter(|| {
            let mut tree = TargetTree::new(TreeOptions::default());
            tree.populate(black_box(dir.path())).unwrap();
            tree
        })
    });

    // Expanded tree with one unchecked leaf per folder, so the walk descends everywhere
    let mut tree = TargetTree::new(TreeOptions::default());
    tree.populate(dir.path()).unwrap();
    tree.expand_all();
    for d in 0..20 {
        let leaf = dir.path().join(format!("component{}/part0.dll", d));
        if let Some(id) = tree.find(&leaf) {
            tree.set_checked(id, false);
        }
    }

    group.bench_function("items_to_delete", |b| {
        b.iter(|| black_box(&tree).items_to_delete())
    });

    group.finish();
}

criterion_group!(benches, benchmark_folder_size, benchmark_populate_and_walk);
criterion_main!(benches);
