//! Detection loading benchmarks using Criterion.
//!
//! Run with: cargo bench

use std::fmt::Write as _;
use std::io::Write as _;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use motstore::DetectionStore;
use tempfile::NamedTempFile;

/// Write a synthetic detection file: `frames` frames with `per_frame`
/// boxes each, in MOT text form.
fn create_detection_file(frames: usize, per_frame: usize) -> NamedTempFile {
    let mut contents = String::new();
    for frame in 1..=frames {
        for i in 0..per_frame {
            let x = (i * 37 % 1800) as f64;
            let y = (i * 53 % 900) as f64;
            writeln!(
                contents,
                "{},-1,{:.1},{:.1},64.0,128.0,0.{:02}",
                frame,
                x,
                y,
                (i * 7) % 100
            )
            .expect("formatting detection line");
        }
    }

    let mut file = NamedTempFile::new().expect("temp detection file");
    file.write_all(contents.as_bytes())
        .expect("writing detection file");
    file.flush().expect("flushing detection file");
    file
}

fn benchmark_load_1000_frames(c: &mut Criterion) {
    let file = create_detection_file(1000, 20);

    c.bench_function("load_1000_frames_20_boxes", |b| {
        b.iter(|| DetectionStore::from_path(black_box(file.path())).expect("valid store"))
    });
}

fn benchmark_get_single_frame(c: &mut Criterion) {
    let file = create_detection_file(1000, 20);
    let store = DetectionStore::from_path(file.path()).expect("valid store");

    c.bench_function("get_single_frame", |b| {
        b.iter(|| store.get(black_box(500)))
    });
}

fn benchmark_iterate_all_frames(c: &mut Criterion) {
    let file = create_detection_file(1000, 20);
    let store = DetectionStore::from_path(file.path()).expect("valid store");

    c.bench_function("iterate_all_frames", |b| {
        b.iter(|| {
            let total: usize = store.frames().map(|(_, boxes)| boxes.nrows()).sum();
            black_box(total)
        })
    });
}

criterion_group!(
    benches,
    benchmark_load_1000_frames,
    benchmark_get_single_frame,
    benchmark_iterate_all_frames,
);
criterion_main!(benches);
