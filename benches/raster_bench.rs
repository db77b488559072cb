use criterion::{criterion_group, criterion_main, Criterion};
use pixel_pantry::editor::{Color, Editor, MAX_SIZE};

// Rasterization benchmarks. Run with:
//    cargo bench --bench raster_bench

/// A full 64x64 canvas with a checkerboard, the worst case for block fills
fn checkerboard() -> Editor {
    let mut e = Editor::new(MAX_SIZE, MAX_SIZE);
    e.set_color(Color::rgb(20, 120, 220));
    for y in 0..MAX_SIZE {
        for x in (y % 2..MAX_SIZE).step_by(2) {
            e.paint(x, y);
        }
    }
    e
}

fn bench_rasterize(c: &mut Criterion) {
    let editor = checkerboard();

    c.bench_function("rasterize_64x64_scale16", |b| {
        b.iter(|| editor.rasterize(16).unwrap());
    });

    c.bench_function("data_url_64x64_scale16", |b| {
        let raster = editor.rasterize(16).unwrap();
        b.iter(|| raster.to_data_url());
    });
}

fn bench_empty(c: &mut Criterion) {
    let editor = Editor::new(16, 16);
    c.bench_function("rasterize_empty_16x16", |b| {
        b.iter(|| editor.rasterize(16).unwrap());
    });
}

criterion_group!(benches, bench_rasterize, bench_empty);
criterion_main!(benches);
