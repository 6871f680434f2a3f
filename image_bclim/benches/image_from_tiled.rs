use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image_bclim::{image_from_bclim, Bclim, ImageFormat};

fn criterion_benchmark(c: &mut Criterion) {
    let bclim = Bclim {
        header_length: 0x28,
        width: 512,
        height: 512,
        data: vec![0u8; 512 * 512 * 4],
    };
    c.bench_function("image_from_bclim_rgba8888", |b| {
        b.iter(|| image_from_bclim(black_box(&bclim), black_box(ImageFormat::Rgba8888)))
    });

    c.bench_function("image_from_bclim_l4", |b| {
        b.iter(|| image_from_bclim(black_box(&bclim), black_box(ImageFormat::L4)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
