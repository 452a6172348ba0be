use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qr_icon::PixelBuffer;
use qr_icon::utils::grayscale::{buffer_to_grayscale, rgb_to_grayscale};

fn bench_rgb_to_grayscale_small(c: &mut Criterion) {
    let image = vec![128u8; 200 * 200 * 3];
    c.bench_function("rgb_to_grayscale_200x200", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&image), black_box(200), black_box(200)))
    });
}

fn bench_rgb_to_grayscale_large(c: &mut Criterion) {
    let image = vec![128u8; 1920 * 1080 * 3];
    c.bench_function("rgb_to_grayscale_1920x1080", |b| {
        b.iter(|| rgb_to_grayscale(black_box(&image), black_box(1920), black_box(1080)))
    });
}

fn bench_buffer_to_grayscale(c: &mut Criterion) {
    let buffer = PixelBuffer::new(200, 200, 0x808080);
    c.bench_function("buffer_to_grayscale_200x200", |b| {
        b.iter(|| buffer_to_grayscale(black_box(&buffer)))
    });
}

criterion_group!(
    benches,
    bench_rgb_to_grayscale_small,
    bench_rgb_to_grayscale_large,
    bench_buffer_to_grayscale
);
criterion_main!(benches);
