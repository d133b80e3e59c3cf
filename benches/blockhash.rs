//! Criterion benchmarks for the hashing stages.
//!
//! Run with: cargo bench --bench blockhash

use blockhash::reduce::block_values;
use blockhash::threshold::threshold_blocks;
use blockhash::{Blockhasher, HashBits};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgb, RgbImage};

fn test_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    })
}

fn bench_block_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_values");
    for (width, height) in [(640, 480), (1920, 1080)] {
        let image = test_image(width, height);
        group.throughput(Throughput::Elements(width as u64 * height as u64));
        group.bench_with_input(
            BenchmarkId::new("sequential", format!("{width}x{height}")),
            &image,
            |b, image| b.iter(|| block_values(black_box(image), HashBits::SIXTEEN)),
        );
        #[cfg(feature = "rayon")]
        group.bench_with_input(
            BenchmarkId::new("parallel", format!("{width}x{height}")),
            &image,
            |b, image| {
                b.iter(|| {
                    blockhash::reduce::block_values_parallel(black_box(image), HashBits::SIXTEEN)
                })
            },
        );
    }
    group.finish();
}

fn bench_threshold(c: &mut Criterion) {
    let image = test_image(640, 480);
    for bits in [HashBits::EIGHT, HashBits::SIXTEEN] {
        let blocks = block_values(&image, bits).expect("image is larger than the grid");
        c.bench_function(&format!("threshold_blocks_{bits}"), |b| {
            b.iter(|| threshold_blocks(black_box(&blocks)))
        });
    }
}

fn bench_hash(c: &mut Criterion) {
    let image = test_image(1920, 1080);
    let hasher = Blockhasher::with_bits(HashBits::SIXTEEN);
    c.bench_function("hash_pixels_1920x1080", |b| {
        b.iter(|| hasher.hash_pixels(black_box(&image)))
    });
}

criterion_group!(benches, bench_block_values, bench_threshold, bench_hash);
criterion_main!(benches);
