//! Performance measurement for the complete tile swap pipeline

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};
use std::hint::black_box;
use tileswap::algorithm::executor::{SwapConfig, swap_tiles};
use tileswap::analysis::colorspace::ColorSpace;
use tileswap::spatial::mask::TileShape;

fn synthetic_image(width: u32, height: u32, phase: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            ((x + phase) * 7 % 256) as u8,
            ((y + phase) * 13 % 256) as u8,
            ((x + y) * 3 % 256) as u8,
            255,
        ])
    })
}

/// Measures the full partition/feature/match/composite pipeline at growing
/// grid sizes on a fixed 256x256 image pair
fn bench_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_swap");
    group.sample_size(10);

    let image_a = synthetic_image(256, 256, 0);
    let image_b = synthetic_image(256, 256, 101);

    for grid_side in &[4u32, 8, 16] {
        let config = SwapConfig {
            x_tile_count: *grid_side,
            y_tile_count: *grid_side,
            resize_to_fit_grid: false,
            match_input_dimensions: false,
            tile_shape: TileShape::Rectangle,
            color_space: ColorSpace::Lab,
        };

        group.bench_with_input(BenchmarkId::from_parameter(grid_side), grid_side, |b, _| {
            b.iter(|| {
                let outcome = swap_tiles(
                    black_box(image_a.clone()),
                    black_box(image_b.clone()),
                    &config,
                );
                black_box(outcome)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_swap);
criterion_main!(benches);
