use autorot::{
    max_inscribed_side, rotate_with, AngleCost, OutputEncoding, RgbImage, RotateConfig,
    SamplerMode,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::f64::consts::PI;
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> RgbImage {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push([value as u8, (x & 0xFF) as u8, (y & 0xFF) as u8]);
        }
    }
    RgbImage::new(data, width, height).unwrap()
}

fn bench_rotate(c: &mut Criterion) {
    let img = make_image(900, 713);

    c.bench_function("rotate_900x713_direct", |b| {
        b.iter(|| black_box(rotate_with(&img, PI / 7.0, None, &RotateConfig::default())));
    });

    let cached = RotateConfig {
        sampler: SamplerMode::Cached,
        parallel: false,
    };
    c.bench_function("rotate_900x713_cached", |b| {
        b.iter(|| black_box(rotate_with(&img, PI / 7.0, None, &cached)));
    });

    c.bench_function("rotate_900x713_to_224", |b| {
        b.iter(|| black_box(rotate_with(&img, PI / 7.0, Some(224), &RotateConfig::default())));
    });

    #[cfg(feature = "rayon")]
    {
        let parallel = RotateConfig {
            sampler: SamplerMode::Direct,
            parallel: true,
        };
        c.bench_function("rotate_900x713_parallel", |b| {
            b.iter(|| black_box(rotate_with(&img, PI / 7.0, None, &parallel)));
        });
    }
}

fn bench_solver(c: &mut Criterion) {
    c.bench_function("max_inscribed_side_4000x3000", |b| {
        b.iter(|| black_box(max_inscribed_side(black_box(4000), black_box(3000), 0.3)));
    });
}

fn bench_cost(c: &mut Criterion) {
    let predicted: Vec<f32> = (0..1024).map(|i| i as f32 * 0.01).collect();
    let target: Vec<f32> = (0..1024).map(|i| (i as f32 * 0.37).sin() * 3.0).collect();
    let cost = AngleCost::new(OutputEncoding::RawAngle);
    c.bench_function("raw_angle_cost_1024", |b| {
        b.iter(|| black_box(cost.evaluate(&predicted, &target).unwrap()));
    });
}

criterion_group!(benches, bench_rotate, bench_solver, bench_cost);
criterion_main!(benches);
