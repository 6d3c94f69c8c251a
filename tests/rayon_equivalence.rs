#![cfg(feature = "rayon")]

use autorot::{rotate_with, RgbImage, RotateConfig, SamplerMode};

fn make_image(width: usize, height: usize) -> RgbImage {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 11) ^ (y * 3) ^ (x * y)) & 0xFF;
            data.push([value as u8, (x & 0xFF) as u8, (y & 0xFF) as u8]);
        }
    }
    RgbImage::new(data, width, height).unwrap()
}

#[test]
fn parallel_matches_sequential() {
    let img = make_image(180, 140);
    for sampler in [SamplerMode::Direct, SamplerMode::Cached] {
        for (angle, out_size) in [(0.0, None), (0.52, None), (2.1, Some(64)), (-1.0, Some(97))] {
            let seq = rotate_with(
                &img,
                angle,
                out_size,
                &RotateConfig {
                    sampler,
                    parallel: false,
                },
            );
            let par = rotate_with(
                &img,
                angle,
                out_size,
                &RotateConfig {
                    sampler,
                    parallel: true,
                },
            );
            assert_eq!(seq, par, "{sampler:?} angle {angle}");
        }
    }
}
