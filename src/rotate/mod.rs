//! Rotate-and-crop into a square canvas.
//!
//! The output is the largest centered square that remains inside the rotated
//! source (see [`max_inscribed_side`]), optionally resampled to a requested
//! size. For an output pixel `(x, y)` in `[0, out)^2`, with `side` the
//! inscribed side and `scale = side / out`:
//!
//! ```text
//! x_off = scale * x - side / 2
//! y_off = scale * y - side / 2
//! src_x = cos(angle) * x_off - sin(angle) * y_off + width / 2
//! src_y = sin(angle) * x_off + cos(angle) * y_off + height / 2
//! ```
//!
//! and the pixel takes the bilinear sample at `(src_x, src_y)`. At angle 0
//! this is a plain center crop to a square.

use crate::geometry::max_inscribed_side;
use crate::image::{ColorSource, Rgb8, RgbImage};
use crate::sampler::{BilinearSampler, SamplerMode};
use crate::trace::{trace_event, trace_span};
use std::ops::Range;

/// Configuration for a rotate call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RotateConfig {
    /// Whether the sampler memoizes source colors.
    pub sampler: SamplerMode,
    /// Fill output rows in parallel (requires the `rayon` feature; ignored
    /// otherwise). Output is identical to the sequential path.
    pub parallel: bool,
}

/// Rotates `source` by `angle` radians and crops the inscribed square.
///
/// With `out_size == None` the canvas side is the inscribed side; otherwise
/// the inscribed square is resampled onto an `out_size x out_size` canvas.
/// Empty sources and zero-sized canvases produce an empty image.
pub fn rotate<S>(source: &S, angle: f64, out_size: Option<usize>) -> RgbImage
where
    S: ColorSource + Sync + ?Sized,
{
    rotate_with(source, angle, out_size, &RotateConfig::default())
}

/// Center-crops `source` to its largest square (a rotation by 0).
pub fn crop_to_square<S>(source: &S) -> RgbImage
where
    S: ColorSource + Sync + ?Sized,
{
    rotate(source, 0.0, None)
}

/// [`rotate`] with an explicit configuration.
///
/// Each call builds its own sampler (and cache, in `Cached` mode); nothing is
/// shared between calls.
pub fn rotate_with<S>(
    source: &S,
    angle: f64,
    out_size: Option<usize>,
    cfg: &RotateConfig,
) -> RgbImage
where
    S: ColorSource + Sync + ?Sized,
{
    let _span = trace_span!("rotate", angle = angle).entered();
    let width = source.width();
    let height = source.height();
    if width == 0 || height == 0 {
        trace_event!("rotate_empty_source");
        return RgbImage::empty();
    }

    let side = max_inscribed_side(width, height, angle);
    let out = out_size.unwrap_or(side);
    trace_event!("rotate_canvas", side = side, out = out);
    if out == 0 {
        return RgbImage::empty();
    }

    let mapping = CanvasMapping::new(width, height, angle, side, out);
    let (region_x, region_y) = mapping.source_region(out);
    let sampler = BilinearSampler::with_region(source, cfg.sampler, region_x, region_y);
    let mut data = vec![[0u8; 3]; out * out];

    #[cfg(feature = "rayon")]
    {
        if cfg.parallel {
            use rayon::prelude::*;
            data.par_chunks_mut(out)
                .enumerate()
                .for_each(|(y, row)| fill_row(row, y, &mapping, &sampler));
            return RgbImage::from_square(data, out);
        }
    }

    for (y, row) in data.chunks_mut(out).enumerate() {
        fill_row(row, y, &mapping, &sampler);
    }
    RgbImage::from_square(data, out)
}

fn fill_row<S>(
    row: &mut [Rgb8],
    y: usize,
    mapping: &CanvasMapping,
    sampler: &BilinearSampler<'_, S>,
) where
    S: ColorSource + ?Sized,
{
    for (x, px) in row.iter_mut().enumerate() {
        let (src_x, src_y) = mapping.source_point(x, y);
        *px = sampler.sample(src_x, src_y).to_rgb8();
    }
}

/// Output-pixel to source-coordinate transform for one rotate call.
struct CanvasMapping {
    sin: f64,
    cos: f64,
    scale: f64,
    half_side: f64,
    center_x: f64,
    center_y: f64,
}

impl CanvasMapping {
    fn new(width: usize, height: usize, angle: f64, side: usize, out: usize) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            sin,
            cos,
            scale: side as f64 / out as f64,
            half_side: side as f64 / 2.0,
            center_x: width as f64 / 2.0,
            center_y: height as f64 / 2.0,
        }
    }

    #[inline]
    fn source_point(&self, x: usize, y: usize) -> (f64, f64) {
        let x_off = self.scale * x as f64 - self.half_side;
        let y_off = self.scale * y as f64 - self.half_side;
        (
            self.cos * x_off - self.sin * y_off + self.center_x,
            self.sin * x_off + self.cos * y_off + self.center_y,
        )
    }

    /// Source pixels the bilinear taps of an `out x out` canvas can read.
    fn source_region(&self, out: usize) -> (Range<usize>, Range<usize>) {
        let last = out.saturating_sub(1);
        let corners =
            [(0, 0), (last, 0), (0, last), (last, last)].map(|(x, y)| self.source_point(x, y));
        let span = |coords: [f64; 4]| {
            let lo = coords.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = coords.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let start = lo.floor().max(0.0) as usize;
            let end = (hi.floor() + 2.0).max(0.0) as usize;
            start..end.max(start)
        };
        (
            span(corners.map(|(x, _)| x)),
            span(corners.map(|(_, y)| y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{crop_to_square, fill_row, rotate, rotate_with, CanvasMapping, RotateConfig};
    use crate::geometry::max_inscribed_side;
    use crate::image::RgbImage;
    use crate::sampler::{BilinearSampler, SamplerMode};
    use std::f64::consts::FRAC_PI_4;

    fn pattern(width: usize, height: usize) -> RgbImage {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let v = ((x * 37) ^ (y * 11) ^ (x * y)) & 0xFF;
                data.push([v as u8, (x * 3) as u8, (y * 5) as u8]);
            }
        }
        RgbImage::new(data, width, height).unwrap()
    }

    #[test]
    fn zero_angle_center_crops() {
        let img = pattern(6, 4);
        let cropped = crop_to_square(&img);
        assert_eq!((cropped.width(), cropped.height()), (4, 4));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(cropped.pixel(x, y), img.pixel(x + 1, y));
            }
        }
    }

    #[test]
    fn square_source_at_zero_is_identity() {
        let img = pattern(9, 9);
        assert_eq!(rotate(&img, 0.0, None), img);
    }

    #[test]
    fn out_size_subsamples_the_inscribed_square() {
        let img = pattern(100, 100);
        let small = rotate(&img, 0.0, Some(10));
        assert_eq!((small.width(), small.height()), (10, 10));
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(small.pixel(x, y), img.pixel(x * 10, y * 10));
            }
        }
    }

    #[test]
    fn white_image_stays_white_at_forty_five_degrees() {
        let img = RgbImage::filled(100, 100, [255; 3]).unwrap();
        let rotated = rotate(&img, FRAC_PI_4, None);
        assert_eq!(rotated.width(), 70);
        assert_eq!(rotated.height(), 70);
        assert!(rotated.data().iter().all(|&px| px == [255; 3]));
    }

    #[test]
    fn cached_sampler_produces_identical_output() {
        let img = pattern(41, 29);
        let direct = rotate_with(&img, 0.37, Some(24), &RotateConfig::default());
        let cached = rotate_with(
            &img,
            0.37,
            Some(24),
            &RotateConfig {
                sampler: SamplerMode::Cached,
                ..RotateConfig::default()
            },
        );
        assert_eq!(direct, cached);
    }

    #[test]
    fn small_canvas_caches_only_the_rows_it_reads() {
        let (width, height, angle, out) = (1200, 900, 0.1, 8);
        let img = pattern(width, height);
        let side = max_inscribed_side(width, height, angle);
        let mapping = CanvasMapping::new(width, height, angle, side, out);
        let (region_x, region_y) = mapping.source_region(out);
        assert!(region_x.len() < width && region_y.len() < height);

        let sampler =
            BilinearSampler::with_region(&img, SamplerMode::Cached, region_x.clone(), region_y);
        let mut data = vec![[0u8; 3]; out * out];
        for (y, row) in data.chunks_mut(out).enumerate() {
            fill_row(row, y, &mapping, &sampler);
        }
        assert_eq!(data, rotate(&img, angle, Some(out)).into_data());

        assert!(sampler.cached_pixels() <= 4 * out * out);
        assert!(sampler.cache_slots() <= 2 * out * out * region_x.len());
        assert!(sampler.cache_slots() * 4 < width * height);
    }

    #[test]
    fn degenerate_inputs_produce_empty_or_flat_canvases() {
        let empty = RgbImage::new(Vec::new(), 0, 5).unwrap();
        assert!(rotate(&empty, 0.3, Some(8)).is_empty());

        let img = pattern(12, 12);
        assert!(rotate(&img, 0.3, Some(0)).is_empty());

        let dot = RgbImage::filled(1, 1, [9, 8, 7]).unwrap();
        assert!(rotate(&dot, 0.4, None).is_empty());
        let flat = rotate(&dot, 0.4, Some(3));
        assert_eq!((flat.width(), flat.height()), (3, 3));
        assert!(flat.data().iter().all(|&px| px == [9, 8, 7]));
    }
}
