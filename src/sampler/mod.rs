//! Bilinear point sampling with clamp-to-edge boundaries.
//!
//! `BilinearSampler` evaluates a source image at continuous coordinates. The
//! four integer neighbours `(floor(x) + {0, 1}, floor(y) + {0, 1})` are clamped
//! independently into the image, so any query outside the source resolves to
//! the nearest edge pixel. Integer pixel `(i, j)` sits at coordinate
//! `(i, j)`; there is no half-pixel offset.
//!
//! In `SamplerMode::Cached` the sampler memoizes the normalized color of every
//! source pixel it touches. The memo table covers a region of the source (the
//! whole image by default) and allocates its rows on first use, so a small
//! canvas drawn from a large photo only pays for the rows it reads. Under small rotations neighbouring output pixels
//! hit the same source pixels repeatedly, which pays off when `color_at` is
//! expensive (e.g. a color-space conversion). The cache belongs to exactly one
//! sampler, and a sampler borrows exactly one source.

mod cache;

use crate::image::{Color, ColorSource};
use cache::ColorCache;
use std::ops::Range;

/// Selects whether a sampler memoizes source colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SamplerMode {
    /// Query the source for every neighbour lookup.
    #[default]
    Direct,
    /// Memoize converted colors per integer coordinate.
    ///
    /// Rows of the memo table are allocated on first use.
    Cached,
}

/// Bilinear sampler over a borrowed color source.
pub struct BilinearSampler<'s, S: ?Sized> {
    source: &'s S,
    width: usize,
    height: usize,
    cache: Option<ColorCache>,
}

impl<'s, S: ColorSource + ?Sized> BilinearSampler<'s, S> {
    /// Creates a sampler; `Cached` mode gets a fresh cache covering `source`.
    pub fn new(source: &'s S, mode: SamplerMode) -> Self {
        let width = source.width();
        let height = source.height();
        Self::with_region(source, mode, 0..width, 0..height)
    }

    /// Creates a sampler whose cache only covers pixels in `x` by `y`.
    ///
    /// The ranges are clipped to the source. Samples that read pixels outside
    /// the region are still exact; they just skip the cache.
    pub fn with_region(
        source: &'s S,
        mode: SamplerMode,
        x: Range<usize>,
        y: Range<usize>,
    ) -> Self {
        let width = source.width();
        let height = source.height();
        let cache = match mode {
            SamplerMode::Direct => None,
            SamplerMode::Cached => Some(ColorCache::new(
                x.start.min(width)..x.end.min(width),
                y.start.min(height)..y.end.min(height),
            )),
        };
        Self {
            source,
            width,
            height,
            cache,
        }
    }

    /// Returns the sampling mode in use.
    pub fn mode(&self) -> SamplerMode {
        if self.cache.is_some() {
            SamplerMode::Cached
        } else {
            SamplerMode::Direct
        }
    }

    /// Number of cache slots populated so far (0 in `Direct` mode).
    pub fn cached_pixels(&self) -> usize {
        self.cache.as_ref().map_or(0, ColorCache::populated)
    }

    /// Number of cache slots allocated so far (0 in `Direct` mode).
    pub fn cache_slots(&self) -> usize {
        self.cache.as_ref().map_or(0, ColorCache::allocated)
    }

    /// Samples the source at a continuous coordinate.
    ///
    /// Returns black for an empty source. NaN coordinates are treated as 0.
    pub fn sample(&self, x: f64, y: f64) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::BLACK;
        }
        // Pre-clamping to [-1, size] leaves the clamped neighbours unchanged
        // and keeps the integer conversions below in range.
        let x = sanitize(x, self.width);
        let y = sanitize(y, self.height);

        let x1f = x.floor();
        let y1f = y.floor();
        let wx1 = (x1f + 1.0 - x) as f32;
        let wy1 = (y1f + 1.0 - y) as f32;
        let wx2 = 1.0 - wx1;
        let wy2 = 1.0 - wy1;

        let x1 = clamp_index(x1f, self.width);
        let x2 = clamp_index(x1f + 1.0, self.width);
        let y1 = clamp_index(y1f, self.height);
        let y2 = clamp_index(y1f + 1.0, self.height);

        let c11 = self.lookup(x1, y1);
        let c21 = self.lookup(x2, y1);
        let c12 = self.lookup(x1, y2);
        let c22 = self.lookup(x2, y2);

        let acc = c11.mul_add(wx1 * wy1, Color::BLACK);
        let acc = c21.mul_add(wx2 * wy1, acc);
        let acc = c12.mul_add(wx1 * wy2, acc);
        c22.mul_add(wx2 * wy2, acc)
    }

    #[inline]
    fn lookup(&self, x: usize, y: usize) -> Color {
        match &self.cache {
            Some(cache) => cache.get_or_load(x, y, || self.source.color_at(x, y)),
            None => self.source.color_at(x, y),
        }
    }
}

#[inline]
fn sanitize(v: f64, size: usize) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-1.0, size as f64)
    }
}

#[inline]
fn clamp_index(v: f64, size: usize) -> usize {
    if v <= 0.0 {
        0
    } else {
        (v as usize).min(size - 1)
    }
}
