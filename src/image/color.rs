//! Normalized RGB colors and the point-query trait used by the sampler.

/// Packed 8-bit RGB pixel as stored in image buffers.
pub type Rgb8 = [u8; 3];

/// RGB color with channels normalized to `[0, 1]`.
///
/// Sources are converted once on read and all interpolation is done in this
/// space; `to_rgb8` is the single point where values are quantized again.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color(pub [f32; 3]);

impl Color {
    pub const BLACK: Color = Color([0.0; 3]);

    /// Converts an 8-bit pixel into normalized channels.
    #[inline]
    pub fn from_rgb8(px: Rgb8) -> Self {
        Color([
            f32::from(px[0]) / 255.0,
            f32::from(px[1]) / 255.0,
            f32::from(px[2]) / 255.0,
        ])
    }

    /// Quantizes back to 8 bits, rounding to nearest and clamping.
    #[inline]
    pub fn to_rgb8(self) -> Rgb8 {
        let q = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        [q(self.0[0]), q(self.0[1]), q(self.0[2])]
    }

    /// Returns `self * weight + other`, channel-wise.
    #[inline]
    pub(crate) fn mul_add(self, weight: f32, other: Color) -> Color {
        Color([
            self.0[0].mul_add(weight, other.0[0]),
            self.0[1].mul_add(weight, other.0[1]),
            self.0[2].mul_add(weight, other.0[2]),
        ])
    }
}

/// Read-only image that answers point queries at integer coordinates.
///
/// Implementations return the color at `(x, y)` for in-bounds coordinates.
/// Callers in this crate never query out-of-bounds pixels; implementations
/// may return black if they are asked to.
pub trait ColorSource {
    /// Width in pixels.
    fn width(&self) -> usize;
    /// Height in pixels.
    fn height(&self) -> usize;
    /// Normalized color at integer coordinate `(x, y)`.
    fn color_at(&self, x: usize, y: usize) -> Color;

    /// Returns true when the source holds no pixels.
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl<S: ColorSource + ?Sized> ColorSource for &S {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn color_at(&self, x: usize, y: usize) -> Color {
        (**self).color_at(x, y)
    }
}
