//! Owned contiguous RGB image buffers.

use crate::image::{Color, ColorSource, ImageView, Rgb8};
use crate::util::{AutorotError, AutorotResult};

/// Owned contiguous RGB image; the rotator's output canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    data: Vec<Rgb8>,
    width: usize,
    height: usize,
}

impl RgbImage {
    /// Wraps a row-major pixel buffer of exactly `width * height` pixels.
    pub fn new(data: Vec<Rgb8>, width: usize, height: usize) -> AutorotResult<Self> {
        let needed = width
            .checked_mul(height)
            .ok_or(AutorotError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(AutorotError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(AutorotError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image filled with a single pixel value.
    pub fn filled(width: usize, height: usize, px: Rgb8) -> AutorotResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(AutorotError::InvalidDimensions { width, height })?;
        Self::new(vec![px; len], width, height)
    }

    /// Wraps a canvas the crate filled itself; `data.len() == side * side`.
    pub(crate) fn from_square(data: Vec<Rgb8>, side: usize) -> Self {
        debug_assert_eq!(data.len(), side * side);
        Self {
            data,
            width: side,
            height: side,
        }
    }

    /// Returns an image with no pixels.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    /// Copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_, Rgb8>) -> Self {
        let mut data = Vec::with_capacity(view.width() * view.height());
        for y in 0..view.height() {
            if let Some(row) = view.row(y) {
                data.extend_from_slice(row);
            }
        }
        Self {
            data,
            width: view.width(),
            height: view.height(),
        }
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, Rgb8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true when the image holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the row-major pixel buffer.
    pub fn data(&self) -> &[Rgb8] {
        &self.data
    }

    /// Consumes the image and returns its pixel buffer.
    pub fn into_data(self) -> Vec<Rgb8> {
        self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }
}

impl ColorSource for RgbImage {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn color_at(&self, x: usize, y: usize) -> Color {
        self.pixel(x, y).map(Color::from_rgb8).unwrap_or(Color::BLACK)
    }
}
