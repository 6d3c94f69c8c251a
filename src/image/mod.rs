//! Image views, owned RGB buffers and the color access trait.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. Unlike most image
//! containers, a view may be empty (zero width or height): rotating a tiny
//! image can legitimately produce an empty canvas and downstream code should
//! see a valid, empty image rather than an error.

use crate::util::{AutorotError, AutorotResult};

mod color;
#[cfg(feature = "image-io")]
pub mod io;
mod owned;

pub use color::{Color, ColorSource, Rgb8};
pub use owned::RgbImage;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> AutorotResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> AutorotResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(AutorotError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns true when the view holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if self.width == 0 || y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }
}

impl ColorSource for ImageView<'_, Rgb8> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn color_at(&self, x: usize, y: usize) -> Color {
        self.get(x, y)
            .map(|&px| Color::from_rgb8(px))
            .unwrap_or(Color::BLACK)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> AutorotResult<usize> {
    if stride < width {
        return Err(AutorotError::InvalidStride { width, stride });
    }
    if width == 0 || height == 0 {
        return Ok(0);
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(AutorotError::InvalidDimensions { width, height })
}
