//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Decoding is format
//! agnostic (PNG and JPEG are compiled in); everything is converted to 8-bit
//! RGB, dropping any alpha channel.

use crate::image::{Color, ColorSource, Rgb8, RgbImage};
use crate::util::{AutorotError, AutorotResult};
use std::path::Path;

/// Creates an owned image from an 8-bit RGB buffer.
pub fn owned_from_rgb_image(img: &image::RgbImage) -> AutorotResult<RgbImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data: Vec<Rgb8> = img.pixels().map(|px| px.0).collect();
    RgbImage::new(data, width, height)
}

/// Creates an owned RGB image from a dynamic image of any color type.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> AutorotResult<RgbImage> {
    owned_from_rgb_image(&img.to_rgb8())
}

/// Converts an owned image back into an `image` crate buffer.
pub fn to_rgb_image(img: &RgbImage) -> AutorotResult<image::RgbImage> {
    let width = u32::try_from(img.width()).map_err(|_| AutorotError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    let height = u32::try_from(img.height()).map_err(|_| AutorotError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    let raw: Vec<u8> = img.data().iter().flatten().copied().collect();
    image::RgbImage::from_raw(width, height, raw).ok_or(AutorotError::BufferTooSmall {
        needed: img.width() * img.height() * 3,
        got: img.data().len() * 3,
    })
}

/// Loads an image from disk and converts it to an owned RGB image.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> AutorotResult<RgbImage> {
    let img = image::open(path).map_err(|err| AutorotError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Saves an owned RGB image; the format follows the path extension.
pub fn save_rgb_image<P: AsRef<Path>>(img: &RgbImage, path: P) -> AutorotResult<()> {
    if img.is_empty() {
        return Err(AutorotError::ImageIo {
            reason: "cannot encode an empty image".to_string(),
        });
    }
    to_rgb_image(img)?
        .save(path)
        .map_err(|err| AutorotError::ImageIo {
            reason: err.to_string(),
        })
}

impl ColorSource for image::RgbImage {
    fn width(&self) -> usize {
        self.width() as usize
    }

    fn height(&self) -> usize {
        self.height() as usize
    }

    fn color_at(&self, x: usize, y: usize) -> Color {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => self
                .get_pixel_checked(x, y)
                .map(|px| Color::from_rgb8(px.0))
                .unwrap_or(Color::BLACK),
            _ => Color::BLACK,
        }
    }
}

