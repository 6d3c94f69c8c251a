//! Training examples and inference inputs built on the rotator.
//!
//! Training images are rotated by a random multiple of 90°, drawn from a
//! caller-supplied RNG so runs are reproducible, and resampled to the
//! network's square input size. Inference inputs go through the same path at
//! angle 0, which center-crops non-square photos.

use crate::image::{ColorSource, RgbImage};
use crate::rotate::{rotate_with, RotateConfig};
use crate::sampler::SamplerMode;
use crate::util::math::{nearest_right_angle, right_angle};
use rand::Rng;

/// Number of channels in a network input tensor.
pub const INPUT_CHANNELS: usize = 3;

/// Configuration for building network inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleConfig {
    /// Side length of the square network input.
    pub image_size: usize,
    /// Sampler used by the rotator.
    pub sampler: SamplerMode,
    /// Fill rows in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            image_size: 64,
            sampler: SamplerMode::Direct,
            parallel: false,
        }
    }
}

impl SampleConfig {
    fn rotate_config(&self) -> RotateConfig {
        RotateConfig {
            sampler: self.sampler,
            parallel: self.parallel,
        }
    }

    /// Length of an input tensor for this configuration.
    pub fn input_len(&self) -> usize {
        self.image_size * self.image_size * INPUT_CHANNELS
    }
}

/// A network input and the rotation that was applied to produce it.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingExample {
    /// Row-major RGB values in `[0, 1]`, `image_size^2 * 3` long.
    pub input: Vec<f32>,
    /// Rotation applied to the source, in radians.
    pub angle: f64,
}

impl TrainingExample {
    /// Rotates `source` by `angle` and flattens it into a network input.
    pub fn generate<S>(source: &S, angle: f64, cfg: &SampleConfig) -> Self
    where
        S: ColorSource + Sync + ?Sized,
    {
        let rotated = rotate_with(source, angle, Some(cfg.image_size), &cfg.rotate_config());
        Self {
            input: input_tensor(&rotated, cfg.image_size),
            angle,
        }
    }

    /// Like [`generate`](Self::generate) with a random right angle.
    pub fn random<S, R>(source: &S, rng: &mut R, cfg: &SampleConfig) -> Self
    where
        S: ColorSource + Sync + ?Sized,
        R: Rng + ?Sized,
    {
        Self::generate(source, random_right_angle(rng), cfg)
    }

    /// Target angle in the `f32` layout the cost functions take.
    pub fn target(&self) -> f32 {
        self.angle as f32
    }

    /// Right-angle bucket nearest the applied rotation.
    pub fn right_angle_index(&self) -> usize {
        nearest_right_angle(self.angle)
    }
}

/// Uniform draw from `{0, π/2, π, 3π/2}`.
pub fn random_right_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    right_angle(rng.random_range(0..4))
}

/// Network input for inference: center-crop to a square, resample to
/// `cfg.image_size`, flatten.
pub fn prepare_input<S>(source: &S, cfg: &SampleConfig) -> Vec<f32>
where
    S: ColorSource + Sync + ?Sized,
{
    TrainingExample::generate(source, 0.0, cfg).input
}

/// Flattens a `size x size` canvas into row-major RGB floats in `[0, 1]`.
///
/// A canvas of any other shape (in practice, the empty canvas produced by
/// rotating a tiny image) yields an all-zero tensor of the expected length.
pub fn input_tensor(img: &RgbImage, size: usize) -> Vec<f32> {
    let len = size * size * INPUT_CHANNELS;
    if img.width() != size || img.height() != size {
        return vec![0.0; len];
    }
    let mut out = Vec::with_capacity(len);
    for px in img.data() {
        out.extend(px.iter().map(|&c| f32::from(c) / 255.0));
    }
    out
}
