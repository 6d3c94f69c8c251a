//! Autorot predicts and corrects the orientation of photographs.
//!
//! This crate holds the geometry and the training objective: rotating an
//! image and cropping the largest square that stays inside it (with bilinear,
//! clamp-to-edge resampling), and a periodic angle cost that treats `θ` and
//! `θ + 2π` as the same answer. The network itself is an external
//! collaborator; it only sees the tensors built by [`samples`] and the
//! values/gradients returned by [`cost`].
//!
//! Row-parallel rotation is available via the `rayon` feature, image file
//! loading via `image-io`, and spans/events via `tracing`.

mod trace;

pub mod cost;
pub mod geometry;
pub mod image;
pub mod lowlevel;
pub mod rotate;
pub mod sampler;
pub mod samples;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use cost::{AngleBatch, AngleCost, CostOutput, OutputEncoding, Prediction};
pub use geometry::max_inscribed_side;
pub use crate::image::{Color, ColorSource, ImageView, Rgb8, RgbImage};
pub use rotate::{crop_to_square, rotate, rotate_with, RotateConfig};
pub use sampler::{BilinearSampler, SamplerMode};
pub use samples::{prepare_input, random_right_angle, SampleConfig, TrainingExample};
pub use util::{wrap_angle, AutorotError, AutorotResult};
