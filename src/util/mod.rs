//! Shared utility helpers.

pub mod error;
pub(crate) mod math;

pub use error::{AutorotError, AutorotResult};
pub use math::wrap_angle;
