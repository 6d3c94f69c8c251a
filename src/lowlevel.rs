//! Low-level building blocks behind `rotate` and `AngleCost`.
//!
//! These expose the solver's linear map, the raw cost kernels and the
//! tensor helpers for callers assembling their own pipelines. Most users
//! should prefer the top-level `rotate`, `AngleCost` and `TrainingExample`.

pub use crate::cost::{
    angle_cost, confidence_angle_cost, decode, periodic_cost, right_angle_cost,
    right_angle_maxes, CONFIDENCE_ANGLE_WIDTH, RIGHT_ANGLE_BUCKETS,
};
pub use crate::geometry::AffineBasis;
pub use crate::samples::{input_tensor, INPUT_CHANNELS};
