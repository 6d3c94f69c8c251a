//! Angle helpers shared by the rotator, the cost and prediction decoding.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Wraps an angle in radians to the range (-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    let mut wrapped = angle % TAU;
    if wrapped <= -PI {
        wrapped += TAU;
    }
    if wrapped > PI {
        wrapped -= TAU;
    }
    wrapped
}

/// Index of the multiple of π/2 nearest to `angle`, in `0..4`.
///
/// Distance is measured on the circle, so `2π - ε` maps to bucket 0.
pub(crate) fn nearest_right_angle(angle: f64) -> usize {
    if !angle.is_finite() {
        return 0;
    }
    let turns = (angle.rem_euclid(TAU) / FRAC_PI_2).round() as usize;
    turns % 4
}

/// Angle in radians of right-angle bucket `idx`.
pub(crate) fn right_angle(idx: usize) -> f64 {
    (idx % 4) as f64 * FRAC_PI_2
}
