//! Four-way classification over right-angle rotations.
//!
//! Rows hold log-probabilities for buckets `0..4`; bucket `k` is the
//! hypothesis that the image was rotated by `k * π/2`, so undoing it takes a
//! rotation of `-k * 90°` (one of 0°, -90°, -180°, -270°).

use crate::cost::CostOutput;
use crate::util::math::{nearest_right_angle, right_angle};
use crate::util::{AutorotError, AutorotResult};

/// Number of right-angle buckets per row.
pub const RIGHT_ANGLE_BUCKETS: usize = 4;

/// Negative log-likelihood of each row's target bucket.
///
/// The target bucket is the right angle nearest the target angle on the
/// circle. The gradient is `-1` at that bucket and zero elsewhere.
pub fn right_angle_cost(log_probs: &[f32], target: &[f32]) -> AutorotResult<CostOutput> {
    let rows = split_rows(log_probs, target.len())?;
    let mut values = Vec::with_capacity(rows);
    let mut gradient = vec![0.0f32; log_probs.len()];
    for (r, (row, &angle)) in log_probs
        .chunks_exact(RIGHT_ANGLE_BUCKETS)
        .zip(target)
        .enumerate()
    {
        let bucket = nearest_right_angle(f64::from(angle));
        values.push(-row[bucket]);
        gradient[r * RIGHT_ANGLE_BUCKETS + bucket] = -1.0;
    }
    Ok(CostOutput { values, gradient })
}

/// Arg-max bucket of each row as `(angle, probability)`.
///
/// The angle is `k * π/2` for the winning bucket `k` (not wrapped) and the
/// probability is `exp` of its log-probability. Ties go to the lower bucket.
pub fn right_angle_maxes(log_probs: &[f32]) -> AutorotResult<Vec<(f32, f32)>> {
    if log_probs.len() % RIGHT_ANGLE_BUCKETS != 0 {
        return Err(AutorotError::InvalidBatchShape {
            len: log_probs.len(),
            width: RIGHT_ANGLE_BUCKETS,
        });
    }
    Ok(log_probs
        .chunks_exact(RIGHT_ANGLE_BUCKETS)
        .map(|row| {
            let mut best = 0usize;
            for (idx, &value) in row.iter().enumerate().skip(1) {
                if value > row[best] {
                    best = idx;
                }
            }
            (right_angle(best) as f32, row[best].exp())
        })
        .collect())
}

fn split_rows(log_probs: &[f32], targets: usize) -> AutorotResult<usize> {
    if log_probs.len() % RIGHT_ANGLE_BUCKETS != 0 {
        return Err(AutorotError::InvalidBatchShape {
            len: log_probs.len(),
            width: RIGHT_ANGLE_BUCKETS,
        });
    }
    let rows = log_probs.len() / RIGHT_ANGLE_BUCKETS;
    if rows != targets {
        return Err(AutorotError::BatchSizeMismatch {
            predicted: rows,
            target: targets,
        });
    }
    Ok(rows)
}
