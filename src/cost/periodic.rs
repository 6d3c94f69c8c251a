//! Cosine distance between angles.

use crate::cost::CostOutput;
use crate::util::{AutorotError, AutorotResult};

/// `1 - cos(a - b)`, written as `1 - (sin a sin b + cos a cos b)`.
///
/// Zero when `a ≡ b (mod 2π)`, 2 when the angles are opposite, smooth and
/// symmetric everywhere.
#[inline]
pub fn angle_cost(a: f32, b: f32) -> f32 {
    let (sin_a, cos_a) = a.sin_cos();
    let (sin_b, cos_b) = b.sin_cos();
    1.0 - (sin_a * sin_b + cos_a * cos_b)
}

/// Per-row periodic cost over a `rows x cols` block of predicted angles.
///
/// `target` pairs with `predicted` in one of two ways:
/// - same length: element-wise, entry `i` against entry `i`;
/// - `rows` long: broadcast, target `r` against every column of row `r` only.
///
/// Each row's value is the sum of its columns' costs. The gradient has one
/// entry per predicted value, `d/dp = sin(p - t)`.
pub fn periodic_cost(predicted: &[f32], target: &[f32], rows: usize) -> AutorotResult<CostOutput> {
    let len = predicted.len();
    if rows == 0 || len % rows != 0 {
        if rows == 0 && len == 0 && target.is_empty() {
            return Ok(CostOutput::default());
        }
        return Err(AutorotError::BatchSizeMismatch {
            predicted: len,
            target: rows,
        });
    }
    let cols = len / rows;
    let broadcast = if target.len() == len {
        false
    } else if target.len() == rows {
        true
    } else {
        return Err(AutorotError::BatchSizeMismatch {
            predicted: len,
            target: target.len(),
        });
    };

    // Every consumer of a target entry reuses its sin/cos.
    let target_trig: Vec<(f32, f32)> = target.iter().map(|t| t.sin_cos()).collect();

    let mut values = Vec::with_capacity(rows);
    let mut gradient = Vec::with_capacity(len);
    for (r, row) in predicted.chunks_exact(cols).enumerate() {
        let mut sum = 0.0f32;
        for (c, &p) in row.iter().enumerate() {
            let (sin_t, cos_t) = if broadcast {
                target_trig[r]
            } else {
                target_trig[r * cols + c]
            };
            let (sin_p, cos_p) = p.sin_cos();
            sum += 1.0 - (sin_p * sin_t + cos_p * cos_t);
            gradient.push(sin_p * cos_t - cos_p * sin_t);
        }
        values.push(sum);
    }
    Ok(CostOutput { values, gradient })
}
