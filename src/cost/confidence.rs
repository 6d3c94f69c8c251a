//! Angle plus self-reported error estimate.
//!
//! Rows are `[angle, error_estimate]`. The angle is trained with the periodic
//! cost; the second channel regresses that cost rescaled into `[0, 1]`, so it
//! learns how wrong its own angle tends to be.

use crate::cost::CostOutput;
use crate::util::{AutorotError, AutorotResult};

/// Values per row: angle and error estimate.
pub const CONFIDENCE_ANGLE_WIDTH: usize = 2;

/// Periodic angle cost plus squared error of the estimate channel.
///
/// The regression target `clamp(angle_cost / 2, 0, 1)` is treated as a
/// constant: no gradient flows from it into the angle channel.
pub fn confidence_angle_cost(predicted: &[f32], target: &[f32]) -> AutorotResult<CostOutput> {
    if predicted.len() % CONFIDENCE_ANGLE_WIDTH != 0 {
        return Err(AutorotError::InvalidBatchShape {
            len: predicted.len(),
            width: CONFIDENCE_ANGLE_WIDTH,
        });
    }
    let rows = predicted.len() / CONFIDENCE_ANGLE_WIDTH;
    if rows != target.len() {
        return Err(AutorotError::BatchSizeMismatch {
            predicted: rows,
            target: target.len(),
        });
    }

    let mut values = Vec::with_capacity(rows);
    let mut gradient = Vec::with_capacity(predicted.len());
    for (row, &t) in predicted.chunks_exact(CONFIDENCE_ANGLE_WIDTH).zip(target) {
        let (sin_p, cos_p) = row[0].sin_cos();
        let (sin_t, cos_t) = t.sin_cos();
        let angle_cost = 1.0 - (sin_p * sin_t + cos_p * cos_t);
        let expected = (angle_cost / 2.0).clamp(0.0, 1.0);
        let diff = row[1] - expected;
        values.push(angle_cost + diff * diff);
        gradient.push(sin_p * cos_t - cos_p * sin_t);
        gradient.push(2.0 * diff);
    }
    Ok(CostOutput { values, gradient })
}

#[cfg(test)]
mod tests {
    use super::confidence_angle_cost;
    use crate::cost::angle_cost;

    #[test]
    fn perfect_estimate_adds_nothing() {
        let c = angle_cost(1.0, 2.5);
        let out = confidence_angle_cost(&[1.0, c / 2.0], &[2.5]).unwrap();
        assert!((out.values[0] - c).abs() < 1e-6);
        assert!(out.gradient[1].abs() < 1e-6);
    }

    #[test]
    fn overconfident_estimate_is_penalized() {
        // Opposite angles: cost 2, expected estimate 1.
        let out = confidence_angle_cost(&[0.0, 0.0], &[std::f32::consts::PI]).unwrap();
        assert!((out.values[0] - 3.0).abs() < 1e-5);
        assert!((out.gradient[1] + 2.0).abs() < 1e-5);
    }
}
