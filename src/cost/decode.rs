//! Turning raw network outputs into orientation predictions.

use crate::cost::confidence::CONFIDENCE_ANGLE_WIDTH;
use crate::cost::right_angles::right_angle_maxes;
use crate::cost::OutputEncoding;
use crate::util::{wrap_angle, AutorotError, AutorotResult};

/// Predicted rotation of one image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    /// Rotation the image appears to have, in radians, within (-π, π].
    pub angle: f32,
    /// Confidence in `[0, 1]`; `None` for encodings without one.
    pub confidence: Option<f32>,
}

impl Prediction {
    /// Rotation in radians that undoes the prediction, within (-π, π].
    pub fn correction(&self) -> f32 {
        wrap_angle(-f64::from(self.angle)) as f32
    }

    /// Predicted angle in degrees.
    pub fn degrees(&self) -> f32 {
        self.angle.to_degrees()
    }
}

/// Decodes a batch of network outputs laid out for `encoding`.
///
/// - raw angle: the value itself;
/// - right angles: the arg-max bucket, confidence is its probability;
/// - confidence + angle: the angle channel, confidence is one minus the
///   clamped error estimate.
pub fn decode(encoding: OutputEncoding, outputs: &[f32]) -> AutorotResult<Vec<Prediction>> {
    let wrap = |angle: f32| wrap_angle(f64::from(angle)) as f32;
    match encoding {
        OutputEncoding::RawAngle => Ok(outputs
            .iter()
            .map(|&angle| Prediction {
                angle: wrap(angle),
                confidence: None,
            })
            .collect()),
        OutputEncoding::RightAngles => Ok(right_angle_maxes(outputs)?
            .into_iter()
            .map(|(angle, prob)| Prediction {
                angle: wrap(angle),
                confidence: Some(prob),
            })
            .collect()),
        OutputEncoding::ConfidenceAngle => {
            if outputs.len() % CONFIDENCE_ANGLE_WIDTH != 0 {
                return Err(AutorotError::InvalidBatchShape {
                    len: outputs.len(),
                    width: CONFIDENCE_ANGLE_WIDTH,
                });
            }
            Ok(outputs
                .chunks_exact(CONFIDENCE_ANGLE_WIDTH)
                .map(|row| Prediction {
                    angle: wrap(row[0]),
                    confidence: Some(1.0 - row[1].clamp(0.0, 1.0)),
                })
                .collect())
        }
    }
}
