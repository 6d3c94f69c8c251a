//! Periodic angle cost for orientation training.
//!
//! Angles are compared through `1 - cos(a - b)`, which is invariant to
//! adding multiples of 2π and has no discontinuity at the wrap-around. The
//! network output layout is selected by [`OutputEncoding`]:
//!
//! | encoding            | values per example | cost                                  |
//! |---------------------|--------------------|---------------------------------------|
//! | `RawAngle`          | 1                  | periodic cost                         |
//! | `RightAngles`       | 4 log-probs        | NLL of the nearest right angle        |
//! | `ConfidenceAngle`   | 2                  | periodic cost + error-estimate MSE    |
//!
//! Every evaluation returns per-example values and the gradient with respect
//! to each predicted value, which is all an external optimizer needs.

mod confidence;
mod decode;
mod periodic;
mod right_angles;

pub use confidence::{confidence_angle_cost, CONFIDENCE_ANGLE_WIDTH};
pub use decode::{decode, Prediction};
pub use periodic::{angle_cost, periodic_cost};
pub use right_angles::{right_angle_cost, right_angle_maxes, RIGHT_ANGLE_BUCKETS};

use crate::trace::trace_event;
use crate::util::{AutorotError, AutorotResult};
use std::fmt;
use std::str::FromStr;

/// Layout of the network's per-example outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputEncoding {
    /// One angle in radians.
    #[default]
    RawAngle,
    /// Log-probabilities over the four right-angle rotations.
    RightAngles,
    /// An angle followed by an error estimate.
    ConfidenceAngle,
}

impl OutputEncoding {
    /// All encodings, in declaration order.
    pub const ALL: [OutputEncoding; 3] = [
        OutputEncoding::RawAngle,
        OutputEncoding::RightAngles,
        OutputEncoding::ConfidenceAngle,
    ];

    /// Number of network outputs per example.
    pub const fn outputs_per_example(self) -> usize {
        match self {
            OutputEncoding::RawAngle => 1,
            OutputEncoding::RightAngles => RIGHT_ANGLE_BUCKETS,
            OutputEncoding::ConfidenceAngle => CONFIDENCE_ANGLE_WIDTH,
        }
    }

    /// Stable configuration name.
    pub const fn name(self) -> &'static str {
        match self {
            OutputEncoding::RawAngle => "raw_angle",
            OutputEncoding::RightAngles => "right_angles",
            OutputEncoding::ConfidenceAngle => "confidence_angle",
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputEncoding {
    type Err = AutorotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputEncoding::ALL
            .into_iter()
            .find(|encoding| encoding.name() == s)
            .ok_or_else(|| AutorotError::InvalidOutputEncoding { name: s.to_string() })
    }
}

/// Per-example cost values and the gradient with respect to the predictions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CostOutput {
    /// One value per example.
    pub values: Vec<f32>,
    /// One entry per predicted value, in the predicted layout.
    pub gradient: Vec<f32>,
}

impl CostOutput {
    /// Mean of the per-example values (0 for an empty batch).
    pub fn mean(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f32>() / self.values.len() as f32
    }
}

/// Predicted outputs paired with target angles, validated for an encoding.
#[derive(Clone, Copy, Debug)]
pub struct AngleBatch<'a> {
    predicted: &'a [f32],
    target: &'a [f32],
    encoding: OutputEncoding,
}

impl<'a> AngleBatch<'a> {
    /// Checks that `predicted` holds exactly one encoded row per target.
    pub fn new(
        predicted: &'a [f32],
        target: &'a [f32],
        encoding: OutputEncoding,
    ) -> AutorotResult<Self> {
        let width = encoding.outputs_per_example();
        if predicted.len() % width != 0 {
            return Err(AutorotError::InvalidBatchShape {
                len: predicted.len(),
                width,
            });
        }
        if predicted.len() / width != target.len() {
            return Err(AutorotError::BatchSizeMismatch {
                predicted: predicted.len() / width,
                target: target.len(),
            });
        }
        Ok(Self {
            predicted,
            target,
            encoding,
        })
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Returns true for an empty batch.
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Encoded outputs and target angle of example `idx`.
    pub fn row(&self, idx: usize) -> Option<(&'a [f32], f32)> {
        let width = self.encoding.outputs_per_example();
        let target = *self.target.get(idx)?;
        let start = idx.checked_mul(width)?;
        let outputs = self.predicted.get(start..start + width)?;
        Some((outputs, target))
    }
}

/// Cost function configured for one output encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AngleCost {
    encoding: OutputEncoding,
}

impl AngleCost {
    /// Creates a cost for `encoding`.
    pub fn new(encoding: OutputEncoding) -> Self {
        Self { encoding }
    }

    /// Creates a cost from a configuration name such as `"right_angles"`.
    ///
    /// Unknown names fail here, once, rather than on every batch.
    pub fn from_name(name: &str) -> AutorotResult<Self> {
        Ok(Self::new(name.parse()?))
    }

    /// Returns the configured encoding.
    pub fn encoding(&self) -> OutputEncoding {
        self.encoding
    }

    /// Evaluates the cost of `predicted` outputs against `target` angles.
    pub fn evaluate(&self, predicted: &[f32], target: &[f32]) -> AutorotResult<CostOutput> {
        let batch = AngleBatch::new(predicted, target, self.encoding)?;
        self.evaluate_batch(&batch)
    }

    /// Evaluates an already validated batch.
    pub fn evaluate_batch(&self, batch: &AngleBatch<'_>) -> AutorotResult<CostOutput> {
        if batch.encoding != self.encoding {
            return Err(AutorotError::EncodingMismatch {
                expected: self.encoding.name(),
                got: batch.encoding.name(),
            });
        }
        trace_event!(
            "angle_cost",
            encoding = self.encoding.name(),
            rows = batch.len()
        );
        match self.encoding {
            OutputEncoding::RawAngle => periodic_cost(batch.predicted, batch.target, batch.len()),
            OutputEncoding::RightAngles => right_angle_cost(batch.predicted, batch.target),
            OutputEncoding::ConfidenceAngle => confidence_angle_cost(batch.predicted, batch.target),
        }
    }

    /// Decodes network outputs into predictions for this encoding.
    pub fn decode(&self, outputs: &[f32]) -> AutorotResult<Vec<Prediction>> {
        decode(self.encoding, outputs)
    }
}
