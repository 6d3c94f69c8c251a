//! Largest centered square that survives a rotation.
//!
//! Rotating an image about its center and cropping an axis-aligned square
//! from the result only keeps valid pixels if every corner of the square maps
//! back inside the source rectangle. [`max_inscribed_side`] finds the largest
//! integer side length for which that holds.

mod basis;

pub use basis::AffineBasis;

use crate::trace::trace_debug;

/// Largest integer side of a centered square that stays inside a
/// `width x height` image rotated by `angle` radians.
///
/// Candidate sides are scanned upwards from 0 and the scan stops at the first
/// side that does not fit; fitting is monotone in the side length. No square
/// wider than `min(width, height)` fits at any angle, which bounds the scan.
/// Zero-sized sources and non-finite angles yield 0.
pub fn max_inscribed_side(width: usize, height: usize, angle: f64) -> usize {
    let limit = width.min(height);
    if limit == 0 {
        return 0;
    }
    let basis = AffineBasis::new(width, height, angle);
    let mut side = 0usize;
    while side < limit && basis.fits((side + 1) as f64) {
        side += 1;
    }
    trace_debug!("inscribed_side", width = width, height = height, side = side);
    side
}
