//! Linear map between the unit square and a rotated source rectangle.

/// Relative slack for sides that fit exactly (e.g. angle 0, side == width).
const FIT_EPS: f64 = 1e-9;

const CORNERS: [[f64; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];

/// 2x2 map `A = R(angle) * diag(width / 2, height / 2)`.
///
/// `A` sends the corners `(±1, ±1)` of the unit square to the pixel offsets
/// of the rotated source rectangle's corners. Solving `A v = p` expresses a
/// pixel offset `p` in that rectangle's normalized frame, where the source
/// occupies `|v|∞ <= 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineBasis {
    m: [[f64; 2]; 2],
}

impl AffineBasis {
    /// Builds the basis for a `width x height` source rotated by `angle`.
    pub fn new(width: usize, height: usize, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let half_w = width as f64 / 2.0;
        let half_h = height as f64 / 2.0;
        Self {
            m: [[cos * half_w, -sin * half_h], [sin * half_w, cos * half_h]],
        }
    }

    /// Row-major matrix entries.
    pub fn matrix(&self) -> [[f64; 2]; 2] {
        self.m
    }

    /// Solves `A v = rhs`; `None` when `A` is singular or not finite.
    pub fn solve(&self, rhs: [f64; 2]) -> Option<[f64; 2]> {
        let [[a, b], [c, d]] = self.m;
        let det = a * d - b * c;
        if !det.is_finite() || det == 0.0 {
            return None;
        }
        let v0 = (rhs[0] * d - b * rhs[1]) / det;
        let v1 = (a * rhs[1] - c * rhs[0]) / det;
        Some([v0, v1])
    }

    /// Whether a centered square of side `side` stays inside the source.
    pub fn fits(&self, side: f64) -> bool {
        let half = side / 2.0;
        CORNERS.iter().all(|corner| {
            match self.solve([corner[0] * half, corner[1] * half]) {
                Some([v0, v1]) => v0.abs().max(v1.abs()) <= 1.0 + FIT_EPS,
                None => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::AffineBasis;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn identity_rotation_scales_by_half_extent() {
        let basis = AffineBasis::new(8, 4, 0.0);
        assert_eq!(basis.matrix(), [[4.0, 0.0], [0.0, 2.0]]);
        assert_eq!(basis.solve([4.0, -2.0]), Some([1.0, -1.0]));
    }

    #[test]
    fn solve_inverts_the_map() {
        let basis = AffineBasis::new(30, 20, 0.7);
        let v = [0.3, -0.8];
        let [[a, b], [c, d]] = basis.matrix();
        let p = [a * v[0] + b * v[1], c * v[0] + d * v[1]];
        let back = basis.solve(p).unwrap();
        assert!((back[0] - v[0]).abs() < 1e-12);
        assert!((back[1] - v[1]).abs() < 1e-12);
    }

    #[test]
    fn quarter_turn_swaps_the_limiting_axis() {
        let basis = AffineBasis::new(10, 6, FRAC_PI_2);
        assert!(basis.fits(6.0));
        assert!(!basis.fits(7.0));
    }

    #[test]
    fn degenerate_basis_never_fits() {
        let basis = AffineBasis::new(0, 6, 0.2);
        assert_eq!(basis.solve([1.0, 1.0]), None);
        assert!(!basis.fits(0.5));
    }
}
