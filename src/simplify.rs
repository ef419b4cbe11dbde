//! Line simplification backed by the `geo` crate.

use geo::{LineString, Simplify};

use crate::traits::LineSimplifier;

/// Default simplification tolerance in coordinate degrees. Small enough to
/// preserve visual fidelity at typical city and regional zoom levels.
pub const DEFAULT_TOLERANCE: f64 = 0.00001;

/// Ramer-Douglas-Peucker simplifier.
///
/// Deterministic, keeps the endpoints of any input with at least 2 points,
/// and is idempotent on its own output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RdpSimplifier;

impl LineSimplifier for RdpSimplifier {
    fn simplify(&self, points: &[(f64, f64)], tolerance: f64) -> Vec<(f64, f64)> {
        if points.len() < 2 {
            return points.to_vec();
        }
        let line = LineString::from(points.to_vec());
        line.simplify(tolerance)
            .0
            .into_iter()
            .map(|coord| (coord.x, coord.y))
            .collect()
    }
}
