//! Planar distance helpers.

use tactica_core::CellCoord;

use crate::cost::BASE_STEP_COST;

/// Manhattan (L1) distance between two cells' planar positions.
#[inline]
pub fn manhattan(a: CellCoord, b: CellCoord) -> i32 {
    (a.x - b.x).abs() + (a.z - b.z).abs()
}

/// Chebyshev (L∞) distance between two cells' planar positions.
#[inline]
pub fn chebyshev(a: CellCoord, b: CellCoord) -> i32 {
    (a.x - b.x).abs().max((a.z - b.z).abs())
}

/// Minimum movement cost between two planar positions on open normal
/// terrain under the alternating-diagonal rule: straight steps at 5, the
/// k-th diagonal at 5 or 10 by parity, starting cheap.
///
/// A lower bound on the true path cost whatever the terrain or walls in
/// between, and whatever diagonal parity the mover starts with.
#[inline]
pub fn diagonal_distance(a: CellCoord, b: CellCoord) -> i32 {
    let dx = (a.x - b.x).abs();
    let dz = (a.z - b.z).abs();
    let diag = dx.min(dz);
    let straight = dx.max(dz) - diag;
    straight * BASE_STEP_COST + (diag / 2) * 3 * BASE_STEP_COST + (diag % 2) * BASE_STEP_COST
}
