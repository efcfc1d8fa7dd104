//! Neighbor records produced by [`GridStore::neighbors`](crate::GridStore::neighbors).

use tactica_core::CellCoord;

/// How a neighbor is reached from its source cell.
///
/// Cardinal and diagonal step costs depend on terrain and on the path taken
/// so far (diagonal parity), so they are computed by the pathfinding engine
/// rather than stored here. A vertical step carries its link's fixed cost.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    Cardinal,
    Diagonal,
    Vertical { cost: i32 },
}

/// A traversable neighbor of a source cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighborStep {
    pub cell: CellCoord,
    pub kind: StepKind,
}

impl NeighborStep {
    pub const fn new(cell: CellCoord, kind: StepKind) -> Self {
        Self { cell, kind }
    }
}
