//! Canonical edge keys for wall storage.

use tactica_core::CellCoord;

/// An unordered pair of adjacent cell coordinates.
///
/// The constructor sorts the endpoints, so two keys built from the same
/// pair in either order compare equal and hash equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey {
    a: CellCoord,
    b: CellCoord,
}

impl EdgeKey {
    /// Create a canonical key for the edge between `a` and `b`.
    pub fn new(a: CellCoord, b: CellCoord) -> Self {
        if b < a { Self { a: b, b: a } } else { Self { a, b } }
    }

    /// The two endpoints, in canonical order.
    pub fn endpoints(self) -> (CellCoord, CellCoord) {
        (self.a, self.b)
    }
}
