//! Vertical connectors between elevation layers.

use std::fmt;

use tactica_core::CellCoord;

/// An explicit connector (stairway, ladder, chute) between two cells that
/// need not be planar-adjacent and may differ in elevation.
///
/// A registered link is traversable in both directions; the store indexes
/// it under both endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerticalLink {
    pub from: CellCoord,
    pub to: CellCoord,
    /// Fixed traversal cost in distance units.
    pub cost: i32,
}

impl VerticalLink {
    /// Create a link. Cost validation happens at registration.
    pub const fn new(from: CellCoord, to: CellCoord, cost: i32) -> Self {
        Self { from, to, cost }
    }

    /// The same link traversed the other way.
    pub const fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            cost: self.cost,
        }
    }
}

/// Invalid vertical-link registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// Link cost must be strictly positive.
    NonPositiveCost(i32),
    /// A link must connect two distinct cells.
    SelfLink(CellCoord),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveCost(c) => write!(f, "link cost must be > 0, got {c}"),
            Self::SelfLink(cell) => write!(f, "link connects {cell} to itself"),
        }
    }
}

impl std::error::Error for LinkError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn link_round_trip() {
        let l = VerticalLink::new(CellCoord::new(1, 0, 2), CellCoord::new(1, 3, 2), 15);
        let json = serde_json::to_string(&l).unwrap();
        let back: VerticalLink = serde_json::from_str(&json).unwrap();
        assert_eq!(l, back);
    }
}
