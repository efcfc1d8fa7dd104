//! Terrain classification and per-cell data.

use std::fmt;

/// Terrain classification of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    /// Open ground; base movement cost.
    #[default]
    Normal,
    /// Rubble, undergrowth, shallow water; doubles the entering step cost.
    Difficult,
    /// Cannot be entered at all.
    Impassable,
}

impl Terrain {
    /// Multiplier applied to the base cost of a step *entering* a cell of
    /// this terrain. Only meaningful for passable terrain.
    #[inline]
    pub const fn cost_multiplier(self) -> i32 {
        match self {
            Terrain::Normal => 1,
            Terrain::Difficult => 2,
            Terrain::Impassable => 1,
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Terrain::Normal => "normal",
            Terrain::Difficult => "difficult",
            Terrain::Impassable => "impassable",
        };
        f.write_str(s)
    }
}

/// Authored state of a placed cell: terrain plus a walkable flag.
///
/// The two are independent: a cell may be Normal terrain yet unwalkable
/// (a pit, a rooftop edge). Whether anything currently stands on the cell
/// is tracked elsewhere and never affects this data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellData {
    pub terrain: Terrain,
    pub walkable: bool,
}

impl CellData {
    /// Create cell data with an explicit walkable flag.
    #[inline]
    pub const fn new(terrain: Terrain, walkable: bool) -> Self {
        Self { terrain, walkable }
    }

    /// A walkable cell of normal terrain.
    #[inline]
    pub const fn floor() -> Self {
        Self::new(Terrain::Normal, true)
    }

    /// A walkable cell of difficult terrain.
    #[inline]
    pub const fn difficult() -> Self {
        Self::new(Terrain::Difficult, true)
    }

    /// An impassable cell.
    #[inline]
    pub const fn blocked() -> Self {
        Self::new(Terrain::Impassable, false)
    }

    /// Whether a mover may stand in or pass through this cell.
    #[inline]
    pub const fn passable(self) -> bool {
        self.walkable && !matches!(self.terrain, Terrain::Impassable)
    }
}

impl Default for CellData {
    fn default() -> Self {
        Self::floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers() {
        assert_eq!(Terrain::Normal.cost_multiplier(), 1);
        assert_eq!(Terrain::Difficult.cost_multiplier(), 2);
    }

    #[test]
    fn passability() {
        assert!(CellData::floor().passable());
        assert!(CellData::difficult().passable());
        assert!(!CellData::blocked().passable());
        // Walkable flag is independent of terrain.
        assert!(!CellData::new(Terrain::Normal, false).passable());
        assert!(!CellData::new(Terrain::Impassable, true).passable());
    }
}
