//! **tactica-occupancy** — Who stands where.
//!
//! The [`OccupancyMap`] tracks which cells are held by which entity,
//! supporting multi-cell footprints for larger creatures, and answers the
//! two traversal questions combat movement needs:
//!
//! - **can_traverse** — may a path pass through this cell? Only an
//!   enemy-held cell blocks transit.
//! - **can_occupy** — may a move end on this cell? Any other entity blocks
//!   final occupation, allies included.
//!
//! Team relationships are resolved through the [`TeamResolver`] seam; the
//! map itself knows nothing about teams, only about cells and occupants.

pub mod map;
pub mod teams;

pub use map::{Footprint, OccupancyChange, OccupancyMap, PlacementError, footprint};
pub use teams::{Relation, TeamResolver};

use std::fmt;

/// Opaque identity of an entity, assigned by the surrounding application's
/// entity directory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity id.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn entity_id_round_trip() {
        let id = EntityId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
