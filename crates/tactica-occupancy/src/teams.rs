//! Team relationships between movers and occupants.

use crate::EntityId;

/// Relationship between a mover and a cell's occupant, as judged by the
/// surrounding application's entity directory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    Ally,
    Enemy,
    Neutral,
}

/// Resolves the relation between two entities.
///
/// This is the occupancy map's only dependency on the outside world. Any
/// closure `Fn(EntityId, EntityId) -> Relation` qualifies.
pub trait TeamResolver {
    /// The relation of `occupant` toward `mover`.
    fn relation(&self, mover: EntityId, occupant: EntityId) -> Relation;
}

impl<F> TeamResolver for F
where
    F: Fn(EntityId, EntityId) -> Relation + ?Sized,
{
    fn relation(&self, mover: EntityId, occupant: EntityId) -> Relation {
        self(mover, occupant)
    }
}
