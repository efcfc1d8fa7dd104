//! The occupancy map: entity → footprint, cell → occupant.

use std::fmt;

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::collections::HashMap;
use tactica_core::CellCoord;

use crate::teams::{Relation, TeamResolver};
use crate::EntityId;

/// Cells held by one entity. 1×1 in the common case.
pub type Footprint = SmallVec<[CellCoord; 4]>;

/// The N×N block of cells for an anchor and footprint edge length, anchor
/// at the minimum corner. Pure; a zero size yields no cells.
pub fn footprint(anchor: CellCoord, size: u8) -> Footprint {
    let n = i32::from(size);
    let mut cells = Footprint::new();
    for dx in 0..n {
        for dz in 0..n {
            cells.push(anchor.shift(dx, dz));
        }
    }
    cells
}

/// A mutation of the occupancy map.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OccupancyChange {
    Placed(EntityId),
    Moved(EntityId),
    Removed(EntityId),
}

/// Failed placement or move. Failures are atomic: the map is left exactly
/// as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Footprint size must be at least 1.
    InvalidSize(u8),
    /// A footprint cell is already held by another entity.
    Occupied { cell: CellCoord, by: EntityId },
    /// The entity has no current placement to move from.
    NotPlaced(EntityId),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize(n) => write!(f, "footprint size must be >= 1, got {n}"),
            Self::Occupied { cell, by } => write!(f, "cell {cell} is held by {by}"),
            Self::NotPlaced(e) => write!(f, "{e} is not placed"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// One entity's recorded placement.
struct Placement {
    size: u8,
    cells: Footprint,
}

/// Tracks which cells are held by which entity.
///
/// Two indexes are kept in lockstep: entity → placement (insertion
/// ordered, so iteration is deterministic) and cell → occupant. Every
/// mutation either fully applies or leaves both untouched.
#[derive(Default)]
pub struct OccupancyMap {
    by_entity: IndexMap<EntityId, Placement>,
    by_cell: HashMap<CellCoord, EntityId>,
    listeners: Vec<Box<dyn Fn(&OccupancyChange)>>,
}

impl OccupancyMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placed entities.
    pub fn len(&self) -> usize {
        self.by_entity.len()
    }

    /// Whether no entity is placed.
    pub fn is_empty(&self) -> bool {
        self.by_entity.is_empty()
    }

    /// Register a callback invoked after every successful mutation.
    pub fn on_change(&mut self, f: impl Fn(&OccupancyChange) + 'static) {
        self.listeners.push(Box::new(f));
    }

    fn notify(&self, change: OccupancyChange) {
        for sub in &self.listeners {
            sub(&change);
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Place `entity` with an N×N footprint anchored at `anchor`.
    ///
    /// If the entity is already placed, this relocates it atomically: its
    /// current cells do not block the new footprint, and on failure the old
    /// placement is untouched.
    pub fn place(
        &mut self,
        entity: EntityId,
        anchor: CellCoord,
        size: u8,
    ) -> Result<(), PlacementError> {
        if size == 0 {
            return Err(PlacementError::InvalidSize(size));
        }
        let cells = footprint(anchor, size);
        for &cell in &cells {
            match self.by_cell.get(&cell) {
                Some(&by) if by != entity => {
                    return Err(PlacementError::Occupied { cell, by });
                }
                _ => {}
            }
        }

        // Whole footprint verified free; commit.
        let moved = self.vacate(entity);
        for &cell in &cells {
            self.by_cell.insert(cell, entity);
        }
        self.by_entity.insert(entity, Placement { size, cells });
        self.notify(if moved {
            OccupancyChange::Moved(entity)
        } else {
            OccupancyChange::Placed(entity)
        });
        Ok(())
    }

    /// Move a placed entity to a new anchor, keeping its footprint size.
    ///
    /// Rolls back entirely (a no-op) if any destination cell is held by
    /// another entity. Overlap with the entity's own current cells is fine.
    pub fn move_to(&mut self, entity: EntityId, anchor: CellCoord) -> Result<(), PlacementError> {
        let size = match self.by_entity.get(&entity) {
            Some(placement) => placement.size,
            None => return Err(PlacementError::NotPlaced(entity)),
        };
        self.place(entity, anchor, size)
    }

    /// Remove an entity, freeing all its cells. Returns `false` if it was
    /// not placed.
    pub fn remove(&mut self, entity: EntityId) -> bool {
        if !self.vacate(entity) {
            return false;
        }
        self.notify(OccupancyChange::Removed(entity));
        true
    }

    /// Drop `entity` from both indexes. Returns whether it was placed.
    fn vacate(&mut self, entity: EntityId) -> bool {
        let Some(placement) = self.by_entity.shift_remove(&entity) else {
            return false;
        };
        for cell in placement.cells {
            let prev = self.by_cell.remove(&cell);
            if prev != Some(entity) {
                // Index disagreement is a bug in this module, not in the
                // caller; make it loud.
                debug_assert_eq!(prev, Some(entity), "occupancy indexes out of sync");
                log::warn!(
                    "occupancy index out of sync at {cell}: expected {entity}, found {prev:?}"
                );
            }
        }
        true
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether any entity holds `cell`.
    #[inline]
    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        self.by_cell.contains_key(&cell)
    }

    /// The entity holding `cell`, if any.
    #[inline]
    pub fn occupant(&self, cell: CellCoord) -> Option<EntityId> {
        self.by_cell.get(&cell).copied()
    }

    /// All cells currently held by `entity`; empty if it is not placed.
    pub fn occupied_cells(&self, entity: EntityId) -> &[CellCoord] {
        self.by_entity.get(&entity).map_or(&[], |p| p.cells.as_slice())
    }

    /// May a path pass through `cell`? True for empty cells, the mover's
    /// own cells, and cells held by allies or neutral parties; false only
    /// for enemy-held cells.
    pub fn can_traverse<R>(&self, cell: CellCoord, mover: EntityId, teams: &R) -> bool
    where
        R: TeamResolver + ?Sized,
    {
        match self.by_cell.get(&cell) {
            None => true,
            Some(&occupant) if occupant == mover => true,
            Some(&occupant) => teams.relation(mover, occupant) != Relation::Enemy,
        }
    }

    /// May a move end on `cell`? True only for empty cells and the mover's
    /// own cells; any other occupant blocks, allies included.
    pub fn can_occupy(&self, cell: CellCoord, mover: EntityId) -> bool {
        match self.by_cell.get(&cell) {
            None => true,
            Some(&occupant) => occupant == mover,
        }
    }

    /// Whether every cell of an N×N footprint at `anchor` satisfies
    /// [`can_occupy`](Self::can_occupy). A zero size never fits.
    pub fn can_occupy_footprint(&self, anchor: CellCoord, size: u8, mover: EntityId) -> bool {
        size >= 1 && footprint(anchor, size).iter().all(|&c| self.can_occupy(c, mover))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const A: EntityId = EntityId(1);
    const B: EntityId = EntityId(2);

    fn at(x: i32, z: i32) -> CellCoord {
        CellCoord::ground(x, z)
    }

    #[test]
    fn footprint_is_anchored_at_minimum_corner() {
        let cells = footprint(at(2, 3), 2);
        assert_eq!(cells.len(), 4);
        for c in [at(2, 3), at(3, 3), at(2, 4), at(3, 4)] {
            assert!(cells.contains(&c));
        }
        assert!(footprint(at(0, 0), 0).is_empty());
    }

    #[test]
    fn place_and_query() {
        let mut occ = OccupancyMap::new();
        occ.place(A, at(1, 1), 1).unwrap();
        assert!(occ.is_occupied(at(1, 1)));
        assert_eq!(occ.occupant(at(1, 1)), Some(A));
        assert_eq!(occ.occupied_cells(A), &[at(1, 1)]);
        assert_eq!(occ.occupant(at(0, 0)), None);
        assert!(occ.occupied_cells(B).is_empty());
    }

    #[test]
    fn zero_size_is_rejected_without_corruption() {
        let mut occ = OccupancyMap::new();
        assert_eq!(occ.place(A, at(0, 0), 0), Err(PlacementError::InvalidSize(0)));
        assert!(occ.is_empty());
        assert!(!occ.is_occupied(at(0, 0)));
    }

    #[test]
    fn blocked_placement_is_fully_rolled_back() {
        let mut occ = OccupancyMap::new();
        occ.place(B, at(1, 1), 1).unwrap();
        // A 2×2 at (0,0) covers (1,1); the whole placement must fail.
        let err = occ.place(A, at(0, 0), 2).unwrap_err();
        assert_eq!(
            err,
            PlacementError::Occupied {
                cell: at(1, 1),
                by: B
            }
        );
        // No partial footprint observable.
        assert!(!occ.is_occupied(at(0, 0)));
        assert!(!occ.is_occupied(at(1, 0)));
        assert!(!occ.is_occupied(at(0, 1)));
        assert_eq!(occ.occupant(at(1, 1)), Some(B));
    }

    #[test]
    fn blocked_move_keeps_prior_position() {
        let mut occ = OccupancyMap::new();
        occ.place(A, at(0, 0), 1).unwrap();
        occ.place(B, at(3, 3), 1).unwrap();
        assert!(occ.move_to(A, at(3, 3)).is_err());
        assert_eq!(occ.occupied_cells(A), &[at(0, 0)]);
    }

    #[test]
    fn move_may_overlap_own_footprint() {
        let mut occ = OccupancyMap::new();
        occ.place(A, at(0, 0), 2).unwrap();
        // One step east overlaps two of A's own cells.
        occ.move_to(A, at(1, 0)).unwrap();
        assert_eq!(occ.occupant(at(0, 0)), None);
        assert_eq!(occ.occupant(at(1, 0)), Some(A));
        assert_eq!(occ.occupant(at(2, 1)), Some(A));
        assert_eq!(occ.occupied_cells(A).len(), 4);
    }

    #[test]
    fn move_preserves_footprint_size() {
        let mut occ = OccupancyMap::new();
        occ.place(A, at(0, 0), 2).unwrap();
        occ.move_to(A, at(5, 5)).unwrap();
        assert_eq!(occ.occupied_cells(A).len(), 4);
    }

    #[test]
    fn remove_frees_all_cells_and_tolerates_absence() {
        let mut occ = OccupancyMap::new();
        occ.place(A, at(0, 0), 2).unwrap();
        assert!(occ.remove(A));
        assert!(occ.is_empty());
        assert!(!occ.is_occupied(at(1, 1)));
        assert!(!occ.remove(A));
    }

    #[test]
    fn traversal_blocks_only_enemies() {
        let mut occ = OccupancyMap::new();
        occ.place(B, at(1, 0), 1).unwrap();

        let hostile = |_: EntityId, _: EntityId| Relation::Enemy;
        let friendly = |_: EntityId, _: EntityId| Relation::Ally;
        let neutral = |_: EntityId, _: EntityId| Relation::Neutral;

        assert!(!occ.can_traverse(at(1, 0), A, &hostile));
        assert!(occ.can_traverse(at(1, 0), A, &friendly));
        assert!(occ.can_traverse(at(1, 0), A, &neutral));
        // Empty cells and the mover's own cells always pass.
        assert!(occ.can_traverse(at(5, 5), A, &hostile));
        occ.place(A, at(0, 0), 1).unwrap();
        assert!(occ.can_traverse(at(0, 0), A, &hostile));
    }

    #[test]
    fn occupation_blocks_everyone_but_self() {
        let mut occ = OccupancyMap::new();
        occ.place(A, at(0, 0), 1).unwrap();
        occ.place(B, at(1, 0), 1).unwrap();
        assert!(occ.can_occupy(at(0, 0), A));
        assert!(!occ.can_occupy(at(1, 0), A));
        assert!(occ.can_occupy(at(2, 0), A));

        assert!(occ.can_occupy_footprint(at(4, 4), 2, A));
        assert!(!occ.can_occupy_footprint(at(0, 0), 2, A)); // covers B
        assert!(!occ.can_occupy_footprint(at(4, 4), 0, A));
    }

    #[test]
    fn change_callbacks_fire_per_mutation() {
        let seen: Rc<RefCell<Vec<OccupancyChange>>> = Rc::default();
        let mut occ = OccupancyMap::new();
        let sink = Rc::clone(&seen);
        occ.on_change(move |c| sink.borrow_mut().push(*c));

        occ.place(A, at(0, 0), 1).unwrap();
        occ.move_to(A, at(1, 0)).unwrap();
        occ.remove(A);
        // Failed mutations are silent.
        let _ = occ.place(B, at(0, 0), 0);

        assert_eq!(
            seen.borrow().as_slice(),
            &[
                OccupancyChange::Placed(A),
                OccupancyChange::Moved(A),
                OccupancyChange::Removed(A),
            ]
        );
    }
}
