//! The reusable search context and its internal node bookkeeping.

use std::collections::{BinaryHeap, HashMap};

use tactica_core::CellCoord;
use tactica_grid::{GridStore, NeighborStep};
use tactica_occupancy::{EntityId, OccupancyMap, TeamResolver};

use crate::cost::Parity;

/// A search state: a cell plus the diagonal parity accumulated reaching it.
///
/// The two parity states of one cell are distinct nodes and are optimized
/// independently; merging them produces wrong costs whenever a costlier
/// arrival carries the cheaper next-diagonal price.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct SearchKey {
    pub(crate) cell: CellCoord,
    pub(crate) parity: Parity,
}

/// Per-state bookkeeping for A*/Dijkstra.
pub(crate) struct NodeState {
    pub(crate) g: i32,
    pub(crate) parent: Option<SearchKey>,
    pub(crate) open: bool,
}

/// Heap entry ordered by `f`, reversed so the max-heap pops smallest first.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) key: SearchKey,
    pub(crate) f: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.f.cmp(&self.f)
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable context for movement queries.
///
/// Owns the open heap, the node table, and the neighbor scratch buffer so
/// repeated queries reuse their capacity. Holds no query results and no
/// entity-lifetime data: each call is self-contained given the store, the
/// profile, and (optionally) an occupancy snapshot, so one `Pathfinder`
/// may serve any number of grids and movers in sequence.
pub struct Pathfinder {
    pub(crate) nodes: HashMap<SearchKey, NodeState>,
    pub(crate) open: BinaryHeap<NodeRef>,
    pub(crate) nbuf: Vec<NeighborStep>,
}

impl Pathfinder {
    /// Create a search context.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            open: BinaryHeap::new(),
            nbuf: Vec::with_capacity(10),
        }
    }
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Occupancy filtering
// ---------------------------------------------------------------------------

/// What the expansion loop asks about a candidate cell.
pub(crate) trait Blocking {
    /// May the path pass through this cell at all?
    fn may_enter(&self, cell: CellCoord) -> bool;
    /// May the move end on this cell?
    fn may_stop(&self, cell: CellCoord) -> bool;
}

/// No occupancy supplied: terrain and walls are the only obstacles.
pub(crate) struct Unobstructed;

impl Blocking for Unobstructed {
    #[inline]
    fn may_enter(&self, _cell: CellCoord) -> bool {
        true
    }
    #[inline]
    fn may_stop(&self, _cell: CellCoord) -> bool {
        true
    }
}

/// Occupancy-aware filter for a specific mover: enemies block transit,
/// any other occupant blocks stopping.
pub(crate) struct Occupied<'a, R: TeamResolver + ?Sized> {
    pub(crate) mover: EntityId,
    pub(crate) map: &'a OccupancyMap,
    pub(crate) teams: &'a R,
}

impl<R: TeamResolver + ?Sized> Blocking for Occupied<'_, R> {
    #[inline]
    fn may_enter(&self, cell: CellCoord) -> bool {
        self.map.can_traverse(cell, self.mover, self.teams)
    }
    #[inline]
    fn may_stop(&self, cell: CellCoord) -> bool {
        self.map.can_occupy(cell, self.mover)
    }
}

/// Admissible estimate of the remaining cost from `from` to `goal`.
///
/// On a link-free grid with both cells on one layer, the alternating
/// diagonal bound is admissible: walls and terrain only raise cost. Any
/// registered link may connect distant cells at an arbitrary fixed cost
/// and undercut every planar estimate, so with links present (or across
/// layers) the estimate degrades to 0 and the search to uniform-cost.
pub(crate) fn estimate(grid: &GridStore, from: CellCoord, goal: CellCoord) -> i32 {
    if grid.has_links() || from.elevation != goal.elevation {
        0
    } else {
        crate::distance::diagonal_distance(from, goal)
    }
}
