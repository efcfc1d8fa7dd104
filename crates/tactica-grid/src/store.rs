//! The sparse grid store.

use std::collections::HashMap;

use tactica_core::{CellCoord, CellData, GridTransform, MovementKind, WorldPoint};

use crate::edge::EdgeKey;
use crate::events::{GridChange, Listeners};
use crate::link::{LinkError, VerticalLink};
use crate::neighbor::{NeighborStep, StepKind};

/// The four cardinal planar offsets (dx, dz): N, E, S, W.
const CARDINAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// The four diagonal planar offsets (dx, dz): NE, SE, SW, NW.
const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// Sparse spatial store for a layered battlefield.
///
/// Owns cell data, wall edges, and vertical links, keyed by [`CellCoord`].
/// Authored once per scenario and read-mostly afterwards. A coordinate with
/// no entry simply does not exist: every query treats it as absent rather
/// than an error, and it can never be entered.
pub struct GridStore {
    transform: GridTransform,
    cells: HashMap<CellCoord, CellData>,
    walls: HashMap<EdgeKey, bool>,
    links: HashMap<CellCoord, Vec<VerticalLink>>,
    listeners: Listeners,
}

impl GridStore {
    /// Create an empty store with the given world transform.
    pub fn new(transform: GridTransform) -> Self {
        Self {
            transform,
            cells: HashMap::new(),
            walls: HashMap::new(),
            links: HashMap::new(),
            listeners: Listeners::default(),
        }
    }

    /// The store's world transform.
    #[inline]
    pub fn transform(&self) -> GridTransform {
        self.transform
    }

    /// Number of placed cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether any vertical links are registered.
    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    // -----------------------------------------------------------------------
    // Cell CRUD
    // -----------------------------------------------------------------------

    /// Place or update a cell.
    pub fn set_cell(&mut self, cell: CellCoord, data: CellData) {
        self.cells.insert(cell, data);
        self.listeners.notify(&GridChange::CellSet(cell));
    }

    /// Whether a cell has been placed.
    #[inline]
    pub fn has_cell(&self, cell: CellCoord) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Fetch a placed cell's data.
    #[inline]
    pub fn cell(&self, cell: CellCoord) -> Option<CellData> {
        self.cells.get(&cell).copied()
    }

    /// Whether a cell exists and can be entered. Absent cells are never
    /// passable.
    #[inline]
    pub fn is_passable(&self, cell: CellCoord) -> bool {
        self.cells.get(&cell).is_some_and(|d| d.passable())
    }

    // -----------------------------------------------------------------------
    // Edges and links
    // -----------------------------------------------------------------------

    /// Set the wall state of the edge between `a` and `b`. Endpoint order
    /// does not matter.
    pub fn set_edge(&mut self, a: CellCoord, b: CellCoord, wall: bool) {
        let edge = EdgeKey::new(a, b);
        self.walls.insert(edge, wall);
        self.listeners.notify(&GridChange::EdgeSet { edge, wall });
    }

    /// Whether a wall sits on the edge between `a` and `b`.
    #[inline]
    pub fn has_wall(&self, a: CellCoord, b: CellCoord) -> bool {
        self.walls
            .get(&EdgeKey::new(a, b))
            .copied()
            .unwrap_or(false)
    }

    /// Register a vertical link between two cells. The link becomes
    /// traversable from both endpoints.
    pub fn add_vertical_link(
        &mut self,
        from: CellCoord,
        to: CellCoord,
        cost: i32,
    ) -> Result<(), LinkError> {
        if cost <= 0 {
            return Err(LinkError::NonPositiveCost(cost));
        }
        if from == to {
            return Err(LinkError::SelfLink(from));
        }
        let link = VerticalLink::new(from, to, cost);
        self.links.entry(from).or_default().push(link);
        self.links.entry(to).or_default().push(link.reversed());
        self.listeners.notify(&GridChange::LinkAdded { from, to });
        Ok(())
    }

    /// Links traversable from `cell` (registered at either endpoint).
    pub fn vertical_links(&self, cell: CellCoord) -> &[VerticalLink] {
        self.links.get(&cell).map_or(&[], Vec::as_slice)
    }

    // -----------------------------------------------------------------------
    // Coordinate transforms
    // -----------------------------------------------------------------------

    /// The cell containing the given world position.
    #[inline]
    pub fn world_to_cell(&self, p: WorldPoint) -> CellCoord {
        self.transform.world_to_cell(p)
    }

    /// World position of a cell: x/z center, y at the cell's floor height.
    #[inline]
    pub fn cell_to_world(&self, c: CellCoord) -> WorldPoint {
        self.transform.cell_to_world(c)
    }

    // -----------------------------------------------------------------------
    // Change notification
    // -----------------------------------------------------------------------

    /// Register a callback invoked after every mutation.
    pub fn on_change(&mut self, f: impl Fn(&GridChange) + 'static) {
        self.listeners.register(Box::new(f));
    }

    // -----------------------------------------------------------------------
    // Neighbor enumeration
    // -----------------------------------------------------------------------

    /// Enumerate the valid neighbors of `from`, clearing and filling `buf`.
    ///
    /// - A cardinal neighbor must exist, be passable, and not be separated
    ///   from `from` by a wall.
    /// - A diagonal neighbor must exist and be passable, and **both**
    ///   cardinal intermediate cells must exist, be passable, and not be
    ///   wall-separated from `from`. One blocked intermediate vetoes the
    ///   diagonal; tight corners cannot be cut.
    /// - Every link registered at `from` whose far cell exists and is
    ///   passable yields a vertical neighbor with the link's fixed cost,
    ///   regardless of planar distance.
    ///
    /// `kind` is carried for future movement-kind-specific rules and does
    /// not yet affect the result.
    pub fn neighbors(&self, from: CellCoord, kind: MovementKind, buf: &mut Vec<NeighborStep>) {
        let _ = kind;
        buf.clear();

        for (dx, dz) in CARDINAL_OFFSETS {
            let to = from.shift(dx, dz);
            if self.is_passable(to) && !self.has_wall(from, to) {
                buf.push(NeighborStep::new(to, StepKind::Cardinal));
            }
        }

        for (dx, dz) in DIAGONAL_OFFSETS {
            let to = from.shift(dx, dz);
            if !self.is_passable(to) {
                continue;
            }
            let via_x = from.shift(dx, 0);
            let via_z = from.shift(0, dz);
            if !self.is_passable(via_x) || self.has_wall(from, via_x) {
                continue;
            }
            if !self.is_passable(via_z) || self.has_wall(from, via_z) {
                continue;
            }
            buf.push(NeighborStep::new(to, StepKind::Diagonal));
        }

        for link in self.vertical_links(from) {
            if self.is_passable(link.to) {
                buf.push(NeighborStep::new(
                    link.to,
                    StepKind::Vertical { cost: link.cost },
                ));
            }
        }
    }
}

impl Default for GridStore {
    fn default() -> Self {
        Self::new(GridTransform::UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tactica_core::Terrain;

    /// Fill a flat walkable rectangle on elevation 0.
    fn flat_grid(w: i32, d: i32) -> GridStore {
        let mut g = GridStore::default();
        for x in 0..w {
            for z in 0..d {
                g.set_cell(CellCoord::ground(x, z), CellData::floor());
            }
        }
        g
    }

    fn neighbor_cells(g: &GridStore, from: CellCoord) -> Vec<CellCoord> {
        let mut buf = Vec::new();
        g.neighbors(from, MovementKind::Walk, &mut buf);
        buf.iter().map(|n| n.cell).collect()
    }

    #[test]
    fn absent_cells_are_not_an_error() {
        let g = GridStore::default();
        let c = CellCoord::new(3, 1, -2);
        assert!(!g.has_cell(c));
        assert_eq!(g.cell(c), None);
        assert!(!g.is_passable(c));
        assert!(g.vertical_links(c).is_empty());
    }

    #[test]
    fn cell_update_overwrites() {
        let mut g = GridStore::default();
        let c = CellCoord::ground(0, 0);
        g.set_cell(c, CellData::floor());
        g.set_cell(c, CellData::difficult());
        assert_eq!(g.cell(c).unwrap().terrain, Terrain::Difficult);
    }

    #[test]
    fn open_interior_cell_has_eight_neighbors() {
        let g = flat_grid(3, 3);
        let n = neighbor_cells(&g, CellCoord::ground(1, 1));
        assert_eq!(n.len(), 8);
    }

    #[test]
    fn corner_cell_has_three_neighbors() {
        let g = flat_grid(3, 3);
        let n = neighbor_cells(&g, CellCoord::ground(0, 0));
        assert_eq!(n.len(), 3);
    }

    #[test]
    fn impassable_cell_is_not_a_neighbor() {
        let mut g = flat_grid(3, 3);
        g.set_cell(CellCoord::ground(2, 1), CellData::blocked());
        let n = neighbor_cells(&g, CellCoord::ground(1, 1));
        assert!(!n.contains(&CellCoord::ground(2, 1)));
    }

    #[test]
    fn one_blocked_intermediate_vetoes_the_diagonal() {
        let mut g = flat_grid(3, 3);
        // Blocking (2,1) alone must veto the (2,2) diagonal from (1,1),
        // even though the other intermediate (1,2) is clear.
        g.set_cell(CellCoord::ground(2, 1), CellData::blocked());
        let n = neighbor_cells(&g, CellCoord::ground(1, 1));
        assert!(!n.contains(&CellCoord::ground(2, 2)));
        assert!(!n.contains(&CellCoord::ground(2, 0)));
        // Cardinal movement around the block is unaffected.
        assert!(n.contains(&CellCoord::ground(1, 2)));
        assert!(n.contains(&CellCoord::ground(1, 0)));
    }

    #[test]
    fn wall_blocks_cardinal_and_both_diagonals() {
        let mut g = flat_grid(3, 3);
        // Wall on the edge between (1,1) and (2,1).
        g.set_edge(CellCoord::ground(1, 1), CellCoord::ground(2, 1), true);
        let n = neighbor_cells(&g, CellCoord::ground(1, 1));
        assert!(!n.contains(&CellCoord::ground(2, 1)));
        assert!(!n.contains(&CellCoord::ground(2, 0)));
        assert!(!n.contains(&CellCoord::ground(2, 2)));
        assert_eq!(n.len(), 5);
    }

    #[test]
    fn wall_is_symmetric() {
        let mut g = flat_grid(3, 1);
        g.set_edge(CellCoord::ground(1, 0), CellCoord::ground(0, 0), true);
        assert!(g.has_wall(CellCoord::ground(0, 0), CellCoord::ground(1, 0)));
        let n = neighbor_cells(&g, CellCoord::ground(0, 0));
        assert!(n.is_empty());
    }

    #[test]
    fn wall_can_be_cleared() {
        let mut g = flat_grid(2, 1);
        let (a, b) = (CellCoord::ground(0, 0), CellCoord::ground(1, 0));
        g.set_edge(a, b, true);
        g.set_edge(b, a, false);
        assert!(!g.has_wall(a, b));
        assert!(neighbor_cells(&g, a).contains(&b));
    }

    #[test]
    fn elevation_adjacency_alone_never_connects() {
        let mut g = GridStore::default();
        g.set_cell(CellCoord::new(0, 0, 0), CellData::floor());
        g.set_cell(CellCoord::new(0, 1, 0), CellData::floor());
        assert!(neighbor_cells(&g, CellCoord::new(0, 0, 0)).is_empty());
    }

    #[test]
    fn vertical_link_connects_both_ways_with_fixed_cost() {
        let mut g = GridStore::default();
        let low = CellCoord::new(0, 0, 0);
        let high = CellCoord::new(4, 1, 4);
        g.set_cell(low, CellData::floor());
        g.set_cell(high, CellData::floor());
        g.add_vertical_link(low, high, 10).unwrap();

        let mut buf = Vec::new();
        g.neighbors(low, MovementKind::Walk, &mut buf);
        assert_eq!(
            buf,
            vec![NeighborStep::new(high, StepKind::Vertical { cost: 10 })]
        );
        g.neighbors(high, MovementKind::Walk, &mut buf);
        assert_eq!(
            buf,
            vec![NeighborStep::new(low, StepKind::Vertical { cost: 10 })]
        );
    }

    #[test]
    fn link_to_unpassable_or_absent_cell_is_suppressed() {
        let mut g = GridStore::default();
        let a = CellCoord::new(0, 0, 0);
        let b = CellCoord::new(0, 1, 0);
        g.set_cell(a, CellData::floor());
        // b not placed yet; the link itself registers fine.
        g.add_vertical_link(a, b, 5).unwrap();
        assert!(neighbor_cells(&g, a).is_empty());

        g.set_cell(b, CellData::blocked());
        assert!(neighbor_cells(&g, a).is_empty());

        g.set_cell(b, CellData::floor());
        assert_eq!(neighbor_cells(&g, a), vec![b]);
    }

    #[test]
    fn link_validation() {
        let mut g = GridStore::default();
        let a = CellCoord::new(0, 0, 0);
        let b = CellCoord::new(0, 1, 0);
        assert_eq!(
            g.add_vertical_link(a, b, 0),
            Err(LinkError::NonPositiveCost(0))
        );
        assert_eq!(g.add_vertical_link(a, a, 5), Err(LinkError::SelfLink(a)));
    }

    #[test]
    fn neighbors_clears_stale_buffer_contents() {
        let g = flat_grid(2, 1);
        let mut buf = vec![NeighborStep::new(CellCoord::new(9, 9, 9), StepKind::Cardinal)];
        g.neighbors(CellCoord::ground(0, 0), MovementKind::Walk, &mut buf);
        assert_eq!(buf.len(), 1);
        assert_eq!(buf[0].cell, CellCoord::ground(1, 0));
    }

    #[test]
    fn transform_round_trip_through_store() {
        let t = GridTransform::new(5.0, 10.0).unwrap();
        let g = GridStore::new(t);
        for x in -4..4 {
            for e in -1..3 {
                for z in -4..4 {
                    let c = CellCoord::new(x, e, z);
                    assert_eq!(g.world_to_cell(g.cell_to_world(c)), c);
                }
            }
        }
    }

    #[test]
    fn change_callbacks_fire_per_mutation() {
        let seen: Rc<RefCell<Vec<GridChange>>> = Rc::default();
        let mut g = GridStore::default();
        let sink = Rc::clone(&seen);
        g.on_change(move |c| sink.borrow_mut().push(*c));

        let a = CellCoord::ground(0, 0);
        let b = CellCoord::ground(1, 0);
        g.set_cell(a, CellData::floor());
        g.set_edge(a, b, true);
        g.set_cell(CellCoord::new(0, 1, 0), CellData::floor());
        g.add_vertical_link(a, CellCoord::new(0, 1, 0), 5).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], GridChange::CellSet(a));
        assert_eq!(
            seen[1],
            GridChange::EdgeSet {
                edge: EdgeKey::new(b, a),
                wall: true
            }
        );
        assert!(matches!(seen[3], GridChange::LinkAdded { .. }));
    }
}
