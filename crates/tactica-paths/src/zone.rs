//! Budgeted reachable-set computation.

use std::collections::HashMap;

use tactica_core::{CellCoord, MovementProfile};
use tactica_grid::{GridStore, StepKind};
use tactica_occupancy::{EntityId, OccupancyMap, TeamResolver};

use crate::Pathfinder;
use crate::cost::{Parity, step_cost};
use crate::pathfinder::{Blocking, NodeRef, NodeState, Occupied, SearchKey, Unobstructed};

/// Every cell reachable within a movement budget, mapped to its minimum
/// cost. Cleared and repopulated by each
/// [`movement_zone`](Pathfinder::movement_zone) call.
#[derive(Default)]
pub struct MovementZone {
    costs: HashMap<CellCoord, i32>,
}

impl MovementZone {
    /// Create an empty zone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.costs.clear();
    }

    /// Number of reachable cells.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Whether the zone is empty.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Minimum cost to reach `cell`, if it is in the zone.
    #[inline]
    pub fn cost_of(&self, cell: CellCoord) -> Option<i32> {
        self.costs.get(&cell).copied()
    }

    /// Whether `cell` is in the zone.
    #[inline]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.costs.contains_key(&cell)
    }

    /// Iterate over (cell, cost) entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, i32)> + '_ {
        self.costs.iter().map(|(&c, &g)| (c, g))
    }

    /// The cheapest zone cell planar-adjacent to `target` (the "closest
    /// reachable cell next to a target" query). Ties break toward the
    /// smallest coordinate so the answer is deterministic.
    pub fn cheapest_adjacent_to(&self, target: CellCoord) -> Option<(CellCoord, i32)> {
        let mut best: Option<(CellCoord, i32)> = None;
        for dz in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dz == 0 {
                    continue;
                }
                let cell = target.shift(dx, dz);
                let Some(cost) = self.cost_of(cell) else {
                    continue;
                };
                let better = match best {
                    None => true,
                    Some((bc, bg)) => cost < bg || (cost == bg && cell < bc),
                };
                if better {
                    best = Some((cell, cost));
                }
            }
        }
        best
    }

    /// Record `cost` for `cell`, keeping an existing lower cost.
    fn record_min(&mut self, cell: CellCoord, cost: i32) {
        self.costs
            .entry(cell)
            .and_modify(|g| *g = (*g).min(cost))
            .or_insert(cost);
    }
}

impl Pathfinder {
    /// Compute every cell reachable from `origin` at cost ≤ `budget`,
    /// writing minimum costs into `zone` (cleared first).
    ///
    /// The origin is always in the zone at cost 0. Expansion applies the
    /// same step-cost rules as [`find_path`](Pathfinder::find_path),
    /// tracking diagonal parity per discovered state; a cell's recorded
    /// cost is the minimum over its parity states.
    pub fn movement_zone(
        &mut self,
        grid: &GridStore,
        origin: CellCoord,
        profile: &MovementProfile,
        budget: i32,
        zone: &mut MovementZone,
    ) {
        self.movement_zone_inner(grid, origin, profile, budget, &Unobstructed, zone);
    }

    /// [`movement_zone`](Pathfinder::movement_zone) with occupancy: cells
    /// held by the mover's enemies are pruned from expansion entirely;
    /// cells held by anyone else may be moved *through* but never appear
    /// in the zone, and do not raise the cost of the cells beyond them.
    pub fn movement_zone_occupied<R>(
        &mut self,
        grid: &GridStore,
        origin: CellCoord,
        profile: &MovementProfile,
        budget: i32,
        mover: EntityId,
        occupancy: &OccupancyMap,
        teams: &R,
        zone: &mut MovementZone,
    ) where
        R: TeamResolver + ?Sized,
    {
        let blocking = Occupied {
            mover,
            map: occupancy,
            teams,
        };
        self.movement_zone_inner(grid, origin, profile, budget, &blocking, zone);
    }

    fn movement_zone_inner<B: Blocking>(
        &mut self,
        grid: &GridStore,
        origin: CellCoord,
        profile: &MovementProfile,
        budget: i32,
        blocking: &B,
        zone: &mut MovementZone,
    ) {
        zone.clear();
        zone.record_min(origin, 0);
        if !grid.is_passable(origin) || budget <= 0 {
            return;
        }

        self.nodes.clear();
        self.open.clear();

        let origin_key = SearchKey {
            cell: origin,
            parity: Parity::Even,
        };
        self.nodes.insert(
            origin_key,
            NodeState {
                g: 0,
                parent: None,
                open: true,
            },
        );
        self.open.push(NodeRef {
            key: origin_key,
            f: 0,
        });

        let mut open = std::mem::take(&mut self.open);
        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ck = current.key;
            let Some(node) = self.nodes.get_mut(&ck) else {
                continue;
            };
            if !node.open {
                continue;
            }
            node.open = false;
            let current_g = node.g;

            if blocking.may_stop(ck.cell) {
                zone.record_min(ck.cell, current_g);
            }

            grid.neighbors(ck.cell, profile.kind, &mut nbuf);
            for i in 0..nbuf.len() {
                let step = nbuf[i];
                if step.cell != origin && !blocking.may_enter(step.cell) {
                    continue;
                }
                let Some(dest) = grid.cell(step.cell) else {
                    continue;
                };
                let tentative = current_g + step_cost(step.kind, ck.parity, dest, profile);
                if tentative > budget {
                    continue;
                }
                let next_key = SearchKey {
                    cell: step.cell,
                    parity: match step.kind {
                        StepKind::Diagonal => ck.parity.flip(),
                        _ => ck.parity,
                    },
                };

                match self.nodes.get_mut(&next_key) {
                    Some(n) if tentative >= n.g => continue,
                    Some(n) => {
                        n.g = tentative;
                        n.open = true;
                    }
                    None => {
                        self.nodes.insert(
                            next_key,
                            NodeState {
                                g: tentative,
                                parent: None,
                                open: true,
                            },
                        );
                    }
                }
                open.push(NodeRef {
                    key: next_key,
                    f: tentative,
                });
            }
        }

        self.open = open;
        self.nbuf = nbuf;
    }
}
