//! Single-path search.

use tactica_core::{CellCoord, MovementProfile};
use tactica_grid::{GridStore, StepKind};
use tactica_occupancy::{EntityId, OccupancyMap, TeamResolver};

use crate::Pathfinder;
use crate::cost::{Parity, step_cost};
use crate::pathfinder::{Blocking, NodeRef, NodeState, Occupied, SearchKey, Unobstructed, estimate};

impl Pathfinder {
    /// Compute the lowest-cost path from `start` to `goal`.
    ///
    /// `path` is cleared, then filled with the full path including both
    /// endpoints. Returns the total cost, or `None` if no path exists (the
    /// buffer is left empty). Any lowest-cost path may be returned; the
    /// cost is exact.
    pub fn find_path(
        &mut self,
        grid: &GridStore,
        start: CellCoord,
        goal: CellCoord,
        profile: &MovementProfile,
        path: &mut Vec<CellCoord>,
    ) -> Option<i32> {
        self.find_path_inner(grid, start, goal, profile, &Unobstructed, path)
    }

    /// [`find_path`](Self::find_path) with occupancy: cells held by the
    /// mover's enemies cannot be entered at all, and a cell held by *any*
    /// other entity cannot be the goal, though the path may pass through
    /// ally- and neutral-held cells.
    pub fn find_path_occupied<R>(
        &mut self,
        grid: &GridStore,
        start: CellCoord,
        goal: CellCoord,
        profile: &MovementProfile,
        mover: EntityId,
        occupancy: &OccupancyMap,
        teams: &R,
        path: &mut Vec<CellCoord>,
    ) -> Option<i32>
    where
        R: TeamResolver + ?Sized,
    {
        let blocking = Occupied {
            mover,
            map: occupancy,
            teams,
        };
        self.find_path_inner(grid, start, goal, profile, &blocking, path)
    }

    fn find_path_inner<B: Blocking>(
        &mut self,
        grid: &GridStore,
        start: CellCoord,
        goal: CellCoord,
        profile: &MovementProfile,
        blocking: &B,
        path: &mut Vec<CellCoord>,
    ) -> Option<i32> {
        path.clear();

        if !grid.is_passable(start) || !grid.is_passable(goal) {
            return None;
        }
        if !blocking.may_stop(goal) {
            return None;
        }
        if start == goal {
            path.push(start);
            return Some(0);
        }

        self.nodes.clear();
        self.open.clear();

        let start_key = SearchKey {
            cell: start,
            parity: Parity::Even,
        };
        self.nodes.insert(
            start_key,
            NodeState {
                g: 0,
                parent: None,
                open: true,
            },
        );
        self.open.push(NodeRef {
            key: start_key,
            f: estimate(grid, start, goal),
        });

        let mut open = std::mem::take(&mut self.open);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found: Option<SearchKey> = None;

        while let Some(current) = open.pop() {
            let ck = current.key;
            // Skip stale heap entries for already-expanded states.
            let Some(node) = self.nodes.get_mut(&ck) else {
                continue;
            };
            if !node.open {
                continue;
            }
            if ck.cell == goal {
                found = Some(ck);
                break;
            }
            node.open = false;
            let current_g = node.g;

            grid.neighbors(ck.cell, profile.kind, &mut nbuf);
            for i in 0..nbuf.len() {
                let step = nbuf[i];
                // The start cell is exempt: the mover already stands there.
                if step.cell != start && !blocking.may_enter(step.cell) {
                    continue;
                }
                let Some(dest) = grid.cell(step.cell) else {
                    continue;
                };
                let tentative = current_g + step_cost(step.kind, ck.parity, dest, profile);
                let next_parity = match step.kind {
                    StepKind::Diagonal => ck.parity.flip(),
                    _ => ck.parity,
                };
                let next_key = SearchKey {
                    cell: step.cell,
                    parity: next_parity,
                };

                match self.nodes.get_mut(&next_key) {
                    Some(n) if tentative >= n.g => continue,
                    Some(n) => {
                        n.g = tentative;
                        n.parent = Some(ck);
                        n.open = true;
                    }
                    None => {
                        self.nodes.insert(
                            next_key,
                            NodeState {
                                g: tentative,
                                parent: Some(ck),
                                open: true,
                            },
                        );
                    }
                }
                open.push(NodeRef {
                    key: next_key,
                    f: tentative + estimate(grid, step.cell, goal),
                });
            }
        }

        self.open = open;
        self.nbuf = nbuf;

        let goal_key = found?;
        let total = self.nodes[&goal_key].g;

        // Reconstruct by walking parent pointers.
        let mut cursor = Some(goal_key);
        while let Some(k) = cursor {
            path.push(k.cell);
            cursor = self.nodes[&k].parent;
        }
        path.reverse();
        Some(total)
    }
}
