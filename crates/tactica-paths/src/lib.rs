//! **tactica-paths** — Pathfinding for tactical grid combat.
//!
//! Stateless movement queries over a [`tactica_grid::GridStore`]:
//!
//! - **Single-path search** ([`Pathfinder::find_path`]) — lowest-cost path
//!   between two cells via A*.
//! - **Movement zones** ([`Pathfinder::movement_zone`]) — every cell
//!   reachable within a budget, mapped to its minimum cost, via budgeted
//!   Dijkstra.
//! - Occupancy-aware variants of both, which prune enemy-held cells and
//!   keep ally-held cells transit-only.
//!
//! Step costs follow the tabletop convention: 5 distance units per cardinal
//! step, diagonals alternating 5/10 along each path, both scaled by the
//! destination's terrain multiplier; vertical links contribute their fixed
//! cost. Because a diagonal's price depends on how many diagonals precede
//! it on the path, the search state is `(cell, parity)`, not just the cell
//! — the two parity states of a cell are optimized independently.
//!
//! All queries go through a [`Pathfinder`], which owns and reuses internal
//! caches so repeated queries incur no heap-structure rebuilds, and clears
//! every caller-supplied output buffer before repopulating it.

mod astar;
mod cost;
mod distance;
mod pathfinder;
mod zone;

pub use cost::{BASE_STEP_COST, Parity, step_cost};
pub use distance::{chebyshev, diagonal_distance, manhattan};
pub use pathfinder::Pathfinder;
pub use zone::MovementZone;
