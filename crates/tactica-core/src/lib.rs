//! **tactica-core** — Tactical grid combat movement (core types).
//!
//! This crate provides the foundational value types used across the
//! *tactica* ecosystem: cell coordinates on a layered battlefield, world
//! space transforms, terrain classification, and movement profiles.

pub mod coord;
pub mod movement;
pub mod terrain;
pub mod transform;

pub use coord::{CellCoord, WorldPoint};
pub use movement::{MovementKind, MovementProfile};
pub use terrain::{CellData, Terrain};
pub use transform::{GridTransform, TransformError};
