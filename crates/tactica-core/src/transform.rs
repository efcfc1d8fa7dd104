//! World-space ↔ cell-space conversion.

use std::fmt;

use crate::coord::{CellCoord, WorldPoint};

/// Conversion between continuous world positions and discrete cells.
///
/// `world_to_cell` floors each horizontal axis by `cell_size` and the
/// vertical axis by `height_step`. `cell_to_world` returns the cell's
/// center in x/z and its floor height in y, so the two are exact inverses
/// for every integer cell coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridTransform {
    cell_size: f32,
    height_step: f32,
}

impl GridTransform {
    /// One world unit per cell and per layer.
    pub const UNIT: Self = Self {
        cell_size: 1.0,
        height_step: 1.0,
    };

    /// Create a transform. Both sizes must be strictly positive.
    pub fn new(cell_size: f32, height_step: f32) -> Result<Self, TransformError> {
        if !(cell_size > 0.0) {
            return Err(TransformError::NonPositiveCellSize(cell_size));
        }
        if !(height_step > 0.0) {
            return Err(TransformError::NonPositiveHeightStep(height_step));
        }
        Ok(Self {
            cell_size,
            height_step,
        })
    }

    /// Horizontal size of a cell in world units.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Vertical distance between consecutive elevation layers.
    #[inline]
    pub fn height_step(&self) -> f32 {
        self.height_step
    }

    /// The cell containing the given world position.
    #[inline]
    pub fn world_to_cell(&self, p: WorldPoint) -> CellCoord {
        CellCoord::new(
            floor_axis(p.x, self.cell_size),
            floor_axis(p.y, self.height_step),
            floor_axis(p.z, self.cell_size),
        )
    }

    /// World position of a cell: x/z center, y at the cell's floor height.
    #[inline]
    pub fn cell_to_world(&self, c: CellCoord) -> WorldPoint {
        WorldPoint::new(
            (c.x as f32 + 0.5) * self.cell_size,
            c.elevation as f32 * self.height_step,
            (c.z as f32 + 0.5) * self.cell_size,
        )
    }
}

impl Default for GridTransform {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Floor `v / step`, snapping quotients within floating-point noise of an
/// integer onto that integer. A cell's own floor height (elevation ×
/// height_step) must map back into that cell even when the quotient rounds
/// an ulp below the layer boundary.
fn floor_axis(v: f32, step: f32) -> i32 {
    let q = v / step;
    let nearest = q.round();
    let tol = (nearest.abs().max(1.0) * 1e-5).min(0.01);
    if (q - nearest).abs() <= tol {
        nearest as i32
    } else {
        q.floor() as i32
    }
}

/// Invalid transform configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    /// Cell size must be strictly positive.
    NonPositiveCellSize(f32),
    /// Height step must be strictly positive.
    NonPositiveHeightStep(f32),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveCellSize(v) => {
                write!(f, "cell size must be > 0, got {v}")
            }
            Self::NonPositiveHeightStep(v) => {
                write!(f, "height step must be > 0, got {v}")
            }
        }
    }
}

impl std::error::Error for TransformError {}
