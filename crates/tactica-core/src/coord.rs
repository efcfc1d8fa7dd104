//! Geometry primitives: [`CellCoord`] and [`WorldPoint`].

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// CellCoord
// ---------------------------------------------------------------------------

/// A discrete battlefield cell: x/z in the horizontal plane plus an
/// elevation layer index.
///
/// Elevation is a layer number, not a height in world units. Two layers are
/// never adjacent on their own — they connect only through explicitly
/// registered vertical links.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub x: i32,
    pub elevation: i32,
    pub z: i32,
}

impl CellCoord {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self {
        x: 0,
        elevation: 0,
        z: 0,
    };

    /// Create a new cell coordinate.
    #[inline]
    pub const fn new(x: i32, elevation: i32, z: i32) -> Self {
        Self { x, elevation, z }
    }

    /// A ground-layer coordinate (elevation 0).
    #[inline]
    pub const fn ground(x: i32, z: i32) -> Self {
        Self {
            x,
            elevation: 0,
            z,
        }
    }

    /// Return a coordinate shifted by (dx, dz) within the same layer.
    #[inline]
    pub const fn shift(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            elevation: self.elevation,
            z: self.z + dz,
        }
    }

    /// The same planar position on another elevation layer.
    #[inline]
    pub const fn at_elevation(self, elevation: i32) -> Self {
        Self {
            x: self.x,
            elevation,
            z: self.z,
        }
    }

    /// Planar delta (dx, dz) from `self` to `other`, ignoring elevation.
    #[inline]
    pub const fn planar_delta(self, other: Self) -> (i32, i32) {
        (other.x - self.x, other.z - self.z)
    }

    /// Whether `other` sits on the same elevation layer.
    #[inline]
    pub const fn same_layer(self, other: Self) -> bool {
        self.elevation == other.elevation
    }
}

impl PartialOrd for CellCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.elevation
            .cmp(&other.elevation)
            .then(self.z.cmp(&other.z))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.elevation, self.z)
    }
}

impl Add for CellCoord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x + rhs.x,
            self.elevation + rhs.elevation,
            self.z + rhs.z,
        )
    }
}

impl Sub for CellCoord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x - rhs.x,
            self.elevation - rhs.elevation,
            self.z - rhs.z,
        )
    }
}

// ---------------------------------------------------------------------------
// WorldPoint
// ---------------------------------------------------------------------------

/// A continuous world-space position. Y is the vertical axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPoint {
    /// Create a new world point.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
