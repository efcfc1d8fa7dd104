//! Movement profiles.

/// How a mover travels. An opaque tag for now: the neighbor and cost rules
/// are identical for every kind, but the tag is threaded through so future
/// flying or burrowing rules do not change call shapes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementKind {
    #[default]
    Walk,
    Fly,
    Burrow,
}

/// Parameters governing how a specific mover traverses the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementProfile {
    /// Movement kind tag.
    pub kind: MovementKind,
    /// Speed budget in distance units (feet).
    pub speed: i32,
    /// Footprint edge length in cells (1 for a standard creature).
    pub footprint: u8,
    /// Whether difficult terrain costs the same as normal terrain.
    pub ignore_difficult: bool,
}

impl MovementProfile {
    /// A walking profile with the given speed, 1×1 footprint, and normal
    /// terrain sensitivity.
    #[inline]
    pub const fn new(speed: i32) -> Self {
        Self {
            kind: MovementKind::Walk,
            speed,
            footprint: 1,
            ignore_difficult: false,
        }
    }

    /// Replace the movement kind.
    #[inline]
    pub const fn with_kind(mut self, kind: MovementKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replace the footprint edge length.
    #[inline]
    pub const fn with_footprint(mut self, footprint: u8) -> Self {
        self.footprint = footprint;
        self
    }

    /// Make the profile insensitive to difficult terrain.
    #[inline]
    pub const fn ignoring_difficult(mut self) -> Self {
        self.ignore_difficult = true;
        self
    }
}
