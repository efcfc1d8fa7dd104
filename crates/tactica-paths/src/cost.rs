//! Step-cost rules shared by the path search and the zone fill.

use tactica_core::{CellData, MovementProfile, Terrain};
use tactica_grid::StepKind;

/// Base cost of one cardinal step, in distance units (feet).
pub const BASE_STEP_COST: i32 = 5;

/// Count (mod 2) of diagonal steps taken so far along a path.
///
/// Determines the price of the *next* diagonal step: 5 at even parity,
/// 10 at odd, matching the tabletop alternating-diagonal convention.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Parity {
    #[default]
    Even,
    Odd,
}

impl Parity {
    /// Parity after one more diagonal step.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Parity::Even => Parity::Odd,
            Parity::Odd => Parity::Even,
        }
    }
}

/// Cost of entering `dest` by a step of the given kind, with the given
/// diagonal parity accumulated so far.
///
/// Cardinal steps cost 5, diagonals 5 or 10 by parity, vertical steps
/// their link's fixed cost; all scaled by the destination's terrain
/// multiplier unless the profile ignores difficult terrain. Only diagonal
/// steps advance parity; cardinal and vertical steps leave it unchanged.
pub fn step_cost(kind: StepKind, parity: Parity, dest: CellData, profile: &MovementProfile) -> i32 {
    let base = match kind {
        StepKind::Cardinal => BASE_STEP_COST,
        StepKind::Diagonal => match parity {
            Parity::Even => BASE_STEP_COST,
            Parity::Odd => 2 * BASE_STEP_COST,
        },
        StepKind::Vertical { cost } => cost,
    };
    let multiplier = if profile.ignore_difficult && dest.terrain == Terrain::Difficult {
        1
    } else {
        dest.terrain.cost_multiplier()
    };
    base * multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_costs() {
        let p = MovementProfile::new(30);
        assert_eq!(
            step_cost(StepKind::Cardinal, Parity::Even, CellData::floor(), &p),
            5
        );
        assert_eq!(
            step_cost(StepKind::Cardinal, Parity::Odd, CellData::floor(), &p),
            5
        );
        assert_eq!(
            step_cost(StepKind::Cardinal, Parity::Even, CellData::difficult(), &p),
            10
        );
    }

    #[test]
    fn diagonal_alternation() {
        let p = MovementProfile::new(30);
        assert_eq!(
            step_cost(StepKind::Diagonal, Parity::Even, CellData::floor(), &p),
            5
        );
        assert_eq!(
            step_cost(StepKind::Diagonal, Parity::Odd, CellData::floor(), &p),
            10
        );
        // Terrain multiplies the alternation value.
        assert_eq!(
            step_cost(StepKind::Diagonal, Parity::Odd, CellData::difficult(), &p),
            20
        );
    }

    #[test]
    fn vertical_uses_link_cost_times_multiplier() {
        let p = MovementProfile::new(30);
        let step = StepKind::Vertical { cost: 15 };
        assert_eq!(step_cost(step, Parity::Even, CellData::floor(), &p), 15);
        assert_eq!(step_cost(step, Parity::Odd, CellData::difficult(), &p), 30);
    }

    #[test]
    fn ignore_difficult_flattens_the_multiplier() {
        let p = MovementProfile::new(30).ignoring_difficult();
        assert_eq!(
            step_cost(StepKind::Cardinal, Parity::Even, CellData::difficult(), &p),
            5
        );
        assert_eq!(
            step_cost(StepKind::Diagonal, Parity::Odd, CellData::difficult(), &p),
            10
        );
    }

    #[test]
    fn parity_flip() {
        assert_eq!(Parity::Even.flip(), Parity::Odd);
        assert_eq!(Parity::Odd.flip(), Parity::Even);
        assert_eq!(Parity::default(), Parity::Even);
    }
}
