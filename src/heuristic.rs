//! Distance estimates from a state to a goal.
//!
//! Neither estimate is admissible; both can overestimate the number of moves
//! left, so a search driven by them is best-first rather than optimal.

use crate::grid::{coord_to_idx, Cell, CubeState, DIM};
use crate::pieces::{Piece, PieceKind};

/// Global: orientation wrong on a corner.
const CORNER_TWISTED: u32 = 3;
/// Global: orientation wrong on a straight.
const STRAIGHT_TWISTED: u32 = 2;
/// Global: right kind, wrong colour.
const WRONG_COLOR: u32 = 5;
/// Global: wrong kind, or a piece where the goal is empty (or the reverse).
const WRONG_KIND: u32 = 7;

/// Alpha scores only this x-layer (the red face on the solved layout).
pub const ALPHA_LAYER: usize = 2;

/// Alpha: corner whose goal orientation is one turn away.
const ALPHA_CORNER_NEAR: u32 = 3;
/// Alpha: corner whose goal orientation is further away.
const ALPHA_CORNER_FAR: u32 = 4;
/// Alpha: straight with the wrong axis.
const ALPHA_STRAIGHT_TWISTED: u32 = 1;
/// Alpha: right colour, wrong kind.
const ALPHA_WRONG_KIND: u32 = 11;
/// Alpha: wrong colour.
const ALPHA_WRONG_COLOR: u32 = 19;

/// For each corner code (row `code - 1`), the six codes reachable by one
/// quarter turn about some axis.
pub const ONE_TURN_AWAY: [[u8; 6]; 12] = [
    [2, 3, 4, 5, 6, 9],
    [1, 3, 4, 5, 7, 10],
    [1, 2, 4, 7, 8, 11],
    [1, 2, 3, 6, 8, 12],
    [1, 2, 6, 7, 9, 10],
    [1, 4, 5, 8, 9, 12],
    [2, 3, 5, 8, 10, 11],
    [3, 4, 6, 7, 11, 12],
    [1, 5, 6, 10, 11, 12],
    [2, 5, 7, 9, 11, 12],
    [3, 7, 8, 9, 10, 12],
    [4, 6, 8, 9, 10, 11],
];

/// Which estimate the search uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// Scores every non-center cell.
    Global,
    /// Experimental first-phase estimate over one layer.
    ///
    /// Meant as the first checkpoint of a multi-phase solve that does not
    /// exist yet. The constants and the adjacency table are provisional.
    Alpha,
}

impl Heuristic {
    pub fn estimate(self, state: &CubeState, goal: &CubeState) -> u32 {
        match self {
            Heuristic::Global => global_estimate(state, goal),
            Heuristic::Alpha => alpha_estimate(state, goal),
        }
    }
}

/// Sums a per-cell penalty over every cell where neither side holds a
/// center. Zero exactly when those cells all match.
pub fn global_estimate(state: &CubeState, goal: &CubeState) -> u32 {
    state
        .cells()
        .iter()
        .zip(goal.cells())
        .filter(|(current, target)| !current.is_sentinel() && !target.is_sentinel())
        .map(|(current, target)| global_cell_score(current, target))
        .sum()
}

fn global_cell_score(current: &Cell, target: &Cell) -> u32 {
    match (current.piece(), target.piece()) {
        (None, None) => 0,
        (Some(current), Some(target)) => {
            if current.kind() != target.kind() {
                WRONG_KIND
            } else if current.color() != target.color() {
                WRONG_COLOR
            } else if current.orientation_code() == target.orientation_code() {
                0
            } else {
                match current.kind() {
                    PieceKind::Corner => CORNER_TWISTED,
                    PieceKind::Straight => STRAIGHT_TWISTED,
                }
            }
        }
        _ => WRONG_KIND,
    }
}

/// Scores the x = [`ALPHA_LAYER`] layer only. Cells that are empty or hold a
/// center on either side are skipped.
pub fn alpha_estimate(state: &CubeState, goal: &CubeState) -> u32 {
    let mut score = 0;
    for y in 0..DIM {
        for z in 0..DIM {
            let cell_index = coord_to_idx(ALPHA_LAYER, y, z);
            let (Some(current), Some(target)) = (
                state.cells()[cell_index].piece(),
                goal.cells()[cell_index].piece(),
            ) else {
                continue;
            };
            score += alpha_piece_score(current, target);
        }
    }
    score
}

fn alpha_piece_score(current: Piece, target: Piece) -> u32 {
    let kind_correct = current.kind() == target.kind();
    let color_correct = current.color() == target.color();

    if !color_correct {
        return ALPHA_WRONG_COLOR;
    }
    if !kind_correct {
        return ALPHA_WRONG_KIND;
    }
    if current.orientation_code() == target.orientation_code() {
        return 0;
    }

    match current {
        Piece::Corner { orientation, .. } => {
            let neighbours = &ONE_TURN_AWAY[(orientation.code() - 1) as usize];
            if neighbours.contains(&target.orientation_code()) {
                ALPHA_CORNER_NEAR
            } else {
                ALPHA_CORNER_FAR
            }
        }
        Piece::Straight { .. } => ALPHA_STRAIGHT_TWISTED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts;
    use crate::moves::{Family, Form, Move};
    use crate::pieces::Color;

    fn single(piece: Option<Piece>) -> CubeState {
        let mut cube = CubeState::new();
        if let Some(piece) = piece {
            cube.place(2, 0, 0, piece).unwrap();
        }
        cube
    }

    #[test]
    fn test_zero_at_goal() {
        for goal in [layouts::solved(), layouts::scrambled(), CubeState::new()] {
            assert_eq!(Heuristic::Global.estimate(&goal, &goal), 0);
            assert_eq!(Heuristic::Alpha.estimate(&goal, &goal), 0);
        }
    }

    #[test]
    fn test_global_cell_policy() {
        let goal = single(Some(Piece::corner(Color::Red, 3)));
        let cases = [
            (Some(Piece::corner(Color::Red, 3)), 0),
            (Some(Piece::corner(Color::Red, 5)), CORNER_TWISTED),
            (Some(Piece::corner(Color::Blue, 3)), WRONG_COLOR),
            (Some(Piece::corner(Color::Blue, 8)), WRONG_COLOR),
            (Some(Piece::straight(Color::Red, 1)), WRONG_KIND),
            (None, WRONG_KIND),
        ];
        for (piece, expected) in cases {
            assert_eq!(global_estimate(&single(piece), &goal), expected, "{piece:?}");
        }

        let straight_goal = single(Some(Piece::straight(Color::Red, 1)));
        let twisted = single(Some(Piece::straight(Color::Red, 2)));
        assert_eq!(global_estimate(&twisted, &straight_goal), STRAIGHT_TWISTED);
        assert_eq!(global_estimate(&single(None), &single(None)), 0);
    }

    #[test]
    fn test_global_skips_centers() {
        // only the secondary center differs; it is never scored
        let goal = CubeState::new();
        let mut moved = CubeState::new();
        moved.apply(Move {
            family: Family::MiddleRL,
            form: Form::Quarter,
        });
        assert_ne!(moved, goal);
        assert_eq!(global_estimate(&moved, &goal), 0);
    }

    #[test]
    fn test_global_is_positive_off_goal() {
        let solved = layouts::solved();
        for mv in Move::ALL {
            let mut cube = solved;
            cube.apply(mv);
            assert!(global_estimate(&cube, &solved) > 0, "{mv}");
        }
    }

    #[test]
    fn test_alpha_cell_policy() {
        let goal = single(Some(Piece::corner(Color::Red, 1)));
        let cases = [
            (Some(Piece::corner(Color::Red, 1)), 0),
            (Some(Piece::corner(Color::Red, 2)), ALPHA_CORNER_NEAR),
            (Some(Piece::corner(Color::Red, 11)), ALPHA_CORNER_FAR),
            (Some(Piece::straight(Color::Red, 1)), ALPHA_WRONG_KIND),
            (Some(Piece::corner(Color::Yellow, 1)), ALPHA_WRONG_COLOR),
            (None, 0),
        ];
        for (piece, expected) in cases {
            assert_eq!(alpha_estimate(&single(piece), &goal), expected, "{piece:?}");
        }

        let straight_goal = single(Some(Piece::straight(Color::Red, 1)));
        let twisted = single(Some(Piece::straight(Color::Red, 3)));
        assert_eq!(alpha_estimate(&twisted, &straight_goal), ALPHA_STRAIGHT_TWISTED);
    }

    #[test]
    fn test_alpha_only_sees_its_layer() {
        let solved = layouts::solved();

        let mut top_turned = solved;
        top_turned.apply("U".parse().unwrap());
        assert_eq!(alpha_estimate(&top_turned, &solved), 0);
        assert!(global_estimate(&top_turned, &solved) > 0);

        let mut bottom_turned = solved;
        bottom_turned.apply("D".parse().unwrap());
        assert!(alpha_estimate(&bottom_turned, &solved) > 0);
    }

    #[test]
    fn test_one_turn_table_is_symmetric() {
        for (row, neighbours) in ONE_TURN_AWAY.iter().enumerate() {
            let code = row as u8 + 1;
            assert!(!neighbours.contains(&code));
            for &other in neighbours {
                assert!(ONE_TURN_AWAY[(other - 1) as usize].contains(&code));
            }
        }
    }
}
