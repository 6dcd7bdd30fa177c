//! Named moves.
//!
//! There are nine move families, one per layer. Each family has three forms:
//! a quarter turn (`R`), its inverse (`R_Prime`) and a double turn (`R2`).
//! Exactly one single form of each family is the primitive layer turn; the
//! other single form is three primitive turns and the double is two. Which
//! form is primitive differs between families and is taken as-is from the
//! family table below rather than derived from a rule.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::UnknownMove;
use crate::geometry::{LayerTurn, Spin};
use crate::grid::{Axis, CubeState};

/// One of the nine turnable layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    L,
    R,
    F,
    B,
    U,
    D,
    MiddleRL,
    MiddleFB,
    MiddleUD,
}

/// Which of the three forms of a family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Form {
    Quarter,
    Prime,
    Double,
}

struct FamilySpec {
    turn: LayerTurn,
    /// The single form that is one layer turn.
    primitive: Form,
    /// Names of the quarter, prime and double forms.
    names: [&'static str; 3],
}

const fn family(
    axis: Axis,
    index: usize,
    spin: Spin,
    primitive: Form,
    names: [&'static str; 3],
) -> FamilySpec {
    FamilySpec {
        turn: LayerTurn::new(axis, index, spin),
        primitive,
        names,
    }
}

/// Per-family layer, spin and primitive form, indexed by `Family as usize`.
static FAMILIES: [FamilySpec; 9] = [
    family(Axis::Y, 0, Spin::Clockwise, Form::Quarter, ["L", "L_Prime", "L2"]),
    family(Axis::Y, 2, Spin::Clockwise, Form::Prime, ["R", "R_Prime", "R2"]),
    family(Axis::Z, 2, Spin::Clockwise, Form::Quarter, ["F", "F_Prime", "F2"]),
    family(Axis::Z, 0, Spin::Clockwise, Form::Prime, ["B", "B_Prime", "B2"]),
    family(Axis::X, 0, Spin::Clockwise, Form::Prime, ["U", "U_Prime", "U2"]),
    family(Axis::X, 2, Spin::Clockwise, Form::Quarter, ["D", "D_Prime", "D2"]),
    family(Axis::Y, 1, Spin::Clockwise, Form::Quarter, ["M_RL", "M_RL_Prime", "M_RL_2"]),
    family(Axis::Z, 1, Spin::Clockwise, Form::Quarter, ["M_FB", "M_FB_Prime", "M_FB_2"]),
    family(Axis::X, 1, Spin::CounterClockwise, Form::Prime, ["M_UD", "M_UD_Prime", "M_UD_2"]),
];

impl Family {
    pub const ALL: [Family; 9] = [
        Family::L,
        Family::R,
        Family::F,
        Family::B,
        Family::U,
        Family::D,
        Family::MiddleRL,
        Family::MiddleFB,
        Family::MiddleUD,
    ];

    #[inline]
    fn spec(self) -> &'static FamilySpec {
        &FAMILIES[self as usize]
    }

    /// The layer turn this family is built from.
    pub fn turn(self) -> &'static LayerTurn {
        &self.spec().turn
    }

    /// The form that is a single layer turn.
    pub fn primitive(self) -> Form {
        self.spec().primitive
    }
}

/// A named move: a family and a form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub family: Family,
    pub form: Form,
}

const fn mv(family: Family, form: Form) -> Move {
    Move { family, form }
}

impl Move {
    /// All 27 named moves, grouped by family.
    pub const ALL: [Move; 27] = {
        let mut all = [mv(Family::L, Form::Quarter); 27];
        let forms = [Form::Quarter, Form::Prime, Form::Double];
        let mut i = 0;
        while i < 27 {
            all[i] = mv(Family::ALL[i / 3], forms[i % 3]);
            i += 1;
        }
        all
    };

    /// The quarter turn of every family.
    pub const GENERATORS: [Move; 9] = {
        let mut generators = [mv(Family::L, Form::Quarter); 9];
        let mut i = 0;
        while i < 9 {
            generators[i] = mv(Family::ALL[i], Form::Quarter);
            i += 1;
        }
        generators
    };

    /// The eighteen outer-face forms: single turns first, then doubles.
    pub const FACE_TURNS: [Move; 18] = [
        mv(Family::L, Form::Quarter),
        mv(Family::L, Form::Prime),
        mv(Family::R, Form::Quarter),
        mv(Family::R, Form::Prime),
        mv(Family::F, Form::Quarter),
        mv(Family::F, Form::Prime),
        mv(Family::B, Form::Quarter),
        mv(Family::B, Form::Prime),
        mv(Family::U, Form::Quarter),
        mv(Family::U, Form::Prime),
        mv(Family::D, Form::Quarter),
        mv(Family::D, Form::Prime),
        mv(Family::L, Form::Double),
        mv(Family::R, Form::Double),
        mv(Family::F, Form::Double),
        mv(Family::B, Form::Double),
        mv(Family::U, Form::Double),
        mv(Family::D, Form::Double),
    ];

    pub fn name(self) -> &'static str {
        let names = &self.family.spec().names;
        match self.form {
            Form::Quarter => names[0],
            Form::Prime => names[1],
            Form::Double => names[2],
        }
    }

    /// The move that undoes this one. Doubles are their own inverse.
    pub const fn inverse(self) -> Move {
        let form = match self.form {
            Form::Quarter => Form::Prime,
            Form::Prime => Form::Quarter,
            Form::Double => Form::Double,
        };
        mv(self.family, form)
    }

    /// How many primitive layer turns this move performs.
    pub fn primitive_turns(self) -> usize {
        if self.form == Form::Double {
            2
        } else if self.form == self.family.primitive() {
            1
        } else {
            3
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Move {
    type Err = UnknownMove;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Move::ALL
            .into_iter()
            .find(|candidate| candidate.name() == name)
            .ok_or_else(|| UnknownMove(name.to_string()))
    }
}

/// Move sets the search can expand with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveSet {
    /// The nine quarter turns.
    Generators,
    /// Single and double turns of the six outer faces.
    FaceTurns,
    /// All 27 named moves.
    All,
}

impl MoveSet {
    pub fn moves(self) -> &'static [Move] {
        match self {
            MoveSet::Generators => &Move::GENERATORS,
            MoveSet::FaceTurns => &Move::FACE_TURNS,
            MoveSet::All => &Move::ALL,
        }
    }
}

impl CubeState {
    /// Applies a move in place.
    pub fn apply(&mut self, mv: Move) {
        let turn = mv.family.turn();
        for _ in 0..mv.primitive_turns() {
            turn.apply(self);
        }
    }

    /// Applies moves in order.
    pub fn apply_all(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.apply(mv);
        }
    }

    /// Undoes `moves` by applying their inverses in reverse order.
    pub fn revert_all(&mut self, moves: &[Move]) {
        for &mv in moves.iter().rev() {
            self.apply(mv.inverse());
        }
    }
}

/// Applies `count` moves drawn uniformly from `moves` and returns them.
pub fn scramble<R: Rng + ?Sized>(
    state: &mut CubeState,
    rng: &mut R,
    moves: &[Move],
    count: usize,
) -> Vec<Move> {
    let mut applied = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        state.apply(mv);
        applied.push(mv);
    }
    applied
}

/// Result of applying one move and then its inverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairCheck {
    pub mv: Move,
    pub restored: bool,
}

/// Applies every named move followed by its inverse to a copy of `state`
/// and reports whether the copy came back unchanged.
pub fn check_inverse_pairs(state: &CubeState) -> Vec<PairCheck> {
    Move::ALL
        .into_iter()
        .map(|mv| {
            let mut working = *state;
            working.apply(mv);
            working.apply(mv.inverse());
            PairCheck {
                mv,
                restored: working == *state,
            }
        })
        .collect()
}
