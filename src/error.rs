//! Error types.
//!
//! Setup conflicts and codec failures are reported to the caller. Running out
//! of search is not an error; see [`crate::solver::SearchOutcome`].

use thiserror::Error;

use crate::grid::Cell;
use crate::moves::Move;

/// A piece was placed into a cell that already holds something.
///
/// The prior occupant is left in place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceError {
    #[error("cell ({x}, {y}, {z}) is already occupied by {occupant}")]
    Occupied {
        x: usize,
        y: usize,
        z: usize,
        occupant: Cell,
    },
}

/// Failure to read a serialized cube state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("expected 27 cell tokens, found {0}")]
    TokenCount(usize),
    #[error("malformed cell token {token:?} at cell {cell}")]
    MalformedToken { cell: usize, token: String },
    #[error("unknown piece kind {label:?} at cell {cell}")]
    UnknownKind { cell: usize, label: String },
    #[error("unknown colour {name:?} at cell {cell}")]
    UnknownColor { cell: usize, name: String },
    #[error("orientation {code:?} is not valid for a {kind} at cell {cell}")]
    BadOrientation {
        cell: usize,
        kind: &'static str,
        code: String,
    },
    #[error("core center must sit at cell 13, found it at cell {0}")]
    CoreCenterMoved(usize),
    #[error("expected exactly one {label}, found {count}")]
    SentinelCount { label: &'static str, count: usize },
}

/// Internal failure of the search driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// No move in the search's move set links two consecutive path states.
    #[error("no move in {moves:?} reproduces step {step} of the reconstructed path")]
    UnmatchedStep { step: usize, moves: Vec<Move> },
}

/// A move name that matches none of the 27 named moves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown move {0:?}")]
pub struct UnknownMove(pub String);
