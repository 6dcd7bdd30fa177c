//! CubixTube Puzzle Library
//!
//! Models a 3x3x3 twisty puzzle built from oriented L-shaped corner pieces
//! and straight pieces, and searches for move sequences between states.

pub mod codec;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod heuristic;
pub mod layouts;
pub mod moves;
pub mod pieces;
pub mod solver;

pub use codec::StateKey;
pub use error::{CodecError, PlaceError, SolveError, UnknownMove};
pub use grid::{Cell, CubeState};
pub use heuristic::Heuristic;
pub use moves::{Move, MoveSet};
pub use pieces::{Color, Piece};
pub use solver::{solve, SearchConfig, SearchOutcome, SearchStats, Solution};
