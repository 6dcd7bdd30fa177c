//! Fixture layouts.
//!
//! A layout lists the three z-layers of a cube as 3x3 grids indexed
//! `[x][y]`. The factories return freshly owned states; nothing here is
//! shared between callers.

use log::warn;

use crate::grid::{CubeState, DIM};
use crate::pieces::Color::{self, Blue, Red, Yellow};
use crate::pieces::Piece;

/// One cell of a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Empty,
    /// Marks where a center sits; skipped when filling since the cube
    /// supplies its own centers.
    Center,
    Piece(Piece),
}

/// One z-layer of a layout, indexed `[x][y]`.
pub type LayerSpec = [[Slot; DIM]; DIM];

const fn corner(color: Color, code: u8) -> Slot {
    Slot::Piece(Piece::corner(color, code))
}

const fn straight(color: Color, code: u32) -> Slot {
    Slot::Piece(Piece::straight(color, code))
}

/// Solved layout, front layer (z = 2).
pub const SOLVED_FRONT: LayerSpec = [
    [corner(Blue, 8), straight(Blue, 9), corner(Blue, 4)],
    [corner(Yellow, 12), corner(Yellow, 3), corner(Yellow, 6)],
    [corner(Red, 3), straight(Red, 1), corner(Red, 6)],
];

/// Solved layout, middle layer (z = 1).
pub const SOLVED_MIDDLE: LayerSpec = [
    [straight(Blue, 2), Slot::Center, straight(Blue, 2)],
    [straight(Yellow, 2), Slot::Center, straight(Yellow, 2)],
    [corner(Red, 8), straight(Red, 1), corner(Red, 5)],
];

/// Solved layout, back layer (z = 0).
pub const SOLVED_BACK: LayerSpec = [
    [corner(Blue, 7), straight(Blue, 1), corner(Blue, 5)],
    [corner(Yellow, 7), Slot::Center, corner(Yellow, 5)],
    [corner(Red, 7), straight(Red, 1), corner(Red, 9)],
];

/// Hand-entered scramble, front layer (z = 2).
pub const SCRAMBLED_FRONT: LayerSpec = [
    [corner(Red, 7), straight(Red, 1), corner(Red, 9)],
    [straight(Blue, 3), straight(Red, 1), straight(Red, 3)],
    [corner(Blue, 4), corner(Red, 6), corner(Red, 4)],
];

/// Hand-entered scramble, middle layer (z = 1).
pub const SCRAMBLED_MIDDLE: LayerSpec = [
    [corner(Red, 12), straight(Yellow, 1), corner(Yellow, 9)],
    [straight(Yellow, 3), Slot::Center, straight(Yellow, 2)],
    [corner(Yellow, 3), corner(Yellow, 5), corner(Yellow, 1)],
];

/// Hand-entered scramble, back layer (z = 0).
pub const SCRAMBLED_BACK: LayerSpec = [
    [corner(Red, 7), corner(Yellow, 9), corner(Blue, 7)],
    [straight(Blue, 3), Slot::Center, straight(Blue, 3)],
    [corner(Blue, 3), corner(Blue, 7), corner(Blue, 1)],
];

/// Places every piece of `layer` at depth `z`.
///
/// Conflicts are logged and skipped. Returns how many pieces were placed.
pub fn fill_layer(state: &mut CubeState, z: usize, layer: &LayerSpec) -> usize {
    let mut placed = 0;
    for (x, row) in layer.iter().enumerate() {
        for (y, slot) in row.iter().enumerate() {
            let Slot::Piece(piece) = *slot else {
                continue;
            };
            match state.place(x, y, z, piece) {
                Ok(()) => placed += 1,
                Err(e) => warn!("layout conflict at z={z}: {e}"),
            }
        }
    }
    placed
}

/// Builds a cube from its back, middle and front layers.
pub fn build(back: &LayerSpec, middle: &LayerSpec, front: &LayerSpec) -> CubeState {
    let mut state = CubeState::new();
    fill_layer(&mut state, 2, front);
    fill_layer(&mut state, 1, middle);
    fill_layer(&mut state, 0, back);
    state
}

/// The solved cube. 24 pieces.
pub fn solved() -> CubeState {
    build(&SOLVED_BACK, &SOLVED_MIDDLE, &SOLVED_FRONT)
}

/// A hand-entered scramble. 25 pieces.
///
/// It holds one more piece than [`solved`], so no move sequence connects the
/// two. Use it for display and scoring, and build searchable scrambles by
/// applying moves to [`solved`].
pub fn scrambled() -> CubeState {
    build(&SCRAMBLED_BACK, &SCRAMBLED_MIDDLE, &SCRAMBLED_FRONT)
}
