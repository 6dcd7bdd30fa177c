//! Layer rotations and orientation transitions.
//!
//! A quarter turn of a layer does two things, in order: it permutes the nine
//! cells of the layer by a 90 degree rotation, then rewrites the orientation of
//! every piece now sitting on the layer through the table for the layer's
//! axis. Both steps are built from data here; the named moves in
//! [`crate::moves`] only pick a layer, a spin and a repeat count.

use crate::grid::{layer_cell, Axis, Cell, CubeState, DIM, GRID_SIZE};
use crate::pieces::{CornerOrientation, Piece, StraightAxis};

/// Rotation sense of a quarter turn, as seen on the layer's local grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spin {
    /// `(row, col) -> (col, 2 - row)`
    Clockwise,
    /// `(row, col) -> (2 - col, row)`
    CounterClockwise,
}

impl Spin {
    /// Where local position `(row, col)` lands after one quarter turn.
    #[inline(always)]
    pub const fn map(self, row: usize, col: usize) -> (usize, usize) {
        match self {
            Spin::Clockwise => (col, DIM - 1 - row),
            Spin::CounterClockwise => (DIM - 1 - col, row),
        }
    }
}

/// A layer of the cube: the nine cells where `axis` equals `index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layer {
    pub axis: Axis,
    pub index: usize,
}

/// Builds the cell permutation for one quarter turn of a layer.
///
/// `table[src]` is the cell that the occupant of `src` moves to. Cells off
/// the layer map to themselves.
pub const fn build_layer_permutation(layer: Layer, spin: Spin) -> [u8; GRID_SIZE] {
    let mut table = [0u8; GRID_SIZE];

    let mut cell = 0;
    while cell < GRID_SIZE {
        table[cell] = cell as u8;
        cell += 1;
    }

    let mut row = 0;
    while row < DIM {
        let mut col = 0;
        while col < DIM {
            let (dest_row, dest_col) = spin.map(row, col);
            let src = layer_cell(layer.axis, layer.index, row, col);
            let dest = layer_cell(layer.axis, layer.index, dest_row, dest_col);
            table[src] = dest as u8;
            col += 1;
        }
        row += 1;
    }
    table
}

/// Orientation relabeling for one quarter turn about an axis.
///
/// Both halves are total over their domain, so a turn can never produce an
/// out-of-range code.
pub struct OrientationTable {
    corner: [CornerOrientation; 12],
    straight: [StraightAxis; 3],
}

/// Checks corner codes at compile time.
const fn corner_codes(codes: [u8; 12]) -> [CornerOrientation; 12] {
    let mut table = [CornerOrientation::ALL[0]; 12];
    let mut i = 0;
    while i < 12 {
        table[i] = match CornerOrientation::new(codes[i]) {
            Some(orientation) => orientation,
            None => panic!("corner transition out of range"),
        };
        i += 1;
    }
    table
}

/// Checks straight codes at compile time. Codes must already be in `1..=3`.
const fn straight_codes(codes: [u32; 3]) -> [StraightAxis; 3] {
    let mut table = [StraightAxis::Horizontal; 3];
    let mut i = 0;
    while i < 3 {
        assert!(codes[i] >= 1 && codes[i] <= 3, "straight transition out of range");
        table[i] = match StraightAxis::from_code(codes[i]) {
            Some(axis) => axis,
            None => panic!("straight transition out of range"),
        };
        i += 1;
    }
    table
}

/// Turns about the z axis: F, M_FB and B.
pub const Z_TABLE: OrientationTable = OrientationTable {
    corner: corner_codes([3, 7, 11, 8, 2, 4, 10, 12, 1, 5, 9, 6]),
    straight: straight_codes([3, 2, 1]),
};

/// Turns about the x axis: U, M_UD and D.
pub const X_TABLE: OrientationTable = OrientationTable {
    corner: corner_codes([2, 3, 4, 1, 7, 5, 8, 6, 10, 11, 12, 9]),
    straight: straight_codes([2, 1, 3]),
};

/// Turns about the y axis: L, M_RL and R.
pub const Y_TABLE: OrientationTable = OrientationTable {
    corner: corner_codes([5, 10, 7, 2, 9, 1, 11, 3, 6, 12, 8, 4]),
    straight: straight_codes([1, 3, 2]),
};

impl OrientationTable {
    /// The table shared by every layer turning about `axis`.
    pub const fn for_axis(axis: Axis) -> &'static OrientationTable {
        match axis {
            Axis::X => &X_TABLE,
            Axis::Y => &Y_TABLE,
            Axis::Z => &Z_TABLE,
        }
    }

    #[inline]
    pub fn turn_corner(&self, orientation: CornerOrientation) -> CornerOrientation {
        self.corner[(orientation.code() - 1) as usize]
    }

    #[inline]
    pub fn turn_straight(&self, axis: StraightAxis) -> StraightAxis {
        self.straight[(axis.code() - 1) as usize]
    }

    /// The piece after one quarter turn; kind and colour are unchanged.
    #[inline]
    pub fn turn(&self, piece: Piece) -> Piece {
        match piece {
            Piece::Corner { color, orientation } => Piece::Corner {
                color,
                orientation: self.turn_corner(orientation),
            },
            Piece::Straight { color, axis } => Piece::Straight {
                color,
                axis: self.turn_straight(axis),
            },
        }
    }
}

/// One quarter turn of one layer, with its permutation precomputed.
pub struct LayerTurn {
    pub layer: Layer,
    pub spin: Spin,
    permutation: [u8; GRID_SIZE],
    layer_cells: [u8; DIM * DIM],
}

impl LayerTurn {
    pub const fn new(axis: Axis, index: usize, spin: Spin) -> Self {
        let layer = Layer { axis, index };

        let mut layer_cells = [0u8; DIM * DIM];
        let mut row = 0;
        while row < DIM {
            let mut col = 0;
            while col < DIM {
                layer_cells[row * DIM + col] = layer_cell(axis, index, row, col) as u8;
                col += 1;
            }
            row += 1;
        }

        Self {
            layer,
            spin,
            permutation: build_layer_permutation(layer, spin),
            layer_cells,
        }
    }

    #[inline]
    pub fn permutation(&self) -> &[u8; GRID_SIZE] {
        &self.permutation
    }

    /// Applies the turn in place: reposition, then relabel orientations.
    ///
    /// Centers ride the permutation like any occupant but are never
    /// relabeled.
    pub fn apply(&self, state: &mut CubeState) {
        let before = *state.cells();
        let cells = state.cells_mut();

        for (source_cell, &dest_cell) in self.permutation.iter().enumerate() {
            cells[dest_cell as usize] = before[source_cell];
        }

        let table = OrientationTable::for_axis(self.layer.axis);
        for &cell_index in &self.layer_cells {
            let cell = &mut cells[cell_index as usize];
            if let Cell::Piece(piece) = *cell {
                *cell = Cell::Piece(table.turn(piece));
            }
        }
    }
}
