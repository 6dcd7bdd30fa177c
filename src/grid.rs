//! Cube state: a fixed 3x3x3 store of cells.
//!
//! The store is a flat array indexed x-major. Faces and layers are not
//! objects of their own; they are fixed-coordinate slices over the same 27
//! cells, which is what the move engine rewrites.

use std::fmt;

use crate::error::PlaceError;
use crate::pieces::Piece;

/// Cells per axis.
pub const DIM: usize = 3;

/// Total cells in the cube.
pub const GRID_SIZE: usize = DIM * DIM * DIM;

/// Cell index of the core center, (1, 1, 1).
pub const CORE_CENTER: usize = coord_to_idx(1, 1, 1);

/// Cell index where the secondary center starts, (1, 1, 0).
pub const SECONDARY_CENTER_HOME: usize = coord_to_idx(1, 1, 0);

/// Token for an empty cell.
pub const EMPTY_TOKEN: &str = "None";
/// Token for the core center.
pub const CORE_CENTER_TOKEN: &str = "Center";
/// Token for the secondary (blue) center.
pub const SECONDARY_CENTER_TOKEN: &str = "Blue Center";

/// Contents of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    /// Fixed center at (1, 1, 1).
    CoreCenter,
    /// Blue center cap; never re-oriented or overwritten.
    SecondaryCenter,
    Piece(Piece),
}

impl Cell {
    #[inline]
    pub const fn piece(&self) -> Option<Piece> {
        match self {
            Cell::Piece(piece) => Some(*piece),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Cell::CoreCenter | Cell::SecondaryCenter)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Compact label for slice printouts, e.g. `Rc3` or `Bs1`.
    fn short_label(&self) -> String {
        match self {
            Cell::Empty => ".".to_string(),
            Cell::CoreCenter => "C*".to_string(),
            Cell::SecondaryCenter => "B*".to_string(),
            Cell::Piece(piece) => {
                let shape = match piece {
                    Piece::Corner { .. } => 'c',
                    Piece::Straight { .. } => 's',
                };
                format!(
                    "{}{}{}",
                    piece.color().initial(),
                    shape,
                    piece.orientation_code()
                )
            }
        }
    }
}

impl fmt::Display for Cell {
    /// Writes the serialized token for this cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => f.write_str(EMPTY_TOKEN),
            Cell::CoreCenter => f.write_str(CORE_CENTER_TOKEN),
            Cell::SecondaryCenter => f.write_str(SECONDARY_CENTER_TOKEN),
            Cell::Piece(piece) => write!(f, "{piece}"),
        }
    }
}

/// A coordinate axis. Layers are named by the axis held fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// Converts (x, y, z) coordinates to a linear cell index.
///
/// Index order is x-major: `idx = x * DIM * DIM + y * DIM + z`. The codec
/// walks cells in the same order.
#[inline(always)]
pub const fn coord_to_idx(x: usize, y: usize, z: usize) -> usize {
    x * DIM * DIM + y * DIM + z
}

/// Converts a linear cell index to (x, y, z) coordinates.
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize) -> (usize, usize, usize) {
    (
        cell_index / (DIM * DIM),
        (cell_index / DIM) % DIM,
        cell_index % DIM,
    )
}

/// Cell index of local position `(row, col)` on the layer where `axis` is
/// held at `index`. Row and column are the two free coordinates in x, y, z
/// order.
#[inline(always)]
pub const fn layer_cell(axis: Axis, index: usize, row: usize, col: usize) -> usize {
    match axis {
        Axis::X => coord_to_idx(index, row, col),
        Axis::Y => coord_to_idx(row, index, col),
        Axis::Z => coord_to_idx(row, col, index),
    }
}

/// The full puzzle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeState {
    cells: [Cell; GRID_SIZE],
}

impl Default for CubeState {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeState {
    /// An empty cube holding only the two centers in their home cells.
    pub fn new() -> Self {
        let mut cells = [Cell::Empty; GRID_SIZE];
        cells[CORE_CENTER] = Cell::CoreCenter;
        cells[SECONDARY_CENTER_HOME] = Cell::SecondaryCenter;
        Self { cells }
    }

    /// Wraps raw cells. Callers are responsible for the sentinel invariants.
    pub(crate) const fn from_cells(cells: [Cell; GRID_SIZE]) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell; GRID_SIZE] {
        &self.cells
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell; GRID_SIZE] {
        &mut self.cells
    }

    /// Puts a piece into an empty cell.
    ///
    /// This is a setup operation. An occupied cell (including a center) is
    /// left untouched and reported.
    pub fn place(&mut self, x: usize, y: usize, z: usize, piece: Piece) -> Result<(), PlaceError> {
        let cell = &mut self.cells[coord_to_idx(x, y, z)];
        if !cell.is_empty() {
            return Err(PlaceError::Occupied {
                x,
                y,
                z,
                occupant: *cell,
            });
        }
        *cell = Cell::Piece(piece);
        Ok(())
    }

    /// Returns the occupant of a cell. Coordinates must be in `0..3`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Cell {
        self.cells[coord_to_idx(x, y, z)]
    }

    /// The 3x3 grid of occupants where `axis` is held at `index`.
    ///
    /// Rows and columns are the two free coordinates in x, y, z order, so the
    /// z = 2 slice is indexed `[x][y]`.
    pub fn slice_view(&self, axis: Axis, index: usize) -> [[Cell; DIM]; DIM] {
        let mut view = [[Cell::Empty; DIM]; DIM];
        for (row, cells) in view.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.cells[layer_cell(axis, index, row, col)];
            }
        }
        view
    }

    /// All non-empty cells with their coordinates, in index order.
    pub fn occupied(&self) -> impl Iterator<Item = ((usize, usize, usize), Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(idx, &cell)| (idx_to_coord(idx), cell))
    }

    /// Number of movable pieces on the cube.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.piece().is_some()).count()
    }
}

/// Formats the state as three z-slices, front (z = 2) to back (z = 0).
///
/// Each slice prints rows by x and columns by y. Pieces show as colour,
/// shape (`c` corner, `s` straight) and orientation code; `.` is empty,
/// `C*` the core center and `B*` the secondary center.
pub fn format_slices(state: &CubeState) -> String {
    const SLICES: [(usize, &str); DIM] = [(2, "front"), (1, "middle"), (0, "back")];

    let mut output = String::new();
    for (slice_number, &(z, name)) in SLICES.iter().enumerate() {
        if slice_number > 0 {
            output.push('\n');
        }
        output.push_str(&format!("z={z} ({name})\n"));
        for row in state.slice_view(Axis::Z, z) {
            let labels: Vec<String> = row
                .iter()
                .map(|cell| format!("{:<4}", cell.short_label()))
                .collect();
            output.push_str(labels.join(" ").trim_end());
            output.push('\n');
        }
    }

    output
}
