//! State encoding.
//!
//! Two forms share one cell order (x outer, z inner, see
//! [`crate::grid::coord_to_idx`]):
//!
//! - the text form, 27 tokens joined by `|`. Each token is `None`, `Center`,
//!   `Blue Center` or `<Kind>-<Color>-<Orientation>`, e.g.
//!   `CornerPiece-Red-3`. This is the only persisted representation and has
//!   no version tag.
//! - [`StateKey`], one byte per cell, used as the search-graph node key.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::error::CodecError;
use crate::grid::{
    Cell, CubeState, CORE_CENTER, CORE_CENTER_TOKEN, EMPTY_TOKEN, GRID_SIZE,
    SECONDARY_CENTER_TOKEN,
};
use crate::pieces::{Color, CornerOrientation, Piece, PieceKind, StraightAxis};

/// Separator between cell tokens. No token contains it.
pub const DELIMITER: char = '|';

/// Writes the text form of a state.
pub fn encode(state: &CubeState) -> String {
    let tokens: Vec<String> = state.cells().iter().map(|cell| cell.to_string()).collect();
    tokens.join(&DELIMITER.to_string())
}

/// Reads the text form of a state.
///
/// Straight orientation codes above 3 are folded into `1..=3`. The core
/// center must be in its fixed cell and the secondary center must appear
/// exactly once.
pub fn decode(text: &str) -> Result<CubeState, CodecError> {
    let tokens: Vec<&str> = text.split(DELIMITER).collect();
    if tokens.len() != GRID_SIZE {
        return Err(CodecError::TokenCount(tokens.len()));
    }

    let mut cells = [Cell::Empty; GRID_SIZE];
    for (cell_index, token) in tokens.into_iter().enumerate() {
        cells[cell_index] = decode_cell(cell_index, token)?;
    }

    check_sentinels(&cells)?;
    Ok(CubeState::from_cells(cells))
}

fn decode_cell(cell: usize, token: &str) -> Result<Cell, CodecError> {
    match token {
        EMPTY_TOKEN => return Ok(Cell::Empty),
        CORE_CENTER_TOKEN => return Ok(Cell::CoreCenter),
        SECONDARY_CENTER_TOKEN => return Ok(Cell::SecondaryCenter),
        _ => {}
    }

    let mut parts = token.split('-');
    let (Some(label), Some(color_name), Some(code), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(CodecError::MalformedToken {
            cell,
            token: token.to_string(),
        });
    };

    let kind = PieceKind::from_label(label).ok_or_else(|| CodecError::UnknownKind {
        cell,
        label: label.to_string(),
    })?;
    let color = Color::from_name(color_name).ok_or_else(|| CodecError::UnknownColor {
        cell,
        name: color_name.to_string(),
    })?;
    let piece = code
        .parse::<u32>()
        .ok()
        .and_then(|code| Piece::try_new(kind, color, code))
        .ok_or_else(|| CodecError::BadOrientation {
            cell,
            kind: kind.label(),
            code: code.to_string(),
        })?;

    Ok(Cell::Piece(piece))
}

fn check_sentinels(cells: &[Cell; GRID_SIZE]) -> Result<(), CodecError> {
    let mut core_count = 0;
    let mut secondary_count = 0;
    for (cell_index, cell) in cells.iter().enumerate() {
        match cell {
            Cell::CoreCenter => {
                if cell_index != CORE_CENTER {
                    return Err(CodecError::CoreCenterMoved(cell_index));
                }
                core_count += 1;
            }
            Cell::SecondaryCenter => secondary_count += 1,
            _ => {}
        }
    }

    if core_count != 1 {
        return Err(CodecError::SentinelCount {
            label: CORE_CENTER_TOKEN,
            count: core_count,
        });
    }
    if secondary_count != 1 {
        return Err(CodecError::SentinelCount {
            label: SECONDARY_CENTER_TOKEN,
            count: secondary_count,
        });
    }
    Ok(())
}

/// Tag values for the packed key.
const TAG_EMPTY: u8 = 0;
const TAG_CORE_CENTER: u8 = 1;
const TAG_SECONDARY_CENTER: u8 = 2;
/// Corners take 36 tags: colour * 12 + (code - 1).
const TAG_CORNER_BASE: u8 = 3;
/// Straights take 9 tags: colour * 3 + (code - 1).
const TAG_STRAIGHT_BASE: u8 = TAG_CORNER_BASE + 36;

/// Packed search key: one tag byte per cell in codec order.
///
/// Ordering is byte-wise, which gives the search a deterministic tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey([u8; GRID_SIZE]);

impl StateKey {
    pub fn from_state(state: &CubeState) -> Self {
        let mut bytes = [TAG_EMPTY; GRID_SIZE];
        for (byte, cell) in bytes.iter_mut().zip(state.cells()) {
            *byte = pack_cell(cell);
        }
        Self(bytes)
    }

    /// Rebuilds the state this key was packed from.
    pub fn to_state(&self) -> CubeState {
        let mut cells = [Cell::Empty; GRID_SIZE];
        for (cell, &byte) in cells.iter_mut().zip(&self.0) {
            *cell = unpack_cell(byte);
        }
        CubeState::from_cells(cells)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; GRID_SIZE] {
        &self.0
    }

    /// A hash that is stable across runs and platforms.
    pub fn hash64(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}

impl fmt::Display for StateKey {
    /// Writes the text form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(&self.to_state()))
    }
}

fn pack_cell(cell: &Cell) -> u8 {
    match cell {
        Cell::Empty => TAG_EMPTY,
        Cell::CoreCenter => TAG_CORE_CENTER,
        Cell::SecondaryCenter => TAG_SECONDARY_CENTER,
        Cell::Piece(Piece::Corner { color, orientation }) => {
            TAG_CORNER_BASE + color.index() as u8 * 12 + (orientation.code() - 1)
        }
        Cell::Piece(Piece::Straight { color, axis }) => {
            TAG_STRAIGHT_BASE + color.index() as u8 * 3 + (axis.code() - 1)
        }
    }
}

fn unpack_cell(tag: u8) -> Cell {
    match tag {
        TAG_EMPTY => Cell::Empty,
        TAG_CORE_CENTER => Cell::CoreCenter,
        TAG_SECONDARY_CENTER => Cell::SecondaryCenter,
        _ if tag < TAG_STRAIGHT_BASE => {
            let offset = tag - TAG_CORNER_BASE;
            Cell::Piece(Piece::Corner {
                color: Color::ALL[(offset / 12) as usize],
                orientation: CornerOrientation::ALL[(offset % 12) as usize],
            })
        }
        _ => {
            let offset = tag - TAG_STRAIGHT_BASE;
            Cell::Piece(Piece::Straight {
                color: Color::ALL[(offset / 3) as usize],
                axis: StraightAxis::ALL[(offset % 3) as usize],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::layouts;
    use crate::moves::{scramble, Move};

    fn reachable_states() -> Vec<CubeState> {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut states = vec![layouts::solved(), layouts::scrambled(), CubeState::new()];
        for length in [1, 3, 8, 20] {
            let mut cube = layouts::solved();
            scramble(&mut cube, &mut rng, &Move::ALL, length);
            states.push(cube);
        }
        states
    }

    #[test]
    fn test_text_roundtrip() {
        for state in reachable_states() {
            assert_eq!(decode(&encode(&state)), Ok(state));
        }
    }

    #[test]
    fn test_key_roundtrip() {
        for state in reachable_states() {
            let key = StateKey::from_state(&state);
            assert_eq!(key.to_state(), state);
            assert_eq!(key.to_string(), encode(&state));
        }
    }

    #[test]
    fn test_every_piece_has_distinct_tag() {
        let mut tags: Vec<u8> = Vec::new();
        for color in Color::ALL {
            for orientation in CornerOrientation::ALL {
                tags.push(pack_cell(&Cell::Piece(Piece::Corner { color, orientation })));
            }
            for axis in StraightAxis::ALL {
                tags.push(pack_cell(&Cell::Piece(Piece::Straight { color, axis })));
            }
        }
        tags.extend([TAG_EMPTY, TAG_CORE_CENTER, TAG_SECONDARY_CENTER]);
        let count = tags.len();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), count);
        for tag in tags {
            assert_eq!(pack_cell(&unpack_cell(tag)), tag);
        }
    }

    #[test]
    fn test_solved_text_form() {
        insta::assert_snapshot!(
            encode(&layouts::solved()).replace('|', "\n"),
            @r"
        CornerPiece-Blue-7
        StraightPiece-Blue-2
        CornerPiece-Blue-8
        StraightPiece-Blue-1
        None
        StraightPiece-Blue-3
        CornerPiece-Blue-5
        StraightPiece-Blue-2
        CornerPiece-Blue-4
        CornerPiece-Yellow-7
        StraightPiece-Yellow-2
        CornerPiece-Yellow-12
        Blue Center
        Center
        CornerPiece-Yellow-3
        CornerPiece-Yellow-5
        StraightPiece-Yellow-2
        CornerPiece-Yellow-6
        CornerPiece-Red-7
        CornerPiece-Red-8
        CornerPiece-Red-3
        StraightPiece-Red-1
        StraightPiece-Red-1
        StraightPiece-Red-1
        CornerPiece-Red-9
        CornerPiece-Red-5
        CornerPiece-Red-6
        "
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let mut tokens: Vec<String> = encode(&layouts::solved())
            .split(DELIMITER)
            .map(str::to_string)
            .collect();
        tokens[0] = "TrianglePiece-Red-1".to_string();
        assert_eq!(
            decode(&tokens.join("|")),
            Err(CodecError::UnknownKind {
                cell: 0,
                label: "TrianglePiece".to_string(),
            })
        );
    }

    #[test]
    fn test_bad_tokens_are_rejected() {
        let solved = encode(&layouts::solved());
        let with_first = |token: &str| {
            let mut tokens: Vec<&str> = solved.split(DELIMITER).collect();
            tokens[0] = token;
            decode(&tokens.join("|"))
        };

        assert!(matches!(
            with_first("CornerPiece-Green-1"),
            Err(CodecError::UnknownColor { cell: 0, .. })
        ));
        assert!(matches!(
            with_first("CornerPiece-Red-13"),
            Err(CodecError::BadOrientation { cell: 0, .. })
        ));
        assert!(matches!(
            with_first("StraightPiece-Red-0"),
            Err(CodecError::BadOrientation { cell: 0, .. })
        ));
        assert!(matches!(
            with_first("CornerPiece-Red"),
            Err(CodecError::MalformedToken { cell: 0, .. })
        ));
        assert!(matches!(
            with_first("Blue Center"),
            Err(CodecError::SentinelCount { count: 2, .. })
        ));
        assert_eq!(
            with_first("StraightPiece-Blue-9")
                .map(|cube| cube.get(0, 0, 0))
                .ok(),
            Some(Cell::Piece(Piece::straight(Color::Blue, 3)))
        );
    }

    #[test]
    fn test_wrong_token_count_is_rejected() {
        assert_eq!(decode("None|None"), Err(CodecError::TokenCount(2)));
        assert_eq!(decode(""), Err(CodecError::TokenCount(1)));
    }

    #[test]
    fn test_core_center_must_not_move() {
        let mut tokens = vec![EMPTY_TOKEN; GRID_SIZE];
        tokens[0] = CORE_CENTER_TOKEN;
        tokens[12] = SECONDARY_CENTER_TOKEN;
        assert_eq!(decode(&tokens.join("|")), Err(CodecError::CoreCenterMoved(0)));
    }

    #[test]
    fn test_key_hash_is_stable_for_equal_states() {
        let first = StateKey::from_state(&layouts::solved());
        let second = StateKey::from_state(&layouts::solved());
        assert_eq!(first.hash64(), second.hash64());

        let mut turned = layouts::solved();
        turned.apply(Move::ALL[0]);
        assert_ne!(StateKey::from_state(&turned), first);
    }
}
