//! Puzzle piece definitions and orientation codes.
//!
//! The puzzle has two piece shapes. Corner pieces are L-shaped units that can
//! face twelve ways; straight pieces are rods lying along one of three axes.
//! Neither shape is ever reclassified, so the orientation domain is carried in
//! the type: a corner holds a [`CornerOrientation`], a straight holds a
//! [`StraightAxis`].

use std::fmt;

/// A 3D offset in renderer space (y up, +z toward the viewer).
pub type Coord = (i32, i32, i32);

/// Piece colours. The puzzle only uses three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Yellow,
    Blue,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Yellow, Color::Blue];

    /// Dense index used by the packed state key.
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Yellow => 1,
            Color::Blue => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Yellow => "Yellow",
            Color::Blue => "Blue",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.name() == name)
    }

    pub const fn initial(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Blue => 'B',
        }
    }
}

/// The two piece shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Corner,
    Straight,
}

impl PieceKind {
    /// Label written into serialized states.
    pub const fn label(self) -> &'static str {
        match self {
            PieceKind::Corner => "CornerPiece",
            PieceKind::Straight => "StraightPiece",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "CornerPiece" => Some(PieceKind::Corner),
            "StraightPiece" => Some(PieceKind::Straight),
            _ => None,
        }
    }
}

/// The three families of corner orientation, four codes each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// Codes 1-4: one arm points up.
    Up,
    /// Codes 5-8: both arms lie in the horizontal plane.
    Horizontal,
    /// Codes 9-12: one arm points down.
    Down,
}

/// Orientation of a corner piece, a code in `1..=12`.
///
/// Within the up and down bands the four codes run left, forward, right,
/// backward. The horizontal band runs forward-left, backward-left,
/// forward-right, backward-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CornerOrientation(u8);

impl CornerOrientation {
    pub const ALL: [CornerOrientation; 12] = {
        let mut all = [CornerOrientation(1); 12];
        let mut i = 0;
        while i < 12 {
            all[i] = CornerOrientation(i as u8 + 1);
            i += 1;
        }
        all
    };

    /// Returns `None` for codes outside `1..=12`.
    pub const fn new(code: u8) -> Option<Self> {
        if code >= 1 && code <= 12 {
            Some(Self(code))
        } else {
            None
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    pub const fn band(self) -> Band {
        match self.0 {
            1..=4 => Band::Up,
            5..=8 => Band::Horizontal,
            _ => Band::Down,
        }
    }

    pub const fn description(self) -> &'static str {
        match self.0 {
            1 => "up-left",
            2 => "up-forward",
            3 => "up-right",
            4 => "up-backward",
            5 => "forward-left",
            6 => "backward-left",
            7 => "forward-right",
            8 => "backward-right",
            9 => "down-left",
            10 => "down-forward",
            11 => "down-right",
            _ => "down-backward",
        }
    }

    /// Unit vectors of the two arms of the L, in renderer space.
    pub const fn arms(self) -> [Coord; 2] {
        const UP: Coord = (0, 1, 0);
        const DOWN: Coord = (0, -1, 0);
        const LEFT: Coord = (-1, 0, 0);
        const RIGHT: Coord = (1, 0, 0);
        const FORWARD: Coord = (0, 0, 1);
        const BACKWARD: Coord = (0, 0, -1);

        match self.0 {
            1 => [UP, LEFT],
            2 => [UP, FORWARD],
            3 => [UP, RIGHT],
            4 => [UP, BACKWARD],
            5 => [LEFT, FORWARD],
            6 => [LEFT, BACKWARD],
            7 => [RIGHT, FORWARD],
            8 => [RIGHT, BACKWARD],
            9 => [DOWN, LEFT],
            10 => [DOWN, FORWARD],
            11 => [DOWN, RIGHT],
            _ => [DOWN, BACKWARD],
        }
    }
}

impl fmt::Display for CornerOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axis a straight piece lies along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StraightAxis {
    Horizontal = 1,
    Depth = 2,
    Vertical = 3,
}

impl StraightAxis {
    pub const ALL: [StraightAxis; 3] = [
        StraightAxis::Horizontal,
        StraightAxis::Depth,
        StraightAxis::Vertical,
    ];

    /// Folds any positive code into `1..=3` with `((n - 1) mod 3) + 1`.
    ///
    /// Some layouts write straight orientations with corner-style codes, so
    /// 9 is read as 3. Code 0 has no meaning and yields `None`.
    pub const fn from_code(code: u32) -> Option<Self> {
        if code == 0 {
            return None;
        }
        match (code - 1) % 3 {
            0 => Some(StraightAxis::Horizontal),
            1 => Some(StraightAxis::Depth),
            _ => Some(StraightAxis::Vertical),
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn description(self) -> &'static str {
        match self {
            StraightAxis::Horizontal => "horizontal",
            StraightAxis::Depth => "depth",
            StraightAxis::Vertical => "vertical",
        }
    }

    /// Unit vector along the rod, in renderer space.
    pub const fn direction(self) -> Coord {
        match self {
            StraightAxis::Horizontal => (1, 0, 0),
            StraightAxis::Depth => (0, 0, 1),
            StraightAxis::Vertical => (0, 1, 0),
        }
    }
}

/// A movable piece. Equality is structural: kind, colour and orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    Corner {
        color: Color,
        orientation: CornerOrientation,
    },
    Straight {
        color: Color,
        axis: StraightAxis,
    },
}

impl Piece {
    /// Builds a corner piece from a raw code.
    ///
    /// Panics on a code outside `1..=12`; in a const context that is a
    /// compile error, which is how the fixture layouts are checked.
    pub const fn corner(color: Color, code: u8) -> Self {
        match CornerOrientation::new(code) {
            Some(orientation) => Piece::Corner { color, orientation },
            None => panic!("corner orientation must be in 1..=12"),
        }
    }

    /// Builds a straight piece, normalising the code into `1..=3`.
    pub const fn straight(color: Color, code: u32) -> Self {
        match StraightAxis::from_code(code) {
            Some(axis) => Piece::Straight { color, axis },
            None => panic!("straight orientation must be positive"),
        }
    }

    /// Fallible counterpart of [`Piece::corner`] / [`Piece::straight`].
    pub fn try_new(kind: PieceKind, color: Color, code: u32) -> Option<Self> {
        match kind {
            PieceKind::Corner => u8::try_from(code)
                .ok()
                .and_then(CornerOrientation::new)
                .map(|orientation| Piece::Corner { color, orientation }),
            PieceKind::Straight => {
                StraightAxis::from_code(code).map(|axis| Piece::Straight { color, axis })
            }
        }
    }

    pub const fn kind(&self) -> PieceKind {
        match self {
            Piece::Corner { .. } => PieceKind::Corner,
            Piece::Straight { .. } => PieceKind::Straight,
        }
    }

    pub const fn color(&self) -> Color {
        match self {
            Piece::Corner { color, .. } | Piece::Straight { color, .. } => *color,
        }
    }

    /// The orientation as its integer code.
    pub const fn orientation_code(&self) -> u8 {
        match self {
            Piece::Corner { orientation, .. } => orientation.code(),
            Piece::Straight { axis, .. } => axis.code(),
        }
    }
}

impl fmt::Display for Piece {
    /// Writes the serialized token, e.g. `CornerPiece-Red-3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.kind().label(),
            self.color().name(),
            self.orientation_code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_codes_fold_into_three_axes() {
        assert_eq!(StraightAxis::from_code(1), Some(StraightAxis::Horizontal));
        assert_eq!(StraightAxis::from_code(2), Some(StraightAxis::Depth));
        assert_eq!(StraightAxis::from_code(3), Some(StraightAxis::Vertical));
        assert_eq!(StraightAxis::from_code(4), Some(StraightAxis::Horizontal));
        assert_eq!(StraightAxis::from_code(9), Some(StraightAxis::Vertical));
        assert_eq!(StraightAxis::from_code(0), None);
    }

    #[test]
    fn test_corner_codes_outside_domain_are_rejected() {
        assert!(CornerOrientation::new(0).is_none());
        assert!(CornerOrientation::new(13).is_none());
        assert!(Piece::try_new(PieceKind::Corner, Color::Red, 300).is_none());
        for code in 1..=12 {
            assert_eq!(CornerOrientation::new(code).map(|o| o.code()), Some(code));
        }
    }

    #[test]
    fn test_bands_group_codes_by_four() {
        let bands: Vec<Band> = CornerOrientation::ALL.iter().map(|o| o.band()).collect();
        assert!(bands[0..4].iter().all(|&b| b == Band::Up));
        assert!(bands[4..8].iter().all(|&b| b == Band::Horizontal));
        assert!(bands[8..12].iter().all(|&b| b == Band::Down));
    }

    #[test]
    fn test_corner_arms_are_perpendicular() {
        for orientation in CornerOrientation::ALL {
            let [(ax, ay, az), (bx, by, bz)] = orientation.arms();
            assert_eq!(ax * bx + ay * by + az * bz, 0, "{}", orientation.description());
        }
    }

    #[test]
    fn test_piece_equality_is_structural() {
        assert_eq!(Piece::corner(Color::Red, 3), Piece::corner(Color::Red, 3));
        assert_ne!(Piece::corner(Color::Red, 3), Piece::corner(Color::Red, 4));
        assert_ne!(Piece::corner(Color::Red, 3), Piece::corner(Color::Blue, 3));
        assert_ne!(Piece::corner(Color::Red, 1), Piece::straight(Color::Red, 1));
        assert_eq!(Piece::straight(Color::Blue, 9), Piece::straight(Color::Blue, 3));
    }

    #[test]
    fn test_piece_token_format() {
        assert_eq!(Piece::corner(Color::Yellow, 12).to_string(), "CornerPiece-Yellow-12");
        assert_eq!(Piece::straight(Color::Red, 1).to_string(), "StraightPiece-Red-1");
    }
}
