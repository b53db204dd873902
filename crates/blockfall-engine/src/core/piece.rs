use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::shape::{Shape, to_coord};

/// A falling piece: a shape anchored on the board, tagged with its kind.
///
/// Pieces are immutable values. Moving or rotating returns a new `Piece`;
/// the simulation decides whether to commit it.
///
/// # Coordinate System
///
/// - The anchor is the top-left corner of the shape's bounding box
/// - Rows grow downward, columns grow rightward
/// - Rows above the visible board are negative
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind, Position};
///
/// let piece = Piece::new(PieceKind::T, Position::new(-2, 4));
/// let moved = piece.down().right();
/// assert_eq!(moved.position(), Position::new(-1, 5));
///
/// let rotated = moved.rotated_right();
/// assert_eq!(rotated.shape().width(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    position: Position,
}

impl Piece {
    /// Creates a piece of `kind` in its spawn orientation.
    #[must_use]
    pub fn new(kind: PieceKind, position: Position) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            position,
        }
    }

    /// Creates a piece centered horizontally, directly above the visible board.
    ///
    /// The bottom row of the shape sits one row above row 0, so the whole
    /// piece starts hidden and enters the board on the first downward move.
    #[must_use]
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = kind.shape();
        let col = (board_width / 2).saturating_sub(shape.width() / 2);
        let row = -to_coord(shape.height());
        Self::new(kind, Position::new(row, to_coord(col)))
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Iterates over the board positions covered by this piece.
    pub fn occupied_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.shape.positions_at(self.position)
    }

    #[must_use]
    pub fn with_position(&self, position: Position) -> Self {
        Self { position, ..*self }
    }

    /// Returns the piece translated by `dx` columns and `dy` rows.
    #[must_use]
    pub fn moved(&self, dx: i16, dy: i16) -> Self {
        self.with_position(self.position.offset(dy, dx))
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.moved(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.moved(1, 0)
    }

    #[must_use]
    pub fn up(&self) -> Self {
        self.moved(0, -1)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.moved(0, 1)
    }

    /// Returns the piece with its shape rotated 90° clockwise about the anchor.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        Self {
            shape: self.shape.rotated_right(),
            ..*self
        }
    }

    #[must_use]
    pub fn rotated_left(&self) -> Self {
        Self {
            shape: self.shape.rotated_left(),
            ..*self
        }
    }

    /// Candidate placements for a clockwise rotation, in the order they are tried.
    ///
    /// With [`RotationSystem::Basic`] the only candidate is the rotated piece
    /// itself. [`RotationSystem::Kick`] appends single-cell offsets up, right,
    /// down and left. This is a simplified kick, not a full SRS table.
    #[must_use]
    pub fn rotation_candidates(&self, system: RotationSystem) -> ArrayVec<Self, 5> {
        let rotated = self.rotated_right();
        let mut candidates = ArrayVec::new();
        candidates.push(rotated);
        if system == RotationSystem::Kick {
            candidates.extend([
                rotated.up(),
                rotated.right(),
                rotated.down(),
                rotated.left(),
            ]);
        }
        candidates
    }
}

/// Board-relative anchor of a piece.
///
/// Both coordinates are signed so that a piece can sit partially or entirely
/// above the visible board (negative rows) while it enters play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    row: i16,
    col: i16,
}

impl Position {
    #[must_use]
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> i16 {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> i16 {
        self.col
    }

    #[must_use]
    pub const fn offset(self, drow: i16, dcol: i16) -> Self {
        Self {
            row: self.row.saturating_add(drow),
            col: self.col.saturating_add(dcol),
        }
    }
}

/// How a blocked rotation is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationSystem {
    /// Rotate in place; a blocked rotation is rejected.
    #[default]
    Basic,
    /// Retry a blocked rotation with one-cell nudges.
    Kick,
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Returns the spawn-orientation shape of this kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        PIECE_SHAPES[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('O'), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

const PIECE_SHAPES: [Shape; PieceKind::LEN] = [
    // I-piece
    Shape::from_cells([[1, 1, 1, 1]]),
    // O-piece
    Shape::from_cells([[1, 1], [1, 1]]),
    // S-piece
    Shape::from_cells([[0, 1, 1], [1, 1, 0]]),
    // Z-piece
    Shape::from_cells([[1, 1, 0], [0, 1, 1]]),
    // J-piece
    Shape::from_cells([[1, 0, 0], [1, 1, 1]]),
    // L-piece
    Shape::from_cells([[0, 0, 1], [1, 1, 1]]),
    // T-piece
    Shape::from_cells([[0, 1, 0], [1, 1, 1]]),
];

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_spawn_centers_above_board() {
        let o = Piece::spawn(PieceKind::O, 10);
        assert_eq!(o.position(), Position::new(-2, 4));

        let i = Piece::spawn(PieceKind::I, 10);
        assert_eq!(i.position(), Position::new(-1, 3));

        let t = Piece::spawn(PieceKind::T, 10);
        assert_eq!(t.position(), Position::new(-2, 4));
    }

    #[test]
    fn test_occupied_positions_follow_anchor() {
        let piece = Piece::new(PieceKind::O, Position::new(18, 4));
        let positions: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(
            positions,
            vec![
                Position::new(18, 4),
                Position::new(18, 5),
                Position::new(19, 4),
                Position::new(19, 5),
            ]
        );
    }

    #[test]
    fn test_moves_are_relative() {
        let piece = Piece::new(PieceKind::L, Position::new(0, 0));
        assert_eq!(piece.left().position(), Position::new(0, -1));
        assert_eq!(piece.right().position(), Position::new(0, 1));
        assert_eq!(piece.down().position(), Position::new(1, 0));
        assert_eq!(piece.up().position(), Position::new(-1, 0));
        assert_eq!(piece.moved(3, 2).position(), Position::new(2, 3));
    }

    #[test]
    fn test_rotation_candidates() {
        let piece = Piece::new(PieceKind::T, Position::new(5, 5));
        let basic = piece.rotation_candidates(RotationSystem::Basic);
        assert_eq!(basic.len(), 1);
        assert_eq!(basic[0], piece.rotated_right());

        let kick = piece.rotation_candidates(RotationSystem::Kick);
        assert_eq!(kick.len(), 5);
        assert_eq!(kick[1].position(), Position::new(4, 5));
        assert_eq!(kick[4].position(), Position::new(5, 4));
        assert!(kick.iter().all(|p| p.shape() == piece.rotated_right().shape()));
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn test_all_shapes_have_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().cell_count(), 4, "{kind:?}");
        }
    }

    fn piece_kind() -> impl Strategy<Value = PieceKind> {
        (0..PieceKind::LEN).prop_map(|i| PieceKind::ALL[i])
    }

    proptest! {
        #[test]
        fn full_turn_restores_shape(kind in piece_kind(), row in -4i16..20, col in -2i16..10) {
            let piece = Piece::new(kind, Position::new(row, col));
            let turned = piece.rotated_right().rotated_right().rotated_right().rotated_right();
            prop_assert_eq!(turned, piece);
        }

        #[test]
        fn rotation_keeps_anchor(kind in piece_kind(), row in -4i16..20, col in -2i16..10) {
            let piece = Piece::new(kind, Position::new(row, col));
            prop_assert_eq!(piece.rotated_right().position(), piece.position());
            prop_assert_eq!(piece.rotated_left().rotated_right(), piece);
        }
    }
}
