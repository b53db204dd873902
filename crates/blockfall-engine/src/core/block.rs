use super::piece::PieceKind;

/// A single cell of the board.
///
/// A cell is either empty or holds the kind of the piece that was locked
/// into it. The kind doubles as the occupant's color tag for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    #[default]
    Empty,
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    #[must_use]
    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// Returns the occupant of this cell, if any.
    #[must_use]
    pub fn piece_kind(self) -> Option<PieceKind> {
        match self {
            Block::Empty => None,
            Block::Piece(kind) => Some(kind),
        }
    }
}
