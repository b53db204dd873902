use std::fmt;

use crate::PieceOverflowError;

use super::{
    block::Block,
    piece::{Piece, PieceKind, Position},
    shape::Shape,
};

/// The playfield: a fixed `width × height` grid of [`Block`] cells.
///
/// Row 0 is the top of the visible board. Positions with a negative row lie
/// above the board; they are never stored, only tolerated while a piece
/// enters play.
///
/// The board changes only through [`Board::fill_piece`] (locking a piece)
/// and [`Board::clear_lines`] (removing full rows). Its dimensions never
/// change after construction.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind, Position};
///
/// let mut board = Board::new(10, 20);
/// let piece = Piece::new(PieceKind::O, Position::new(18, 4));
///
/// assert!(board.is_valid_position(piece.shape(), piece.position()));
/// board.fill_piece(&piece).unwrap();
/// assert!(board.cell(19, 5).unwrap().is_occupied());
/// assert_eq!(board.clear_lines(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Block>,
}

impl Board {
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 20;

    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board must not be empty");
        Self {
            width,
            height,
            cells: vec![Block::Empty; width * height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(row, col)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Block> {
        (row < self.height && col < self.width).then(|| self.cells[row * self.width + col])
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.cells.chunks_exact(self.width)
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[Block] {
        &self.cells[row * self.width..][..self.width]
    }

    /// Sets a single cell. Intended for building boards by hand.
    pub fn fill_block_at(&mut self, row: usize, col: usize, block: Block) {
        assert!(row < self.height && col < self.width, "cell out of range");
        self.cells[row * self.width + col] = block;
    }

    /// Maps a position to `(row, col)` indices when it lies on the board.
    fn index_of(&self, pos: Position) -> Option<(usize, usize)> {
        let row = usize::try_from(pos.row()).ok()?;
        let col = usize::try_from(pos.col()).ok()?;
        (row < self.height && col < self.width).then_some((row, col))
    }

    /// Checks whether `shape` anchored at `anchor` fits on the board.
    ///
    /// Every occupied cell must be inside the horizontal bounds and not below
    /// the bottom row. Cells above the board (negative rows) are accepted
    /// without an occupancy check; cells on the board must be empty.
    #[must_use]
    pub fn is_valid_position(&self, shape: Shape, anchor: Position) -> bool {
        shape
            .positions_at(anchor)
            .all(|pos| self.is_cell_available(pos))
    }

    fn is_cell_available(&self, pos: Position) -> bool {
        let col_in_bounds = usize::try_from(pos.col()).is_ok_and(|col| col < self.width);
        if !col_in_bounds {
            return false;
        }
        if pos.row() < 0 {
            return true;
        }
        self.index_of(pos)
            .is_some_and(|(row, col)| self.cells[row * self.width + col].is_empty())
    }

    /// Returns `true` if `piece` overlaps a wall, the floor or a locked cell.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        !self.is_valid_position(piece.shape(), piece.position())
    }

    /// Locks `piece` onto the board.
    ///
    /// Every cell of the piece that lies on the board is written with the
    /// piece's kind. If any cell lies above the board, the piece overflowed
    /// and an error is returned after the visible cells have been written.
    pub fn fill_piece(&mut self, piece: &Piece) -> Result<(), PieceOverflowError> {
        let mut overflowed = false;
        for pos in piece.occupied_positions() {
            if pos.row() < 0 {
                overflowed = true;
                continue;
            }
            if let Some((row, col)) = self.index_of(pos) {
                self.cells[row * self.width + col] = Block::Piece(piece.kind());
            }
        }
        if overflowed {
            return Err(PieceOverflowError);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_row_filled(&self, row: usize) -> bool {
        self.row(row).iter().all(|b| b.is_occupied())
    }

    /// Clears filled rows and returns how many were removed.
    ///
    /// Rows are scanned bottom to top. Each filled row is dropped, the rows
    /// above it shift down, and the same number of empty rows appear at the
    /// top, so the board height is unchanged.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.width;
        let mut count = 0;
        for row in (0..self.height).rev() {
            if self.is_row_filled(row) {
                count += 1;
                continue;
            }
            if count > 0 {
                let src = row * width;
                self.cells.copy_within(src..src + width, src + count * width);
            }
        }
        self.cells[..count * width].fill(Block::Empty);
        count
    }

    /// Creates a board from ASCII art, for tests and fixtures.
    ///
    /// `#` is an occupied cell (recorded as an I-piece block), `.` is empty.
    /// Rows are given top to bottom and are aligned to the bottom of the
    /// board; missing rows at the top are empty.
    ///
    /// # Panics
    ///
    /// Panics if a row's width does not match `width` or there are more rows
    /// than `height`.
    #[must_use]
    pub fn from_ascii(width: usize, height: usize, art: &str) -> Self {
        let mut board = Self::new(width, height);
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(lines.len() <= height, "too many rows: {}", lines.len());

        let top = height - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                width,
                "each row must have exactly {width} cells, got {} at row {i}",
                chars.len(),
            );
            for (col, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    board.fill_block_at(top + i, col, Block::Piece(PieceKind::I));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for block in row {
                let ch = block.piece_kind().map_or('.', |kind| kind.as_char());
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(10, 20);
        assert_eq!(board.rows().count(), 20);
        assert!(board.rows().all(|row| row.len() == 10));
        assert!(board.rows().flatten().all(|b| b.is_empty()));
        assert_eq!(board.cell(20, 0), None);
        assert_eq!(board.cell(0, 10), None);
    }

    #[test]
    fn test_valid_position_bounds() {
        let board = Board::new(10, 20);
        let o = PieceKind::O.shape();
        assert!(board.is_valid_position(o, Position::new(0, 0)));
        assert!(board.is_valid_position(o, Position::new(18, 8)));
        assert!(!board.is_valid_position(o, Position::new(0, -1)));
        assert!(!board.is_valid_position(o, Position::new(0, 9)));
        assert!(!board.is_valid_position(o, Position::new(19, 0)));
    }

    #[test]
    fn test_valid_position_above_board() {
        let board = Board::from_ascii(10, 20, "##########");
        let i = PieceKind::I.shape();
        assert!(board.is_valid_position(i, Position::new(-1, 3)));
        assert!(board.is_valid_position(i, Position::new(-10, 6)));
        // Horizontal bounds still apply above the board.
        assert!(!board.is_valid_position(i, Position::new(-1, 7)));
        assert!(!board.is_valid_position(i, Position::new(-1, -1)));
    }

    #[test]
    fn test_valid_position_occupied() {
        let board = Board::from_ascii(
            10,
            20,
            "
            ....#.....
            ..........
            ",
        );
        let o = PieceKind::O.shape();
        assert!(!board.is_valid_position(o, Position::new(17, 3)));
        assert!(!board.is_valid_position(o, Position::new(18, 4)));
        assert!(board.is_valid_position(o, Position::new(18, 5)));
        assert!(board.is_valid_position(o, Position::new(16, 4)));
    }

    #[test]
    fn test_fill_piece() {
        let mut board = Board::new(10, 20);
        let piece = Piece::new(PieceKind::T, Position::new(18, 0));
        board.fill_piece(&piece).unwrap();
        assert_eq!(
            board.to_string().lines().skip(18).collect::<Vec<_>>(),
            vec![".T........", "TTT......."]
        );
    }

    #[test]
    fn test_fill_piece_overflow_writes_visible_cells() {
        let mut board = Board::new(10, 20);
        let piece = Piece::new(PieceKind::O, Position::new(-1, 4));
        assert_eq!(board.fill_piece(&piece), Err(PieceOverflowError));
        assert_eq!(board.cell(0, 4), Some(Block::Piece(PieceKind::O)));
        assert_eq!(board.cell(0, 5), Some(Block::Piece(PieceKind::O)));
        assert_eq!(board.rows().flatten().filter(|b| b.is_occupied()).count(), 2);
    }

    #[test]
    fn test_clear_lines_single_line() {
        let mut board = Board::from_ascii(
            10,
            20,
            "
            #.........
            ##########
            ",
        );
        assert_eq!(board.clear_lines(), 1);
        assert!(board.cell(19, 0).unwrap().is_occupied());
        assert!(board.row(18).iter().all(|b| b.is_empty()));
        assert_eq!(board.height(), 20);
    }

    #[test]
    fn test_clear_lines_non_consecutive() {
        let mut board = Board::from_ascii(
            10,
            20,
            "
            ..#.......
            ##########
            .#........
            ##########
            #.........
            ",
        );
        assert_eq!(board.clear_lines(), 2);
        let expected = Board::from_ascii(
            10,
            20,
            "
            ..#.......
            .#........
            #.........
            ",
        );
        assert_eq!(board, expected);
    }

    #[test]
    fn test_clear_lines_with_partial_lines() {
        let mut board = Board::from_ascii(10, 20, "#########.");
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board.row(19).iter().filter(|b| b.is_occupied()).count(), 9);
    }

    #[test]
    fn test_clear_lines_all_filled() {
        let art = "##########\n".repeat(20);
        let mut board = Board::from_ascii(10, 20, &art);
        assert_eq!(board.clear_lines(), 20);
        assert_eq!(board, Board::new(10, 20));
    }

    fn arbitrary_board() -> impl Strategy<Value = Board> {
        // Bias cells toward occupied so that full rows actually appear.
        (4usize..12, 4usize..24).prop_flat_map(|(width, height)| {
            prop::collection::vec(prop::bool::weighted(0.8), width * height).prop_map(
                move |cells| {
                    let mut board = Board::new(width, height);
                    for (i, occupied) in cells.into_iter().enumerate() {
                        if occupied {
                            board.fill_block_at(i / width, i % width, Block::Piece(PieceKind::S));
                        }
                    }
                    board
                },
            )
        })
    }

    proptest! {
        #[test]
        fn clear_lines_leaves_no_full_row(mut board in arbitrary_board()) {
            board.clear_lines();
            for row in 0..board.height() {
                prop_assert!(!board.is_row_filled(row));
            }
        }

        #[test]
        fn clear_lines_preserves_dimensions(mut board in arbitrary_board()) {
            let (width, height) = (board.width(), board.height());
            let occupied_before = board.rows().flatten().filter(|b| b.is_occupied()).count();
            let cleared = board.clear_lines();
            prop_assert_eq!(board.rows().count(), height);
            prop_assert_eq!(board.width(), width);
            let occupied_after = board.rows().flatten().filter(|b| b.is_occupied()).count();
            prop_assert_eq!(occupied_after, occupied_before - cleared * width);
        }

        #[test]
        fn out_of_bounds_cells_are_invalid(
            kind in 0..PieceKind::LEN,
            row in -6i16..30,
            col in -6i16..16,
        ) {
            let board = Board::new(10, 20);
            let shape = PieceKind::ALL[kind].shape();
            let anchor = Position::new(row, col);
            let any_outside = shape
                .positions_at(anchor)
                .any(|pos| pos.col() < 0 || pos.col() >= 10 || pos.row() >= 20);
            if any_outside {
                prop_assert!(!board.is_valid_position(shape, anchor));
            } else {
                prop_assert!(board.is_valid_position(shape, anchor));
            }
        }
    }
}
