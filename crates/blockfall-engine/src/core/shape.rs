use std::fmt;

use super::piece::Position;

/// Occupancy matrix of a piece.
///
/// A shape is at most [`Shape::MAX_SIZE`] cells wide and tall. Each row is
/// stored as a bitmask where bit `c` marks column `c` as occupied.
///
/// Rotation follows the usual matrix rotation: rotating a `w × h` shape
/// clockwise yields an `h × w` shape where
/// `rotated[r][c] == shape[h - 1 - c][r]`.
///
/// # Example
///
/// ```
/// use blockfall_engine::Shape;
///
/// let t = Shape::from_cells([[0, 1, 0], [1, 1, 1]]);
/// let rotated = t.rotated_right();
///
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// assert_eq!(rotated.rotated_right().rotated_right().rotated_right(), t);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    rows: [u8; Shape::MAX_SIZE],
}

impl Shape {
    pub const MAX_SIZE: usize = 4;

    /// Builds a shape from a row-major matrix; any non-zero cell is occupied.
    #[must_use]
    pub const fn from_cells<const W: usize, const H: usize>(cells: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= Self::MAX_SIZE);
        assert!(H > 0 && H <= Self::MAX_SIZE);
        let mut rows = [0; Self::MAX_SIZE];
        let mut r = 0;
        while r < H {
            let mut c = 0;
            while c < W {
                if cells[r][c] != 0 {
                    rows[r] |= 1 << c;
                }
                c += 1;
            }
            r += 1;
        }
        #[expect(clippy::cast_possible_truncation)]
        let (width, height) = (W as u8, H as u8);
        Self {
            width,
            height,
            rows,
        }
    }

    #[must_use]
    pub const fn width(self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(self) -> usize {
        self.height as usize
    }

    #[must_use]
    pub const fn is_occupied(self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && (self.rows[row] >> col) & 1 != 0
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub const fn cell_count(self) -> u32 {
        let mut count = 0;
        let mut r = 0;
        while r < Self::MAX_SIZE {
            count += self.rows[r].count_ones();
            r += 1;
        }
        count
    }

    /// Iterates over occupied cells as `(row, col)` offsets from the anchor.
    pub fn occupied_cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.height()).flat_map(move |row| {
            (0..self.width())
                .filter(move |&col| self.is_occupied(row, col))
                .map(move |col| (row, col))
        })
    }

    /// Iterates over the board positions covered when anchored at `anchor`.
    pub fn positions_at(self, anchor: Position) -> impl Iterator<Item = Position> {
        self.occupied_cells()
            .map(move |(dr, dc)| anchor.offset(to_coord(dr), to_coord(dc)))
    }

    /// Returns the shape rotated 90° clockwise.
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut rows = [0; Self::MAX_SIZE];
        let mut r = 0;
        while r < w {
            let mut c = 0;
            while c < h {
                if (self.rows[h - 1 - c] >> r) & 1 != 0 {
                    rows[r] |= 1 << c;
                }
                c += 1;
            }
            r += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            rows,
        }
    }

    /// Returns the shape rotated 90° counterclockwise.
    #[must_use]
    pub const fn rotated_left(self) -> Self {
        self.rotated_right().rotated_right().rotated_right()
    }
}

pub(crate) fn to_coord(n: usize) -> i16 {
    i16::try_from(n).unwrap_or(i16::MAX)
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height() {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width() {
                let ch = if self.is_occupied(row, col) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
