use std::iter;

use blockfall_engine::{Board, Piece, Position};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use super::BlockDisplay;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<Piece>,
    active_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            active_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Option<Piece>) -> Self {
        Self {
            ghost: piece,
            ..self
        }
    }

    pub fn active_piece(self, piece: Option<Piece>) -> Self {
        Self {
            active_piece: piece,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::to_u16(self.board.width()) * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::to_u16(self.board.height()) * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    /// What to draw at a board cell: the active piece covers the ghost, and
    /// the ghost covers empty cells.
    fn cell_display(&self, row: usize, col: usize) -> BlockDisplay {
        let covers = |piece: &Piece| {
            let (Ok(row), Ok(col)) = (i16::try_from(row), i16::try_from(col)) else {
                return false;
            };
            piece
                .occupied_positions()
                .any(|pos| pos == Position::new(row, col))
        };
        if let Some(piece) = self.active_piece.filter(covers) {
            return BlockDisplay::piece(piece.kind());
        }
        let block = self.board.cell(row, col).unwrap_or_default();
        if block.is_empty() && self.ghost.as_ref().is_some_and(covers) {
            return BlockDisplay::ghost();
        }
        BlockDisplay::from_block(block, true)
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.board.width()).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..self.board.height()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_rows = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (row, grid_row) in grid_rows.enumerate() {
            for (col, grid_cell) in iter::zip(0..self.board.width(), grid_row) {
                self.cell_display(row, col).render(grid_cell, buf);
            }
        }
    }
}
