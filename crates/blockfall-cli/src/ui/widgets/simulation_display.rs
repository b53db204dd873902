use blockfall_engine::{GameStatus, Simulation};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, NextQueueDisplay, StatsDisplay, color, style};

/// Board, statistics and next-piece queue, with a banner for non-running
/// states.
#[derive(Debug)]
pub struct SimulationDisplay<'a> {
    simulation: &'a Simulation,
    paused: bool,
    next_pieces: usize,
}

impl<'a> SimulationDisplay<'a> {
    pub fn new(simulation: &'a Simulation) -> Self {
        Self {
            simulation,
            paused: false,
            next_pieces: 5,
        }
    }

    pub fn paused(self, paused: bool) -> Self {
        Self { paused, ..self }
    }

    fn banner(&self) -> Option<(&'static str, Style)> {
        match self.simulation.status() {
            GameStatus::Ready => Some((
                "PRESS ENTER",
                Style::new().fg(color::BLACK).bg(color::CYAN),
            )),
            GameStatus::Running if self.paused => Some((
                "PAUSED",
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            )),
            GameStatus::Running => None,
            GameStatus::GameOver => Some((
                "GAME OVER!!",
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
        }
    }
}

impl Widget for SimulationDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SimulationDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let sim = self.simulation;
        let block_padding = Padding::symmetric(1, 0);
        let border_style = match sim.status() {
            GameStatus::Running if self.paused => color::YELLOW,
            GameStatus::Ready | GameStatus::Running => color::WHITE,
            GameStatus::GameOver => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(sim.board())
            .active_piece(sim.active_piece())
            .ghost(sim.drop_position())
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let stats = StatsDisplay::new(sim).block(panel("STATS"));
        let next_queue = NextQueueDisplay::new(sim, self.next_pieces).block(panel("NEXT"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_queue.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [queue_area] =
            Layout::vertical([Constraint::Length(next_queue.height())]).areas(right_column);

        let game_board_width = game_board.width();
        stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_queue.render(queue_area, buf);

        if let Some((text, style)) = self.banner() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
