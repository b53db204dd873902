use blockfall_engine::{PieceKind, Simulation};
use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::{BlockDisplay, PieceDisplay, color};

const RULE_STYLE: Style = Style::new().fg(color::DARK_GRAY).bg(color::BLACK);

/// Preview of the pieces a simulation will spawn next.
///
/// A fixed number of slots is reserved so the panel keeps its size while the
/// queue refills. The piece spawning next sits on top, set off from the rest
/// by a rule.
#[derive(Debug)]
pub struct NextQueueDisplay<'a> {
    upcoming: Vec<PieceKind>,
    slots: usize,
    block: Option<BlockWidget<'a>>,
}

impl<'a> NextQueueDisplay<'a> {
    pub fn new(simulation: &Simulation, slots: usize) -> Self {
        Self {
            upcoming: simulation.next_pieces().take(slots).collect(),
            slots,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let slots = super::to_u16(self.slots);
        slots * Self::slot_height()
            + slots.saturating_sub(1)
            + super::block_vertical_margin(self.block.as_ref())
    }

    const fn slot_height() -> u16 {
        2 * BlockDisplay::height()
    }

    fn layout(&self) -> Layout {
        let mut constraints = Vec::with_capacity(self.slots * 2);
        for i in 0..self.slots {
            if i > 0 {
                constraints.push(Constraint::Length(1));
            }
            constraints.push(Constraint::Length(Self::slot_height()));
        }
        Layout::vertical(constraints)
    }
}

impl Widget for NextQueueDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &NextQueueDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let areas = area.layout_vec(&self.layout());

        // Slots sit at even indices, gaps at odd ones.
        for (i, slot_area) in areas.iter().step_by(2).enumerate() {
            let display = match self.upcoming.get(i) {
                Some(kind) => PieceDisplay::new().piece(*kind),
                None => PieceDisplay::new(),
            };
            Widget::render(&display, *slot_area, buf);
        }
        if let Some(gap) = areas.get(1) {
            let width = usize::from(gap.width);
            Line::styled("─".repeat(width), RULE_STYLE).render(*gap, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{PieceSeed, SimulationConfig};

    use super::*;

    fn simulation() -> Simulation {
        let config = SimulationConfig {
            seed: Some(PieceSeed::from_bytes([7; 16])),
            ..SimulationConfig::default()
        };
        Simulation::new(config).unwrap()
    }

    #[test]
    fn test_size_follows_slots() {
        let sim = simulation();
        let display = NextQueueDisplay::new(&sim, 3);
        assert_eq!((display.width(), display.height()), (8, 8));

        let display = NextQueueDisplay::new(&sim, 1).block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (10, 4));
    }

    #[test]
    fn test_rule_below_first_piece() {
        let sim = simulation();
        let display = NextQueueDisplay::new(&sim, 3);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        let row = |y: u16| -> String { (0..area.width).map(|x| buf[(x, y)].symbol()).collect() };
        assert_eq!(row(2), "─".repeat(8));
        // The second gap is blank.
        assert_eq!(row(5).trim(), "");
    }
}
