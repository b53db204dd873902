use std::iter;

use blockfall_engine::Simulation;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

/// Score, high score and line statistics of a simulation.
pub struct StatsDisplay<'a> {
    simulation: &'a Simulation,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(simulation: &'a Simulation) -> Self {
        Self {
            simulation,
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
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::to_u16(ROWS.len()) + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&Simulation) -> String),
    LabelValue(&'static str, &'static dyn Fn(&Simulation) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|sim| sim.score().to_string()),
    Row::FullLabel("HIGH SCORE:"),
    Row::FullValue(&|sim| sim.high_score().to_string()),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|sim| sim.stats().level().to_string()),
    Row::LabelValue("LINES:", &|sim| sim.stats().total_cleared_lines().to_string()),
    Row::LabelValue("PIECES:", &|sim| sim.stats().completed_pieces().to_string()),
    Row::Empty,
    Row::LabelValue("SINGLES:", &|sim| {
        sim.stats().line_cleared_counter()[1].to_string()
    }),
    Row::LabelValue("DOUBLES:", &|sim| {
        sim.stats().line_cleared_counter()[2].to_string()
    }),
    Row::LabelValue("TRIPLES:", &|sim| {
        sim.stats().line_cleared_counter()[3].to_string()
    }),
    Row::LabelValue("QUADS:", &|sim| {
        sim.stats().line_cleared_counter()[4].to_string()
    }),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.simulation), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.simulation), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
