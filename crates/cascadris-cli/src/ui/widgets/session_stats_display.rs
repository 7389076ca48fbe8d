use std::{iter, time::Duration};

use cascadris_engine::GameStats;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// Values shown in the stats panel.
#[derive(Debug, Clone, Copy)]
pub struct SessionStats {
    pub score: u64,
    pub level: usize,
    pub cleared_lines: usize,
    pub settled_pieces: usize,
    pub line_clear_counter: [usize; 5],
    pub elapsed: Duration,
}

impl SessionStats {
    pub fn new(stats: &GameStats, level: usize, tick_period: Duration) -> Self {
        let ticks = u32::try_from(stats.ticks()).unwrap_or(u32::MAX);
        Self {
            score: stats.score(),
            level,
            cleared_lines: stats.cleared_lines(),
            settled_pieces: stats.settled_pieces(),
            line_clear_counter: *stats.line_clear_counter(),
            elapsed: tick_period.saturating_mul(ticks),
        }
    }
}

#[derive(Debug)]
pub struct SessionStatsDisplay<'a> {
    stats: SessionStats,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(stats: SessionStats) -> Self {
        Self { stats, block: None }
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
        super::cells_to_u16(ROWS.len(), 1) + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&SessionStats) -> String),
    LabelValue(&'static str, &'static dyn Fn(&SessionStats) -> String),
}

fn format_elapsed(elapsed: Duration) -> String {
    format!(
        "{:0}:{:0>2}.{:0>2}",
        elapsed.as_secs() / 60,
        elapsed.as_secs() % 60,
        elapsed.subsec_millis() / 10
    )
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|stats| stats.score.to_string()),
    Row::FullLabel("TIME:"),
    Row::FullValue(&|stats| format_elapsed(stats.elapsed)),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|stats| stats.level.to_string()),
    Row::LabelValue("LINES:", &|stats| stats.cleared_lines.to_string()),
    Row::LabelValue("PIECES:", &|stats| stats.settled_pieces.to_string()),
    Row::Empty,
    Row::LabelValue("SINGLES:", &|stats| stats.line_clear_counter[1].to_string()),
    Row::LabelValue("DOUBLES:", &|stats| stats.line_clear_counter[2].to_string()),
    Row::LabelValue("TRIPLES:", &|stats| stats.line_clear_counter[3].to_string()),
    Row::LabelValue("QUADS+:", &|stats| stats.line_clear_counter[4].to_string()),
];

impl Widget for SessionStatsDisplay<'_> {
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
                    Line::styled(value(&self.stats), style)
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
                    Line::styled(value(&self.stats), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
