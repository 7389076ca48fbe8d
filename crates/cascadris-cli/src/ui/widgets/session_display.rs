use std::time::Duration;

use cascadris_engine::{GameSession, RandomSource};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, SessionStats, SessionStatsDisplay, style};

/// The whole play screen body: stats panel and board, with a game over
/// banner across the board once the game has ended.
#[derive(Debug)]
pub struct SessionDisplay<'a, R> {
    session: &'a GameSession<R>,
    tick_period: Duration,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a, R> SessionDisplay<'a, R>
where
    R: RandomSource,
{
    pub fn new(session: &'a GameSession<R>) -> Self {
        Self {
            session,
            tick_period: session.config().tick_period,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }
}

impl<R> Widget for SessionDisplay<'_, R>
where
    R: RandomSource,
{
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let snapshot = self.session.snapshot();
        let border_style = style::border(snapshot.game_over);
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);

        let game_board = BoardDisplay::new(&snapshot).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let session_stats = SessionStatsDisplay::new(SessionStats::new(
            self.session.stats(),
            snapshot.level,
            self.tick_period,
        ))
        .block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);

        if snapshot.game_over {
            let block = Block::new().style(style::GAME_OVER);
            let text = Text::styled("GAME OVER!!", style::GAME_OVER).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
