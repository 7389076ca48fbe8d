use std::iter;

use cascadris_engine::Snapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::CellDisplay;

/// The board with the falling piece drawn over it.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    snapshot: &'a Snapshot<'a>,
    show_dots: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(snapshot: &'a Snapshot<'a>) -> Self {
        Self {
            snapshot,
            show_dots: !snapshot.game_over,
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
        super::cells_to_u16(self.snapshot.board.width(), CellDisplay::WIDTH)
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        super::cells_to_u16(self.snapshot.board.height(), CellDisplay::HEIGHT)
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
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

        let board = self.snapshot.board;
        let col_constraints =
            (0..board.width()).map(|_| Constraint::Length(CellDisplay::WIDTH));
        let row_constraints =
            (0..board.height()).map(|_| Constraint::Length(CellDisplay::HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        for (grid_row, cells) in iter::zip(vertical.split(area).iter(), self.snapshot.rows()) {
            for (grid_cell, cell) in iter::zip(horizontal.split(*grid_row).iter(), cells) {
                CellDisplay::from_cell(cell, self.show_dots).render(*grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cascadris_engine::{Board, Color, Piece, PieceKind, Position};

    use super::*;
    use crate::ui::widgets::style;

    #[test]
    fn test_renders_piece_over_board() {
        let board = Board::from_rows(&["...", "...", "G.."]);
        let piece = Piece::new(PieceKind::Square, Color::Blue, Position::new(1, 0));
        let snapshot = Snapshot {
            board: &board,
            active_piece: Some(&piece),
            score: 0,
            level: 1,
            cleared_lines: 0,
            game_over: false,
        };
        let display = BoardDisplay::new(&snapshot);
        assert_eq!((display.width(), display.height()), (6, 3));

        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), ".");
        assert_eq!(buf[(2, 0)].style().bg, style::filled(Color::Blue).bg);
        assert_eq!(buf[(5, 1)].style().bg, style::filled(Color::Blue).bg);
        assert_eq!(buf[(0, 2)].style().bg, style::filled(Color::Green).bg);
        assert_eq!(buf[(2, 2)].symbol(), ".");
    }

    #[test]
    fn test_block_adds_margin() {
        let board = Board::new(10, 20).unwrap();
        let snapshot = Snapshot {
            board: &board,
            active_piece: None,
            score: 0,
            level: 1,
            cleared_lines: 0,
            game_over: false,
        };
        let display = BoardDisplay::new(&snapshot).block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (22, 22));
    }
}
