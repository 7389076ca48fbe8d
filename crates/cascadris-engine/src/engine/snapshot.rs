use crate::core::{board::Board, cell::Cell, piece::Piece};

/// Read-only view of everything a renderer needs.
///
/// Borrowed from the session, so it always reflects the current state.
/// Renderers typically take one after [`take_dirty`](super::GameSession::take_dirty)
/// reports a change.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub active_piece: Option<&'a Piece>,
    pub score: u64,
    pub level: usize,
    pub cleared_lines: usize,
    pub game_over: bool,
}

impl Snapshot<'_> {
    /// Returns the cell at `(x, y)` with the falling piece drawn over the
    /// board.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    #[must_use]
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        let cell = self.board.cell(x, y);
        let Some(piece) = self.active_piece else {
            return cell;
        };
        match (i32::try_from(x), i32::try_from(y)) {
            (Ok(px), Ok(py)) if piece.covers(px, py) => Cell::Filled(piece.color()),
            _ => cell,
        }
    }

    /// Returns the composed rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Cell> + '_> + '_ {
        (0..self.board.height()).map(move |y| (0..self.board.width()).map(move |x| self.cell_at(x, y)))
    }
}
