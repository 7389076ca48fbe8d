use serde::{Deserialize, Serialize};

use crate::core::{board::Board, cell::Cell, piece::Piece};

/// Points for the first row completed in a pass. Each further row in the
/// same pass is worth twice the previous one.
pub const BASE_LINE_POINTS: u64 = 100;

/// Outcome of one [`clear_completed_lines`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct LineClear {
    /// Number of rows removed.
    pub lines: usize,
    /// Points awarded for the pass.
    pub points: u64,
}

impl LineClear {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines == 0
    }
}

/// Writes the filled cells of `piece` into `board` with the piece's color.
///
/// Cells above the top of the board are dropped. Every other cell of the
/// piece must lie on an empty board cell; the caller settles the last
/// placement that passed the collision check.
pub fn settle(board: &mut Board, piece: &Piece) {
    debug_assert!(
        !board.is_colliding(piece),
        "settling a colliding piece: {piece:?}"
    );
    for (x, y) in piece.cells() {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            continue;
        };
        board.set_cell(x, y, Cell::Filled(piece.color()));
    }
}

/// Removes every complete row and returns the rows cleared and points earned.
///
/// Rows are scanned from the bottom up. When a complete row is found, it is
/// worth `100 * 2^k` points where `k` counts the rows already cleared in this
/// pass, everything above it drops one row, and the same row index is checked
/// again since new content has moved into it. Clearing 1, 2, 3 or 4 rows in
/// one pass is worth 100, 300, 700 or 1500 points.
///
/// # Example
///
/// ```
/// use cascadris_engine::{Board, LineClear, clear_completed_lines};
///
/// let mut board = Board::from_rows(&["R...", "RRRR", "RRRR"]);
/// let cleared = clear_completed_lines(&mut board);
///
/// assert_eq!(cleared, LineClear { lines: 2, points: 300 });
/// assert_eq!(board, Board::from_rows(&["....", "....", "R..."]));
/// ```
pub fn clear_completed_lines(board: &mut Board) -> LineClear {
    let mut result = LineClear::default();
    let mut points = BASE_LINE_POINTS;
    let mut y = board.height();
    while y > 0 {
        let row = y - 1;
        if board.is_row_complete(row) {
            result.lines += 1;
            result.points = result.points.saturating_add(points);
            points = points.saturating_mul(2);
            board.shift_down(row);
            continue;
        }
        y -= 1;
    }
    result
}
