use std::fmt;

use crate::BoardSizeError;

use super::{
    cell::{Cell, Color},
    collision,
    piece::Piece,
};

/// Fixed-size playfield of `width × height` cells.
///
/// Cells are stored row-major in one flat buffer. Row `0` is the top of the
/// board and `y` grows downward; the dimensions never change after
/// construction.
///
/// Only the merge and line-clear operations write to the board, so the
/// mutating methods are crate-private. Renderers read it through
/// [`rows`](Self::rows) or [`cell`](Self::cell).
///
/// # Example
///
/// ```
/// use cascadris_engine::Board;
///
/// let board = Board::new(10, 20).unwrap();
/// assert_eq!(board.rows().count(), 20);
/// assert!(!board.is_occupied(0, 19));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Largest accepted width or height.
    pub const MAX_DIMENSION: usize = u16::MAX as usize;

    pub fn new(width: usize, height: usize) -> Result<Self, BoardSizeError> {
        let valid = 1..=Self::MAX_DIMENSION;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(BoardSizeError { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    /// Builds a board from fixture rows.
    ///
    /// `.` is an empty cell, a palette character (see [`Color::as_char`]) is a
    /// cell of that color, and any other character is a red cell.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is empty or the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(!rows.is_empty(), "board needs at least one row");
        let width = rows[0].chars().count();
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            assert_eq!(row.chars().count(), width, "ragged board row {row:?}");
            cells.extend(row.chars().map(|c| match c {
                '.' => Cell::Empty,
                c => Cell::Filled(Color::from_char(c).unwrap_or(Color::Red)),
            }));
        }
        Self {
            width,
            height: rows.len(),
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns whether `(x, y)` lies on the board.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        usize::try_from(x).is_ok_and(|x| x < self.width)
            && usize::try_from(y).is_ok_and(|y| y < self.height)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} board",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// Returns whether the cell at `(x, y)` is filled.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board. Collision checks
    /// bounds-check before calling this.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_filled()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Returns the number of filled cells on the board.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Returns whether every cell of row `y` is filled.
    #[must_use]
    pub fn is_row_complete(&self, y: usize) -> bool {
        let start = self.index(0, y);
        self.cells[start..start + self.width]
            .iter()
            .all(|cell| cell.is_filled())
    }

    /// Returns whether `piece` overlaps walls, the floor or settled cells.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        collision::collides(self, piece.shape(), piece.origin())
    }

    pub(crate) fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        let index = self.index(x, y);
        self.cells[index] = cell;
    }

    /// Empties every cell of row `y`.
    pub(crate) fn clear_row(&mut self, y: usize) {
        let start = self.index(0, y);
        self.cells[start..start + self.width].fill(Cell::Empty);
    }

    /// Moves rows `0..from_row` down by one, overwriting `from_row`, and
    /// empties the top row.
    pub(crate) fn shift_down(&mut self, from_row: usize) {
        let end = self.index(0, from_row);
        self.cells.copy_within(..end, self.width);
        self.clear_row(0);
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{} [", self.width, self.height)?;
        for row in self.rows() {
            let line: String = row
                .iter()
                .map(|cell| cell.color().map_or('.', Color::as_char))
                .collect();
            writeln!(f, "    {line}")?;
        }
        write!(f, "]")
    }
}
