use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest width or height of any shape in the catalog.
pub const MAX_SHAPE_SIZE: usize = 4;

/// A polyomino grid of `width × height` filled/empty cells.
///
/// Shapes are small `Copy` values. Rotation produces a new shape with swapped
/// dimensions rather than tracking a rotation index, so a rotated shape is
/// indistinguishable from a catalog template drawn that way.
///
/// # Example
///
/// ```
/// use cascadris_engine::PieceKind;
///
/// let bar = PieceKind::Bar.shape();
/// assert_eq!((bar.width(), bar.height()), (4, 1));
///
/// let upright = bar.rotated_right();
/// assert_eq!((upright.width(), upright.height()), (1, 4));
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    width: usize,
    height: usize,
}

impl Shape {
    /// Builds a shape from row strings, where a space is empty and any other
    /// character is filled.
    ///
    /// All rows must have the same length, and both dimensions must be within
    /// `1..=MAX_SHAPE_SIZE`.
    #[must_use]
    pub const fn from_rows(rows: &[&str]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_SIZE);
        let width = rows[0].len();
        assert!(width > 0 && width <= MAX_SHAPE_SIZE);

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < rows.len() {
            let row = rows[y].as_bytes();
            assert!(row.len() == width);
            let mut x = 0;
            while x < width {
                cells[y][x] = row[x] != b' ';
                x += 1;
            }
            y += 1;
        }
        Self {
            cells,
            width,
            height: rows.len(),
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

    /// Returns whether the cell at column `x`, row `y` is filled.
    ///
    /// Coordinates outside the shape's bounding box are empty.
    #[must_use]
    pub const fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y][x]
    }

    /// Returns the `(x, y)` offsets of filled cells, row by row.
    pub fn filled_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| self.cells[y][x].then_some((x, y)))
        })
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.filled_positions().count()
    }

    /// Rotates the shape 90° clockwise.
    ///
    /// The new shape is `height × width`; the cell at row `r`, column `c` comes
    /// from row `height - 1 - c`, column `r` of the source.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < self.width {
            let mut c = 0;
            while c < self.height {
                cells[r][c] = self.cells[self.height - 1 - c][r];
                c += 1;
            }
            r += 1;
        }
        Self {
            cells,
            width: self.height,
            height: self.width,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for y in 0..self.height {
            let row: String = (0..self.width)
                .map(|x| if self.cells[y][x] { '#' } else { ' ' })
                .collect();
            list.entry(&row);
        }
        list.finish()
    }
}

/// The six shapes of the fixed piece catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// 2×2 square.
    Square = 0,
    /// T-piece, pointing up.
    T = 1,
    /// 4×1 straight bar.
    Bar = 2,
    /// J-piece, hook at the top right.
    J = 3,
    /// L-piece, hook at the top left.
    L = 4,
    /// Z-piece.
    Z = 5,
}

const CATALOG: [Shape; PieceKind::LEN] = [
    Shape::from_rows(&["##", "##"]),
    Shape::from_rows(&[" # ", "###"]),
    Shape::from_rows(&["####"]),
    Shape::from_rows(&["##", "# ", "# "]),
    Shape::from_rows(&["##", " #", " #"]),
    Shape::from_rows(&["## ", " ##"]),
];

impl PieceKind {
    /// Number of catalog entries.
    pub const LEN: usize = 6;

    /// All catalog entries, in index order.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::Square,
        PieceKind::T,
        PieceKind::Bar,
        PieceKind::J,
        PieceKind::L,
        PieceKind::Z,
    ];

    /// Returns the catalog entry at `index`, wrapping around the catalog length.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::LEN]
    }

    /// Returns the spawn orientation of this piece.
    #[must_use]
    pub const fn shape(self) -> Shape {
        CATALOG[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// ```
    /// use cascadris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::Bar.as_char(), 'I');
    /// assert_eq!(PieceKind::Square.as_char(), 'O');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::Square => 'O',
            PieceKind::T => 'T',
            PieceKind::Bar => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::Z => 'Z',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_dimensions() {
        let dims: Vec<_> = PieceKind::ALL
            .iter()
            .map(|kind| (kind.shape().width(), kind.shape().height()))
            .collect();
        assert_eq!(dims, [(2, 2), (3, 2), (4, 1), (2, 3), (2, 3), (3, 2)]);
    }

    #[test]
    fn test_catalog_pieces_are_tetrominoes() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().filled_count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_from_rows_reads_spaces_as_empty() {
        let shape = Shape::from_rows(&[" X ", "XXX"]);
        assert!(!shape.is_filled(0, 0));
        assert!(shape.is_filled(1, 0));
        assert!(!shape.is_filled(2, 0));
        assert!((0..3).all(|x| shape.is_filled(x, 1)));
        // outside the bounding box
        assert!(!shape.is_filled(3, 1));
        assert!(!shape.is_filled(0, 2));
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = PieceKind::T.shape().rotated_right();
        assert_eq!(rotated, Shape::from_rows(&["# ", "##", "# "]));
    }

    #[test]
    fn test_rotate_z_clockwise() {
        let rotated = PieceKind::Z.shape().rotated_right();
        assert_eq!(rotated, Shape::from_rows(&[" #", "##", "# "]));
    }

    #[test]
    fn test_rotate_j_clockwise() {
        let rotated = PieceKind::J.shape().rotated_right();
        assert_eq!(rotated, Shape::from_rows(&["###", "  #"]));
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let rotated = shape
                .rotated_right()
                .rotated_right()
                .rotated_right()
                .rotated_right();
            assert_eq!(rotated, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_filled_positions_row_major() {
        let positions: Vec<_> = PieceKind::T.shape().filled_positions().collect();
        assert_eq!(positions, [(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_debug_draws_rows() {
        let debug = format!("{:?}", PieceKind::Z.shape());
        assert_eq!(debug, r###"["## ", " ##"]"###);
    }
}
