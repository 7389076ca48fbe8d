use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    cell::Color,
    shape::{MAX_SHAPE_SIZE, PieceKind, Shape},
};

/// Board coordinates of a piece's top-left bounding-box corner.
///
/// Coordinates are signed: rotating near the top of the board can lift a
/// piece partly above row `0`, and candidate moves may point past a wall
/// before the collision check rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the absolute coordinates of the shape cell at `(dx, dy)`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn offset(self, dx: usize, dy: usize) -> (i32, i32) {
        debug_assert!(dx < MAX_SHAPE_SIZE && dy < MAX_SHAPE_SIZE);
        (self.x + dx as i32, self.y + dy as i32)
    }

    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// The falling piece: a shape, its color and where it sits on the board.
///
/// Pieces are values. Movement and rotation return new pieces and never look
/// at the board; the session commits a candidate only after it passes the
/// collision check, which makes every move all-or-nothing.
///
/// # Example
///
/// ```
/// use cascadris_engine::{Color, Piece, PieceKind, Position};
///
/// let piece = Piece::spawn(PieceKind::Square, 10, Color::Blue);
/// assert_eq!(piece.origin(), Position::new(4, 0));
///
/// let moved = piece.left().down();
/// assert_eq!(moved.origin(), Position::new(3, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    color: Color,
    origin: Position,
}

impl Piece {
    /// Creates a piece in its spawn orientation at `origin`.
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color, origin: Position) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            color,
            origin,
        }
    }

    /// Places a fresh catalog piece horizontally centered at the top of a
    /// board `board_width` cells wide.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn spawn(kind: PieceKind, board_width: usize, color: Color) -> Self {
        let x = (board_width / 2) as i32 - (kind.shape().width() / 2) as i32;
        Self::new(kind, color, Position::new(x, 0))
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn origin(&self) -> Position {
        self.origin
    }

    /// Returns the absolute board coordinates of the filled cells.
    #[must_use]
    pub fn cells(&self) -> ArrayVec<(i32, i32), { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }> {
        self.shape
            .filled_positions()
            .map(|(dx, dy)| self.origin.offset(dx, dy))
            .collect()
    }

    /// Returns whether the piece covers the absolute cell `(x, y)`.
    #[must_use]
    pub fn covers(&self, x: i32, y: i32) -> bool {
        let (Ok(dx), Ok(dy)) = (
            usize::try_from(x - self.origin.x),
            usize::try_from(y - self.origin.y),
        ) else {
            return false;
        };
        self.shape.is_filled(dx, dy)
    }

    #[must_use]
    pub const fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            origin: self.origin.translated(dx, dy),
            ..*self
        }
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.moved(-1, 0)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.moved(1, 0)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.moved(0, 1)
    }

    /// Rotates the shape 90° clockwise around its bounding-box center.
    ///
    /// The origin shifts by half the change in each dimension (truncated
    /// toward zero), so a 4×1 bar becomes a 1×4 bar one column right and one
    /// row up. Four rotations restore the original shape and origin.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn rotated_right(&self) -> Self {
        let shape = self.shape.rotated_right();
        let dw = shape.width() as i32 - self.shape.width() as i32;
        let dh = shape.height() as i32 - self.shape.height() as i32;
        Self {
            shape,
            origin: self.origin.translated(-(dw / 2), -(dh / 2)),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_centered_top_aligned() {
        let cases = [
            (PieceKind::Square, 10, 4),
            (PieceKind::T, 10, 4),
            (PieceKind::Bar, 10, 3),
            (PieceKind::J, 10, 4),
            (PieceKind::Z, 10, 4),
            (PieceKind::Bar, 7, 1),
            (PieceKind::T, 7, 2),
        ];
        for (kind, width, x) in cases {
            let piece = Piece::spawn(kind, width, Color::Red);
            assert_eq!(piece.origin(), Position::new(x, 0), "{kind:?} on {width}");
            assert_eq!(piece.shape(), &kind.shape());
        }
    }

    #[test]
    fn test_cells_are_absolute() {
        let piece = Piece::new(PieceKind::T, Color::Green, Position::new(2, 5));
        let cells: Vec<_> = piece.cells().into_iter().collect();
        assert_eq!(cells, [(3, 5), (2, 6), (3, 6), (4, 6)]);
    }

    #[test]
    fn test_covers() {
        let piece = Piece::new(PieceKind::T, Color::Green, Position::new(2, 5));
        assert!(piece.covers(3, 5));
        assert!(piece.covers(4, 6));
        assert!(!piece.covers(2, 5));
        assert!(!piece.covers(1, 6));
        assert!(!piece.covers(3, 7));
    }

    #[test]
    fn test_moves_translate_origin_only() {
        let piece = Piece::new(PieceKind::J, Color::Cyan, Position::new(4, 4));
        assert_eq!(piece.left().origin(), Position::new(3, 4));
        assert_eq!(piece.right().origin(), Position::new(5, 4));
        assert_eq!(piece.down().origin(), Position::new(4, 5));
        assert_eq!(piece.left().shape(), piece.shape());
        assert_eq!(piece.down().color(), Color::Cyan);
    }

    #[test]
    fn test_rotate_bar_recenters() {
        let bar = Piece::new(PieceKind::Bar, Color::Red, Position::new(3, 5));
        let upright = bar.rotated_right();
        assert_eq!((upright.shape().width(), upright.shape().height()), (1, 4));
        assert_eq!(upright.origin(), Position::new(4, 4));

        let flat = upright.rotated_right();
        assert_eq!(flat.origin(), Position::new(3, 5));
    }

    #[test]
    fn test_rotate_square_keeps_origin() {
        let square = Piece::new(PieceKind::Square, Color::Red, Position::new(3, 5));
        assert_eq!(square.rotated_right(), square);
    }

    #[test]
    fn test_rotate_three_by_two_keeps_origin() {
        // (2 - 3) / 2 and (3 - 2) / 2 both truncate to zero
        let t = Piece::new(PieceKind::T, Color::Red, Position::new(3, 5));
        assert_eq!(t.rotated_right().origin(), Position::new(3, 5));
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind, Color::Yellow, Position::new(4, 6));
            let rotated = piece
                .rotated_right()
                .rotated_right()
                .rotated_right()
                .rotated_right();
            assert_eq!(rotated, piece, "{kind:?}");
        }
    }
}
