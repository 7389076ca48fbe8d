use super::{board::Board, piece::Position, shape::Shape};

/// Returns whether `shape` placed at `origin` collides with `board`.
///
/// A filled cell of the shape collides when its absolute column is outside
/// the board, when its absolute row is at or below the floor, or when it lands
/// on a settled cell. Rows above the top of the board (negative `y`) are open
/// space, so a shape poking out of the top never collides there.
///
/// # Example
///
/// ```
/// use cascadris_engine::{Board, PieceKind, Position, collides};
///
/// let board = Board::new(10, 20).unwrap();
/// let square = PieceKind::Square.shape();
///
/// assert!(!collides(&board, &square, Position::new(0, -1)));
/// assert!(collides(&board, &square, Position::new(9, 0)));
/// assert!(collides(&board, &square, Position::new(0, 19)));
/// ```
#[must_use]
pub fn collides(board: &Board, shape: &Shape, origin: Position) -> bool {
    shape.filled_positions().any(|(dx, dy)| {
        let (x, y) = origin.offset(dx, dy);
        let Ok(x) = usize::try_from(x) else {
            return true;
        };
        if x >= board.width() {
            return true;
        }
        let Ok(y) = usize::try_from(y) else {
            return false;
        };
        y >= board.height() || board.is_occupied(x, y)
    })
}

#[cfg(test)]
mod tests {
    use crate::core::shape::PieceKind;

    use super::*;

    #[test]
    fn test_empty_board_inside_bounds() {
        let board = Board::new(10, 20).unwrap();
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let max_x = i32::try_from(10 - shape.width()).unwrap();
            let max_y = i32::try_from(20 - shape.height()).unwrap();
            for (x, y) in [(0, 0), (max_x, 0), (0, max_y), (max_x, max_y)] {
                assert!(
                    !collides(&board, &shape, Position::new(x, y)),
                    "{kind:?} at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_walls() {
        let board = Board::new(10, 20).unwrap();
        let bar = PieceKind::Bar.shape();
        assert!(collides(&board, &bar, Position::new(-1, 5)));
        assert!(collides(&board, &bar, Position::new(7, 5)));
        assert!(!collides(&board, &bar, Position::new(6, 5)));
    }

    #[test]
    fn test_floor() {
        let board = Board::new(10, 20).unwrap();
        let t = PieceKind::T.shape();
        assert!(!collides(&board, &t, Position::new(3, 18)));
        assert!(collides(&board, &t, Position::new(3, 19)));
    }

    #[test]
    fn test_above_top_is_open() {
        let board = Board::new(10, 20).unwrap();
        let upright = PieceKind::Bar.shape().rotated_right();
        assert!(!collides(&board, &upright, Position::new(4, -3)));
        assert!(!collides(&board, &upright, Position::new(4, -10)));
    }

    #[test]
    fn test_empty_shape_cells_ignored() {
        let board = Board::new(3, 3).unwrap();
        let hook = Shape::from_rows(&["#  ", "#  "]);
        assert!(!collides(&board, &hook, Position::new(2, 1)));
        assert!(collides(&board, &hook, Position::new(3, 1)));
        assert!(collides(&board, &hook, Position::new(2, 2)));
    }

    #[test]
    fn test_settled_cells() {
        let board = Board::from_rows(&[
            "....", //
            "....", //
            ".R..", //
            "RRR.",
        ]);
        let square = PieceKind::Square.shape();
        assert!(collides(&board, &square, Position::new(0, 1)));
        assert!(!collides(&board, &square, Position::new(2, 1)));
        assert!(!collides(&board, &square, Position::new(0, 0)));
        assert!(collides(&board, &square, Position::new(2, 2)));
    }

    #[test]
    fn test_settled_cells_ignored_above_top() {
        let board = Board::from_rows(&["RR..", "RR.."]);
        let square = PieceKind::Square.shape();
        assert!(collides(&board, &square, Position::new(0, -1)));
        assert!(!collides(&board, &square, Position::new(0, -2)));
    }
}
