use serde::{Deserialize, Serialize};

use crate::core::{cell::Color, piece::Position, shape::PieceKind};

/// A committed state transition of a [`GameSession`](super::GameSession).
///
/// Moves and rotations are not reported; only the transitions that change
/// the board, the score, the level or the session state are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new piece entered the board.
    Spawned {
        kind: PieceKind,
        color: Color,
        origin: Position,
    },
    /// The falling piece was merged into the board.
    Settled {
        kind: PieceKind,
        color: Color,
        origin: Position,
    },
    /// A line clear pass removed at least one row.
    LinesCleared { lines: usize, points: u64, score: u64 },
    /// The score crossed a difficulty threshold.
    LevelUp { level: usize, interval_ms: u64 },
    /// A spawned piece collided with the board.
    GameOver { score: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::Spawned {
            kind: PieceKind::T,
            color: Color::Green,
            origin: Position::new(4, 0),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"event":"spawned","kind":"T","color":"green","origin":{"x":4,"y":0}}"#
        );
        let parsed: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_lines_cleared_serialization() {
        let event = GameEvent::LinesCleared {
            lines: 2,
            points: 300,
            score: 1_300,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"event":"lines_cleared","lines":2,"points":300,"score":1300}"#
        );
    }
}
