use serde::{Deserialize, Serialize};

use super::line_clear::LineClear;

/// Game statistics tracking score, cleared lines and settled pieces.
///
/// - **Score**: points from line clears, see
///   [`clear_completed_lines`](super::line_clear::clear_completed_lines)
/// - **Settled pieces**: number of pieces merged into the board
/// - **Line clear distribution**: how many settles cleared 0, 1, 2, 3 or 4+
///   rows in one pass
/// - **Ticks**: clock ticks processed while the game was running
///
/// # Example
///
/// ```
/// use cascadris_engine::{GameStats, LineClear};
///
/// let mut stats = GameStats::new();
/// stats.complete_piece(LineClear { lines: 2, points: 300 });
///
/// assert_eq!(stats.score(), 300);
/// assert_eq!(stats.cleared_lines(), 2);
/// assert_eq!(stats.line_clear_counter()[2], 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    score: u64,
    settled_pieces: usize,
    cleared_lines: usize,
    line_clear_counter: [usize; 5],
    ticks: u64,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            settled_pieces: 0,
            cleared_lines: 0,
            line_clear_counter: [0; 5],
            ticks: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn settled_pieces(&self) -> usize {
        self.settled_pieces
    }

    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Returns a histogram of settles by rows cleared.
    ///
    /// Index `n` counts settles that cleared `n` rows; the last bucket also
    /// holds passes that cleared more than four rows.
    #[must_use]
    pub const fn line_clear_counter(&self) -> &[usize; 5] {
        &self.line_clear_counter
    }

    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Records a settled piece and the line clear pass that followed it.
    pub fn complete_piece(&mut self, cleared: LineClear) {
        self.settled_pieces += 1;
        self.cleared_lines += cleared.lines;
        let bucket = cleared.lines.min(self.line_clear_counter.len() - 1);
        self.line_clear_counter[bucket] += 1;
        self.score = self.score.saturating_add(cleared.points);
    }

    pub(crate) fn record_tick(&mut self) {
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let stats = GameStats::new();
        assert_eq!(stats, GameStats::default());
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.settled_pieces(), 0);
    }

    #[test]
    fn test_complete_piece_accumulates() {
        let mut stats = GameStats::new();
        stats.complete_piece(LineClear::default());
        stats.complete_piece(LineClear {
            lines: 1,
            points: 100,
        });
        stats.complete_piece(LineClear {
            lines: 4,
            points: 1500,
        });
        assert_eq!(stats.settled_pieces(), 3);
        assert_eq!(stats.cleared_lines(), 5);
        assert_eq!(stats.score(), 1600);
        assert_eq!(stats.line_clear_counter(), &[1, 1, 0, 0, 1]);
    }

    #[test]
    fn test_large_pass_goes_to_last_bucket() {
        let mut stats = GameStats::new();
        stats.complete_piece(LineClear {
            lines: 6,
            points: 6300,
        });
        assert_eq!(stats.line_clear_counter(), &[0, 0, 0, 0, 1]);
        assert_eq!(stats.cleared_lines(), 6);
    }
}
