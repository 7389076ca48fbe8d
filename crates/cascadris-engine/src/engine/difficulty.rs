use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::DifficultyTableError;

/// One row of the difficulty table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DifficultyLevel {
    /// Minimum score to reach this level.
    pub score: u64,
    /// Time between gravity steps at this level, in milliseconds.
    pub interval_ms: u64,
}

impl DifficultyLevel {
    #[must_use]
    pub const fn new(score: u64, interval_ms: u64) -> Self {
        Self { score, interval_ms }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

const DEFAULT_LEVELS: [DifficultyLevel; 7] = [
    DifficultyLevel::new(0, 1200),
    DifficultyLevel::new(1_500, 900),
    DifficultyLevel::new(8_000, 700),
    DifficultyLevel::new(20_000, 500),
    DifficultyLevel::new(40_000, 400),
    DifficultyLevel::new(75_000, 300),
    DifficultyLevel::new(100_000, 200),
];

/// Ordered mapping from score thresholds to fall speed.
///
/// Thresholds are strictly increasing and the first one is `0`, so every
/// score maps to some level. Levels are numbered from 1.
///
/// The table serializes as a plain JSON array of levels:
///
/// ```
/// use cascadris_engine::DifficultyTable;
///
/// let table: DifficultyTable =
///     serde_json::from_str(r#"[{"score": 0, "interval_ms": 500}, {"score": 100, "interval_ms": 250}]"#)
///         .unwrap();
/// assert_eq!(table.len(), 2);
///
/// // invalid tables are rejected while parsing
/// assert!(serde_json::from_str::<DifficultyTable>(r#"[{"score": 5, "interval_ms": 500}]"#).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DifficultyLevel>", into = "Vec<DifficultyLevel>")]
pub struct DifficultyTable {
    levels: Vec<DifficultyLevel>,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS.to_vec(),
        }
    }
}

impl TryFrom<Vec<DifficultyLevel>> for DifficultyTable {
    type Error = DifficultyTableError;

    fn try_from(levels: Vec<DifficultyLevel>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl From<DifficultyTable> for Vec<DifficultyLevel> {
    fn from(table: DifficultyTable) -> Self {
        table.levels
    }
}

impl DifficultyTable {
    /// Validates and wraps a list of levels.
    pub fn new(levels: Vec<DifficultyLevel>) -> Result<Self, DifficultyTableError> {
        let first = levels.first().ok_or(DifficultyTableError::Empty)?;
        if first.score != 0 {
            return Err(DifficultyTableError::NonZeroStart(first.score));
        }
        for (index, level) in levels.iter().enumerate() {
            if level.interval_ms == 0 {
                return Err(DifficultyTableError::ZeroInterval { level: index + 1 });
            }
        }
        for (index, pair) in levels.windows(2).enumerate() {
            if pair[1].score <= pair[0].score {
                return Err(DifficultyTableError::NotAscending { level: index + 2 });
            }
        }
        Ok(Self { levels })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the level for `score`: the highest 1-based index whose
    /// threshold the score meets, scanning upward and stopping at the first
    /// threshold it misses.
    #[must_use]
    pub fn level_for(&self, score: u64) -> usize {
        self.levels
            .iter()
            .take_while(|level| score >= level.score)
            .count()
            .max(1)
    }

    /// Returns the gravity interval of a 1-based `level`, clamped to the table.
    #[must_use]
    pub fn interval(&self, level: usize) -> Duration {
        let index = level.clamp(1, self.levels.len()) - 1;
        self.levels[index].interval()
    }
}

/// Tracks the current level as the score grows.
///
/// The level only ever rises: a lower score than previously seen keeps the
/// level reached so far.
#[derive(Debug, Clone)]
pub struct LevelTracker {
    table: DifficultyTable,
    level: usize,
}

impl Default for LevelTracker {
    fn default() -> Self {
        Self::new(DifficultyTable::default())
    }
}

impl LevelTracker {
    #[must_use]
    pub fn new(table: DifficultyTable) -> Self {
        Self { table, level: 1 }
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the gravity interval at the current level.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.table.interval(self.level)
    }

    /// Updates the level from `score` and returns the resulting gravity
    /// interval.
    pub fn current_tick_interval(&mut self, score: u64) -> Duration {
        self.level = self.level.max(self.table.level_for(score));
        self.tick_interval()
    }
}
