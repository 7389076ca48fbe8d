use std::time::Duration;

use crate::{ConfigError, core::board::Board};

use super::difficulty::DifficultyTable;

/// Settings fixed for the lifetime of a [`GameSession`](super::GameSession).
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use cascadris_engine::GameConfig;
///
/// let config = GameConfig {
///     width: 12,
///     tick_period: Duration::from_millis(20),
///     ..GameConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    /// Period of the external clock delivering [`tick`](super::GameSession::tick)s.
    pub tick_period: Duration,
    /// Score thresholds and gravity intervals.
    pub difficulty: DifficultyTable,
}

impl GameConfig {
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 20;
    pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(10);

    pub fn validate(&self) -> Result<(), ConfigError> {
        Board::new(self.width, self.height)?;
        self.validate_timing()
    }

    pub(crate) fn validate_timing(&self) -> Result<(), ConfigError> {
        if self.tick_period.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        Ok(())
    }

    /// Returns how many clock ticks make up one gravity `interval`, rounding
    /// up and never less than one.
    #[must_use]
    pub fn ticks_per(&self, interval: Duration) -> u64 {
        let period = self.tick_period.as_nanos().max(1);
        let ticks = interval.as_nanos().div_ceil(period).max(1);
        u64::try_from(ticks).unwrap_or(u64::MAX)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            tick_period: Self::DEFAULT_TICK_PERIOD,
            difficulty: DifficultyTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::BoardSizeError;

    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (10, 20));
    }

    #[test]
    fn test_invalid_board_size() {
        let config = GameConfig {
            height: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoardSize(BoardSizeError {
                width: 10,
                height: 0
            }))
        ));
    }

    #[test]
    fn test_zero_tick_period() {
        let config = GameConfig {
            tick_period: Duration::ZERO,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroTickPeriod)
        ));
    }

    #[test]
    fn test_ticks_per_interval() {
        let config = GameConfig::default();
        assert_eq!(config.ticks_per(Duration::from_millis(1200)), 120);
        assert_eq!(config.ticks_per(Duration::from_millis(205)), 21);
        assert_eq!(config.ticks_per(Duration::from_millis(1)), 1);
        assert_eq!(config.ticks_per(Duration::ZERO), 1);
    }
}
