pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding with walls, floor or settled cells")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("board dimensions must be within 1..={}, got {width}x{height}", crate::Board::MAX_DIMENSION)]
pub struct BoardSizeError {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DifficultyTableError {
    #[display("difficulty table has no levels")]
    Empty,
    #[display("first difficulty level must start at score 0, got {_0}")]
    NonZeroStart(#[error(not(source))] u64),
    #[display("difficulty thresholds must be strictly increasing (level {level})")]
    NotAscending { level: usize },
    #[display("tick interval of level {level} must be positive")]
    ZeroInterval { level: usize },
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    #[display("invalid board size: {_0}")]
    #[from]
    BoardSize(BoardSizeError),
    #[display("invalid difficulty table: {_0}")]
    #[from]
    Difficulty(DifficultyTableError),
    #[display("clock tick period must be positive")]
    ZeroTickPeriod,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum MoveError {
    #[display("no piece is falling")]
    NotFalling,
    #[display("move rejected: {_0}")]
    #[from]
    PieceCollision(PieceCollisionError),
}
