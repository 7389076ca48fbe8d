//! Game rules and session state.
//!
//! This module builds the game on top of the board and piece types in
//! [`core`](crate::core):
//!
//! - [`GameSession`] - The game state machine: spawning, gravity, commands, game over
//! - [`GameConfig`] - Board size, clock period and difficulty table
//! - [`DifficultyTable`] / [`LevelTracker`] - Score thresholds and fall speed
//! - [`settle`] / [`clear_completed_lines`] - Merging pieces and scoring rows
//! - [`GameStats`] - Score, cleared lines and settled pieces
//! - [`PieceRng`] / [`RandomSource`] - Piece and color selection
//! - [`GameEvent`] - Committed transitions, for recording a session
//! - [`Snapshot`] - Read-only view for renderers
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] and call [`start`](GameSession::start) to spawn the first piece
//! 2. Feed it clock ticks and player commands
//! 3. When the piece cannot fall further it settles, full rows are cleared and
//!    the next piece spawns
//! 4. The game ends when a freshly spawned piece collides with the board
//!
//! # Example
//!
//! ```
//! use cascadris_engine::{GameConfig, GameSession, PieceRng};
//!
//! let mut session = GameSession::new(GameConfig::default(), PieceRng::new()).unwrap();
//! session.start();
//!
//! // rotate, move left and drop one row
//! session.apply_input("was".chars());
//!
//! while !session.state().is_game_over() {
//!     session.apply_input("s".chars());
//! }
//! println!("final score: {}", session.score());
//! ```

pub use self::{
    command::*, config::*, difficulty::*, event::*, game_session::*, game_stats::*, line_clear::*,
    random::*, snapshot::*,
};

mod command;
mod config;
mod difficulty;
mod event;
mod game_session;
mod game_stats;
mod line_clear;
mod random;
mod snapshot;
