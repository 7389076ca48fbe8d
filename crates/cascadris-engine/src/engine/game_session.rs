use std::{collections::VecDeque, time::Duration};

use crate::{
    ConfigError, MoveError, PieceCollisionError,
    core::{board::Board, cell::Color, piece::Piece, shape::PieceKind},
};

use super::{
    command::Command,
    config::GameConfig,
    difficulty::LevelTracker,
    event::GameEvent,
    game_stats::GameStats,
    line_clear::{self, LineClear},
    random::{PieceRng, RandomSource},
    snapshot::Snapshot,
};

/// Events kept for [`GameSession::drain_events`]; older ones are dropped
/// when nobody drains them.
const MAX_PENDING_EVENTS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// No piece is falling; the next one is about to spawn.
    Spawning,
    Falling,
    /// A spawned piece collided with the board. Terminal.
    GameOver,
}

/// A complete game: board, falling piece, score, level and the gravity clock.
///
/// The session is driven from outside. [`tick`](Self::tick) is called once
/// per period of the external clock and [`apply`](Self::apply) once per
/// player command; both do a bounded amount of work and never block. Every
/// move is validated against the board before it is committed, so the
/// falling piece never overlaps walls, floor or settled cells.
///
/// # Example
///
/// ```
/// use cascadris_engine::{Command, GameConfig, GameSession, PieceRng, PieceSeed};
///
/// let rng = PieceRng::with_seed(PieceSeed::from_u128(42));
/// let mut session = GameSession::new(GameConfig::default(), rng).unwrap();
/// session.start();
/// assert!(session.state().is_falling());
///
/// session.apply(Command::SoftDrop);
/// for _ in 0..1_000 {
///     session.tick();
/// }
/// assert!(session.take_dirty());
///
/// let snapshot = session.snapshot();
/// assert_eq!(snapshot.level, 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession<R = PieceRng> {
    config: GameConfig,
    board: Board,
    active_piece: Option<Piece>,
    state: SessionState,
    stats: GameStats,
    levels: LevelTracker,
    rng: R,
    gravity_ticks: u64,
    ticks_until_gravity: u64,
    dirty: bool,
    events: VecDeque<GameEvent>,
}

impl<R> GameSession<R>
where
    R: RandomSource,
{
    /// Creates a session with an empty board in the `Spawning` state.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.width, config.height)?;
        Ok(Self::from_parts(board, config, rng))
    }

    /// Creates a session on a prepared board.
    ///
    /// The board's dimensions replace the ones in `config`.
    pub fn with_board(board: Board, config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        let config = GameConfig {
            width: board.width(),
            height: board.height(),
            ..config
        };
        config.validate_timing()?;
        Ok(Self::from_parts(board, config, rng))
    }

    fn from_parts(board: Board, config: GameConfig, rng: R) -> Self {
        let levels = LevelTracker::new(config.difficulty.clone());
        let gravity_ticks = config.ticks_per(levels.tick_interval());
        Self {
            config,
            board,
            active_piece: None,
            state: SessionState::Spawning,
            stats: GameStats::new(),
            levels,
            rng,
            gravity_ticks,
            ticks_until_gravity: gravity_ticks,
            dirty: true,
            events: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&Piece> {
        self.active_piece.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.levels.level()
    }

    /// Returns the gravity interval at the current level.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.levels.tick_interval()
    }

    /// Returns how many clock ticks pass between gravity steps at the
    /// current level.
    #[must_use]
    pub fn ticks_per_gravity(&self) -> u64 {
        self.gravity_ticks
    }

    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            active_piece: self.active_piece.as_ref(),
            score: self.stats.score(),
            level: self.levels.level(),
            cleared_lines: self.stats.cleared_lines(),
            game_over: self.state.is_game_over(),
        }
    }

    /// Returns whether anything visible changed since the last call, and
    /// clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Removes and returns the events recorded since the last drain, oldest
    /// first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Spawns the first piece. Does nothing once the game has started.
    pub fn start(&mut self) {
        if self.state.is_spawning() {
            self.spawn();
        }
    }

    /// Advances the gravity clock by one tick.
    ///
    /// Returns `true` if this tick performed a gravity step. Ticks after
    /// game over are ignored.
    pub fn tick(&mut self) -> bool {
        self.start();
        if !self.state.is_falling() {
            return false;
        }
        self.stats.record_tick();
        self.ticks_until_gravity = self.ticks_until_gravity.saturating_sub(1);
        if self.ticks_until_gravity > 0 {
            return false;
        }
        self.ticks_until_gravity = self.gravity_ticks;
        self.gravity_step();
        true
    }

    /// Applies one player command and returns whether it changed the state.
    ///
    /// Rejected moves and rotations leave the session untouched. A soft drop
    /// is a full gravity step: it settles the piece when it cannot move down.
    pub fn apply(&mut self, command: Command) -> bool {
        self.start();
        if !self.state.is_falling() {
            return false;
        }
        match command {
            Command::MoveLeft => self.try_move_left().is_ok(),
            Command::MoveRight => self.try_move_right().is_ok(),
            Command::Rotate => self.try_rotate().is_ok(),
            Command::SoftDrop => {
                self.gravity_step();
                true
            }
        }
    }

    /// Applies a batch of input symbols in order and returns how many of
    /// them were committed. Symbols that are not commands are ignored.
    pub fn apply_input<I>(&mut self, symbols: I) -> usize
    where
        I: IntoIterator<Item = char>,
    {
        symbols
            .into_iter()
            .filter_map(Command::from_symbol)
            .filter(|&command| self.apply(command))
            .count()
    }

    pub fn try_move_left(&mut self) -> Result<(), MoveError> {
        let piece = self.falling_piece()?;
        self.set_falling_piece(piece.left())?;
        Ok(())
    }

    pub fn try_move_right(&mut self) -> Result<(), MoveError> {
        let piece = self.falling_piece()?;
        self.set_falling_piece(piece.right())?;
        Ok(())
    }

    /// Moves the piece one row down without settling it. Players go through
    /// [`Command::SoftDrop`], which settles on collision.
    pub(crate) fn try_move_down(&mut self) -> Result<(), MoveError> {
        let piece = self.falling_piece()?;
        self.set_falling_piece(piece.down())?;
        Ok(())
    }

    pub fn try_rotate(&mut self) -> Result<(), MoveError> {
        let piece = self.falling_piece()?;
        self.set_falling_piece(piece.rotated_right())?;
        Ok(())
    }

    fn falling_piece(&self) -> Result<Piece, MoveError> {
        self.active_piece.ok_or(MoveError::NotFalling)
    }

    fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.board.is_colliding(&piece) {
            return Err(PieceCollisionError);
        }
        self.active_piece = Some(piece);
        self.dirty = true;
        Ok(())
    }

    fn gravity_step(&mut self) {
        let Some(piece) = self.active_piece else {
            return;
        };
        if self.try_move_down().is_err() {
            self.complete_piece(piece);
        }
    }

    /// Settles `piece`, clears lines, updates score and level, then spawns
    /// the next piece.
    fn complete_piece(&mut self, piece: Piece) {
        line_clear::settle(&mut self.board, &piece);
        self.active_piece = None;
        self.state = SessionState::Spawning;
        self.dirty = true;
        self.push_event(GameEvent::Settled {
            kind: piece.kind(),
            color: piece.color(),
            origin: piece.origin(),
        });

        let cleared = line_clear::clear_completed_lines(&mut self.board);
        self.stats.complete_piece(cleared);
        if !cleared.is_empty() {
            let LineClear { lines, points } = cleared;
            self.push_event(GameEvent::LinesCleared {
                lines,
                points,
                score: self.stats.score(),
            });
        }
        self.update_level();
        self.spawn();
    }

    fn update_level(&mut self) {
        let previous = self.levels.level();
        let interval = self.levels.current_tick_interval(self.stats.score());
        if self.levels.level() == previous {
            return;
        }
        self.gravity_ticks = self.config.ticks_per(interval);
        self.ticks_until_gravity = self.ticks_until_gravity.min(self.gravity_ticks);
        self.push_event(GameEvent::LevelUp {
            level: self.levels.level(),
            interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
        });
    }

    fn spawn(&mut self) {
        debug_assert!(self.state.is_spawning());
        let kind = PieceKind::from_index(self.rng.next_below(PieceKind::LEN));
        let color = Color::from_index(self.rng.next_below(Color::LEN));
        let piece = Piece::spawn(kind, self.board.width(), color);
        self.dirty = true;

        if self.board.is_colliding(&piece) {
            self.state = SessionState::GameOver;
            self.push_event(GameEvent::GameOver {
                score: self.stats.score(),
            });
            return;
        }
        self.active_piece = Some(piece);
        self.state = SessionState::Falling;
        self.push_event(GameEvent::Spawned {
            kind,
            color,
            origin: piece.origin(),
        });
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}
