use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use cascadris_engine::{GameConfig, GameSession, PieceRng, PieceSeed};

use crate::{command::play::app::PlayApp, record::SessionRecorder, util};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Board width in cells
    #[clap(long, default_value_t = GameConfig::DEFAULT_WIDTH)]
    width: usize,
    /// Board height in cells
    #[clap(long, default_value_t = GameConfig::DEFAULT_HEIGHT)]
    height: usize,
    /// Clock ticks per second
    #[clap(long, default_value_t = DEFAULT_TICK_RATE, value_parser = clap::value_parser!(u32).range(1..=1000))]
    tick_rate: u32,
    /// Piece seed as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Difficulty table JSON file (see the `difficulty` command)
    #[clap(long)]
    difficulty: Option<PathBuf>,
    /// Write a JSON-lines recording of the session to this file
    #[clap(long)]
    record: Option<PathBuf>,
}

const DEFAULT_TICK_RATE: u32 = 100;

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            width: GameConfig::DEFAULT_WIDTH,
            height: GameConfig::DEFAULT_HEIGHT,
            tick_rate: DEFAULT_TICK_RATE,
            seed: None,
            difficulty: None,
            record: None,
        }
    }
}

impl PlayArg {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let difficulty = match &self.difficulty {
            Some(path) => util::read_difficulty_file(path)?,
            None => Default::default(),
        };
        let config = GameConfig {
            width: self.width,
            height: self.height,
            tick_period: Duration::from_secs(1) / self.tick_rate.max(1),
            difficulty,
        };
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = arg.game_config()?;
    let rng = arg.seed.map_or_else(PieceRng::new, PieceRng::with_seed);
    let seed = rng.seed();

    let recorder = match &arg.record {
        Some(path) => {
            let mut recorder = SessionRecorder::create(path)?;
            recorder.write_header(seed, &config)?;
            Some(recorder)
        }
        None => None,
    };

    let session = GameSession::new(config, rng).context("Failed to start game session")?;
    let mut app = PlayApp::new(session, recorder);
    ratatui_runtime::Runtime::new()
        .run(&mut app)
        .context("Terminal error")?;

    let (session, recorder) = app.finish()?;
    if let (Some(recorder), Some(path)) = (recorder, &arg.record) {
        let events = recorder.event_count();
        recorder.finish(session.stats())?;
        eprintln!("Recorded {events} events to {}", path.display());
    }

    let stats = session.stats();
    println!("Final score: {}", stats.score());
    println!(
        "Level {}, {} lines cleared, {} pieces (seed {seed})",
        session.level(),
        stats.cleared_lines(),
        stats.settled_pieces()
    );
    Ok(())
}
