use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use cascadris_engine::{GameConfig, GameEvent, GameStats, PieceSeed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of a session recording.
///
/// A recording is a JSON-lines file: a `header` line, one `event` line per
/// committed [`GameEvent`], and a closing `stats` line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordLine {
    Header {
        recorded_at: DateTime<Utc>,
        seed: PieceSeed,
        width: usize,
        height: usize,
        tick_period_ms: u64,
    },
    Event {
        at: DateTime<Utc>,
        /// Clock ticks elapsed when the event was drained.
        tick: u64,
        event: GameEvent,
    },
    Stats {
        finished_at: DateTime<Utc>,
        stats: GameStats,
    },
}

/// Writes a session recording line by line.
///
/// Lines are flushed as they are written, so a crash loses at most the
/// current line.
#[derive(Debug)]
pub struct SessionRecorder<W> {
    writer: W,
    target: String,
    events: usize,
}

impl SessionRecorder<BufWriter<File>> {
    pub fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create recording file: {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file), path.display().to_string()))
    }
}

impl<W> SessionRecorder<W>
where
    W: Write,
{
    pub fn new(writer: W, target: String) -> Self {
        Self {
            writer,
            target,
            events: 0,
        }
    }

    /// Returns the number of event lines written so far.
    pub fn event_count(&self) -> usize {
        self.events
    }

    pub fn write_header(&mut self, seed: PieceSeed, config: &GameConfig) -> anyhow::Result<()> {
        self.write_line(&RecordLine::Header {
            recorded_at: Utc::now(),
            seed,
            width: config.width,
            height: config.height,
            tick_period_ms: u64::try_from(config.tick_period.as_millis()).unwrap_or(u64::MAX),
        })
    }

    pub fn write_events<I>(&mut self, tick: u64, events: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = GameEvent>,
    {
        for event in events {
            self.write_line(&RecordLine::Event {
                at: Utc::now(),
                tick,
                event,
            })?;
            self.events += 1;
        }
        Ok(())
    }

    /// Writes the closing stats line and returns the writer.
    pub fn finish(mut self, stats: &GameStats) -> anyhow::Result<W> {
        self.write_line(&RecordLine::Stats {
            finished_at: Utc::now(),
            stats: stats.clone(),
        })?;
        Ok(self.writer)
    }

    fn write_line(&mut self, line: &RecordLine) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.writer, line)
            .with_context(|| format!("Failed to write recording to {}", self.target))?;
        writeln!(self.writer)
            .with_context(|| format!("Failed to write recording to {}", self.target))?;
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush recording to {}", self.target))?;
        Ok(())
    }
}
