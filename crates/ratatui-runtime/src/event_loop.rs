use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::{Quantum, Schedule};

/// Upper bound on terminal events read in one quantum.
const MAX_EVENTS_PER_QUANTUM: usize = 64;

/// Event loop state management.
///
/// Waits until a tick is due, input arrives or a pending redraw may be
/// drawn, then drains the input that is already available without blocking
/// and returns everything as one [`Quantum`].
#[derive(Debug)]
pub(super) struct EventLoop {
    schedule: Schedule,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        Self {
            schedule: Schedule::new(Instant::now()),
        }
    }

    pub(super) fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub(super) fn schedule_mut(&mut self) -> &mut Schedule {
        &mut self.schedule
    }

    /// Returns the next quantum.
    ///
    /// With no tick interval and nothing to redraw, blocks until a terminal
    /// event occurs.
    pub(super) fn next_quantum(&mut self, redraw_pending: bool) -> io::Result<Quantum> {
        let mut quantum = Quantum::default();
        let ready = match self.schedule.timeout(Instant::now(), redraw_pending) {
            Some(timeout) => event::poll(timeout)?,
            None => true,
        };
        if ready {
            quantum.events.push(event::read()?);
            while quantum.events.len() < MAX_EVENTS_PER_QUANTUM && event::poll(Duration::ZERO)? {
                quantum.events.push(event::read()?);
            }
        }
        quantum.ticks = self.schedule.due_ticks(Instant::now());
        Ok(quantum)
    }
}
