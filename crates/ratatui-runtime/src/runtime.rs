use std::{
    io,
    time::{Duration, Instant},
};

use crate::{App, RenderMode, event_loop::EventLoop};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    /// Creates a new Runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick interval.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events
            .schedule_mut()
            .set_tick_interval(interval, Instant::now());
    }

    /// Sets the render mode.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.schedule_mut().set_render_mode(mode);
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` and draws the first frame
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - each quantum is passed to `app.update()`
    ///    - `app.draw()` is called when `app.needs_redraw()` reported a change
    ///      and the render mode allows it
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            let mut stale = true;
            while !app.should_exit() {
                let now = Instant::now();
                if self.events.schedule().should_render(now, stale) {
                    terminal.draw(|f| app.draw(f))?;
                    self.events.schedule_mut().mark_rendered(now);
                    stale = false;
                }
                let quantum = self.events.next_quantum(stale)?;
                app.update(&mut self, quantum);
                stale |= app.needs_redraw();
            }
            Ok(())
        })
    }
}
