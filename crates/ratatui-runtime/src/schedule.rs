use std::time::{Duration, Instant};

/// Most ticks delivered in one quantum. A loop that falls further behind
/// drops the excess and restarts its cadence.
const MAX_CATCH_UP_TICKS: u32 = 5;

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::IsVariant)]
pub enum RenderMode {
    /// Render as soon as the application reports a change.
    #[default]
    OnDirty,
    /// Render after changes, but with minimum interval between renders.
    ///
    /// Changes arriving faster than the interval are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Tick and render timing, independent of the terminal.
///
/// Every method takes the current time from the caller, so the schedule can
/// be driven with synthetic instants.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use ratatui_runtime::Schedule;
///
/// let start = Instant::now();
/// let mut schedule = Schedule::new(start);
/// schedule.set_tick_interval(Some(Duration::from_millis(10)), start);
///
/// assert_eq!(schedule.due_ticks(start + Duration::from_millis(9)), 0);
/// assert_eq!(schedule.due_ticks(start + Duration::from_millis(25)), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Schedule {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    next_tick: Instant,
    last_render: Option<Instant>,
}

impl Schedule {
    /// Creates a schedule without ticks that renders on every change.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            next_tick: now,
            last_render: None,
        }
    }

    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    /// Sets the tick interval, restarting the cadence at `now`.
    ///
    /// `None` or a zero interval disables ticks.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>, now: Instant) {
        self.tick_interval = interval.filter(|interval| !interval.is_zero());
        self.next_tick = now + self.tick_interval.unwrap_or_default();
    }

    pub fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns the number of ticks due at `now` and consumes them.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(interval) = self.tick_interval else {
            return 0;
        };
        let mut ticks = 0;
        while self.next_tick <= now {
            ticks += 1;
            self.next_tick += interval;
            if ticks == MAX_CATCH_UP_TICKS {
                if self.next_tick <= now {
                    self.next_tick = now + interval;
                }
                break;
            }
        }
        ticks
    }

    /// Returns whether a stale screen may be drawn at `now`.
    #[must_use]
    pub fn should_render(&self, now: Instant, stale: bool) -> bool {
        stale
            && match self.render_mode {
                RenderMode::OnDirty => true,
                RenderMode::Throttled(interval) => self
                    .last_render
                    .is_none_or(|last| now.duration_since(last) >= interval),
            }
    }

    pub fn mark_rendered(&mut self, now: Instant) {
        self.last_render = Some(now);
    }

    /// Returns how long the loop may wait for input before a tick or a
    /// pending render is due. `None` means no deadline.
    #[must_use]
    pub fn timeout(&self, now: Instant, stale: bool) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|_| self.next_tick);
        let next_render_at = stale.then(|| match (self.render_mode, self.last_render) {
            (RenderMode::Throttled(interval), Some(last)) => last + interval,
            _ => now,
        });
        let deadline = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(deadline.saturating_duration_since(now))
    }
}
