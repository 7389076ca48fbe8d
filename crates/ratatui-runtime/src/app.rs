use ratatui::Frame;

use crate::{Quantum, Runtime};

/// Trait for TUI applications.
///
/// Applications executed by `Runtime::run()` must implement this trait.
/// The runtime wakes once per scheduling quantum, hands the application the
/// ticks that came due and the terminal events that arrived, and draws only
/// when the application reports a visible change.
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Runtime::run()`. Use this to configure the tick rate and render mode.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Processes one quantum: its input events in arrival order, then its ticks.
    fn update(&mut self, runtime: &mut Runtime, quantum: Quantum);

    /// Returns whether the screen is stale, clearing the flag.
    ///
    /// Called after every `update()`. A stale screen is redrawn as soon as the
    /// render mode allows.
    fn needs_redraw(&mut self) -> bool;

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);
}
