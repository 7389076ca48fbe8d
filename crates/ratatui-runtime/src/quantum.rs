use crossterm::event::Event;

/// Work collected by one wake-up of the event loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Quantum {
    /// Clock ticks that came due since the previous quantum.
    pub ticks: u32,
    /// Terminal events read without blocking, in arrival order.
    pub events: Vec<Event>,
}
