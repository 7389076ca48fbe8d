pub use self::{
    app::App,
    quantum::Quantum,
    runtime::Runtime,
    schedule::{RenderMode, Schedule},
};

mod app;
mod event_loop;
mod quantum;
mod runtime;
mod schedule;
