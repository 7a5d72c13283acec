//! Tick-scoped event queue between collision detection and game rules

pub mod queue;

pub use queue::{Drain, Event, EventKind, EventQueue};
