//! World state and level loading

pub mod loader;
pub mod state;

pub use loader::{load_level, load_level_from_str, LevelSummary, LoadError};
pub use state::WorldState;
