//! Game rules and level progression

pub mod processor;
pub mod progression;

pub use processor::{process_events, RuleOutcome};
pub use progression::{check_progression, LevelTransition};
