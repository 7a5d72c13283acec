//! Level progression check run after the rules each tick

use crate::world::loader::{load_level, LevelSummary};
use crate::world::state::WorldState;
use std::path::PathBuf;

/// A level change performed by [`check_progression`]
#[derive(Debug, Clone, PartialEq)]
pub struct LevelTransition {
    /// 1-based index of the level now current
    pub level: u32,
    pub path: PathBuf,
    /// `None` when the next level file could not be read
    pub summary: Option<LevelSummary>,
}

/// Advance to the next level once the loaded level's target is reached
///
/// At most one transition per call. Nothing happens while no level is
/// loaded or once the run is over.
pub fn check_progression(world: &mut WorldState) -> Option<LevelTransition> {
    if !world.level_loaded || world.game_over || !world.target_reached() {
        return None;
    }

    let level = world.current_level + 1;
    let path = world.config().level_path(level);
    tracing::info!(
        "Target {} reached with score {}, advancing to level {}",
        world.level_target_score,
        world.score,
        level
    );

    world.current_level = level;
    let summary = load_level(world, &path).ok();

    Some(LevelTransition {
        level,
        path,
        summary,
    })
}
