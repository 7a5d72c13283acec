//! Owns the world and its broad-phase grid for a host loop

use crate::core::config::EngineConfig;
use crate::core::error::ConfigError;
use crate::core::types::Direction;
use crate::simulation::tick::{run_simulation_tick, TickReport};
use crate::spatial::grid::SpatialGrid;
use crate::world::loader::{load_level, LevelSummary, LoadError};
use crate::world::state::WorldState;

/// A running game: world state plus the grid rebuilt each tick
#[derive(Debug, Clone)]
pub struct Simulation {
    pub world: WorldState,
    grid: SpatialGrid,
}

impl Simulation {
    /// Validate `config` and size the world and grid from it
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = SpatialGrid::from_config(&config);
        Ok(Self {
            world: WorldState::new(config),
            grid,
        })
    }

    /// Load the first level
    pub fn start(&mut self) -> Result<LevelSummary, LoadError> {
        self.world.current_level = 1;
        self.reload_level()
    }

    /// Reload the current level file, keeping score and level index
    pub fn reload_level(&mut self) -> Result<LevelSummary, LoadError> {
        let path = self.world.config().level_path(self.world.current_level);
        load_level(&mut self.world, &path)
    }

    /// Start over from level 1 with a zero score
    pub fn restart(&mut self) -> Result<LevelSummary, LoadError> {
        tracing::info!("Restarting from level 1");
        self.world.score = 0;
        self.start()
    }

    pub fn tick(&mut self, dt: f32, input: Option<Direction>) -> TickReport {
        run_simulation_tick(&mut self.world, &mut self.grid, dt, input)
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn is_game_over(&self) -> bool {
        self.world.game_over
    }
}
