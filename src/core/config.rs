//! Engine configuration with documented constants
//!
//! All magic numbers of the simulation core are collected here. A host can
//! override any of them from a TOML file; missing keys keep their defaults.

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on broad-phase cells (columns x rows)
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Configuration for the simulation core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === PLAY AREA ===
    /// Width of the bounded play area (world units)
    pub play_width: f32,

    /// Height of the bounded play area (world units)
    pub play_height: f32,

    /// Size of one movement cell (world units)
    ///
    /// The actor advances exactly one cell per step. Also the default
    /// width/height of level entities that omit their size fields.
    pub cell_size: f32,

    // === BROAD PHASE ===
    /// Side length of a spatial grid cell (world units)
    ///
    /// Larger = fewer cells, more entries per cell to pair-test.
    /// Smaller = entities straddle more cells, more duplicate pairs.
    pub grid_cell_size: f32,

    /// Maximum entries per grid cell
    ///
    /// Inserts beyond this are dropped. Overlaps between entities whose
    /// entries were dropped go undetected for that tick.
    pub grid_cell_capacity: usize,

    // === CAPACITIES ===
    /// Maximum number of entity slots in the registry
    pub max_entities: usize,

    /// Maximum number of pending events per tick
    pub max_events: usize,

    // === LEVEL DEFAULTS ===
    /// Target score used when a level file does not set `META TARGET`
    pub default_target_score: i32,

    /// Seconds per actor step used when a level file does not set `META SPEED`
    pub default_base_speed: f32,

    /// Points awarded for a pickup that carries no explicit value
    pub default_pickup_value: i32,

    /// Directory holding `level<n>.eng` files
    pub level_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            play_width: 800.0,
            play_height: 600.0,
            cell_size: 20.0,

            grid_cell_size: 100.0,
            grid_cell_capacity: 20,

            max_entities: 1000,
            max_events: 100,

            default_target_score: 999,
            default_base_speed: 0.15,
            default_pickup_value: 10,

            level_dir: PathBuf::from("data/levels"),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.play_width) || !positive(self.play_height) {
            return Err(ConfigError::Invalid(format!(
                "play area must be positive, got {}x{}",
                self.play_width, self.play_height
            )));
        }

        if !positive(self.cell_size) || !positive(self.grid_cell_size) {
            return Err(ConfigError::Invalid(format!(
                "cell sizes must be positive (cell_size {}, grid_cell_size {})",
                self.cell_size, self.grid_cell_size
            )));
        }

        let grid_cells = (f64::from(self.play_width) / f64::from(self.grid_cell_size)).ceil()
            * (f64::from(self.play_height) / f64::from(self.grid_cell_size)).ceil();
        if grid_cells > MAX_GRID_CELLS as f64 {
            return Err(ConfigError::Invalid(format!(
                "grid_cell_size ({}) gives {} grid cells, limit is {}",
                self.grid_cell_size, grid_cells, MAX_GRID_CELLS
            )));
        }

        if self.cell_size > self.play_width || self.cell_size > self.play_height {
            return Err(ConfigError::Invalid(format!(
                "cell_size ({}) does not fit the play area",
                self.cell_size
            )));
        }

        if self.max_entities == 0 || self.max_events == 0 || self.grid_cell_capacity == 0 {
            return Err(ConfigError::Invalid("capacities must be non-zero".into()));
        }

        if !positive(self.default_base_speed) {
            return Err(ConfigError::Invalid(format!(
                "default_base_speed must be positive, got {}",
                self.default_base_speed
            )));
        }

        Ok(())
    }

    /// Path of the level file with the given 1-based index
    pub fn level_path(&self, level: u32) -> PathBuf {
        self.level_dir.join(format!("level{}.eng", level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            cell_size = 10.0
            max_events = 8
            level_dir = "levels"
            "#,
        )
        .unwrap();

        assert_eq!(config.cell_size, 10.0);
        assert_eq!(config.max_events, 8);
        assert_eq!(config.play_width, 800.0);
        assert_eq!(config.level_path(2), PathBuf::from("levels").join("level2.eng"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = EngineConfig::from_toml_str("grid_cell_size = 0.0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = EngineConfig::from_toml_str("max_entities = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = EngineConfig::from_toml_str("default_base_speed = -1.0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_finite_and_tiny_cells_rejected() {
        for grid_cell_size in [f32::NAN, f32::INFINITY, 0.001] {
            let config = EngineConfig {
                grid_cell_size,
                ..EngineConfig::default()
            };
            assert!(config.validate().is_err(), "grid_cell_size {} accepted", grid_cell_size);
        }

        let config = EngineConfig {
            play_width: f32::INFINITY,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_reported() {
        let result = EngineConfig::from_toml_str("cell_size = \"wide\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }
}
