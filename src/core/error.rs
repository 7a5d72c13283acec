use crate::core::types::EntityKind;
use thiserror::Error;

/// A fixed-capacity container refused an insertion
///
/// Always non-fatal. Callers may drop the triggering operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    #[error("entity registry full ({capacity} slots)")]
    RegistryFull { capacity: usize },

    #[error("event queue full ({capacity} pending)")]
    QueueFull { capacity: usize },

    #[error("grid cell ({col}, {row}) full ({capacity} entries)")]
    CellFull { col: usize, row: usize, capacity: usize },
}

/// A payload was attached to an entity whose kind cannot own it
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadError {
    #[error("{payload} payload cannot be attached to a {kind:?} entity")]
    KindMismatch {
        kind: EntityKind,
        payload: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Level load error: {0}")]
    Load(#[from] crate::world::loader::LoadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
