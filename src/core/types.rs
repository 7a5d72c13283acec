//! Core type definitions used throughout the codebase

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identity of an entity, stable for its lifetime and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Slot index of an entity inside the registry
///
/// Valid for the entity's full lifetime, including after deactivation.
/// Only a registry `clear` invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EntityIndex(pub usize);

/// Simulation tick counter
pub type Tick = u64;

/// Kind of world object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player-controlled snake
    Actor,
    /// Eaten for points, grows the actor
    PickupConsumable,
    /// Same rules as a consumable, authored separately
    PickupCurrency,
    Wall,
    Enemy,
    /// Inert placeholder (unrecognised level character)
    #[default]
    None,
}

impl EntityKind {
    /// Map a level-file type character to a kind
    ///
    /// Unknown characters map to the inert `None` kind.
    pub fn from_type_char(c: char) -> Self {
        match c {
            'P' => EntityKind::Actor,
            'A' => EntityKind::PickupConsumable,
            'C' => EntityKind::PickupCurrency,
            'W' => EntityKind::Wall,
            'E' => EntityKind::Enemy,
            _ => EntityKind::None,
        }
    }

    pub fn is_pickup(&self) -> bool {
        matches!(self, EntityKind::PickupConsumable | EntityKind::PickupCurrency)
    }

    /// Kinds that end the run on contact with the actor
    pub fn is_lethal(&self) -> bool {
        matches!(self, EntityKind::Wall | EntityKind::Enemy)
    }
}

/// One of the four unit travel directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Right,
    Down,
    Left,
}

impl Direction {
    /// Level-file subtype mapping: 0=up, 1=right, 2=down, 3=left, anything else right
    pub fn from_subtype(subtype: i32) -> Self {
        match subtype {
            0 => Direction::Up,
            2 => Direction::Down,
            3 => Direction::Left,
            _ => Direction::Right,
        }
    }

    /// Unit vector in screen space (y grows downward)
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when both directions travel along different axes
    pub fn is_perpendicular(&self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    /// Strict overlap test; boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}
