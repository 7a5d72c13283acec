//! Kind-specific data owned by an entity
//!
//! Payloads form a closed set keyed by entity kind. Access goes through the
//! capability accessors (`as_actor`, `as_pickup`, ...) which return `None` on
//! a kind mismatch instead of reinterpreting the data.

use crate::core::error::PayloadError;
use crate::core::types::{Direction, EntityKind};
use crate::entity::body::BodyBuffer;
use glam::Vec2;

/// Movement state of the snake
#[derive(Debug, Clone, PartialEq)]
pub struct ActorData {
    pub body: BodyBuffer,
    /// Current travel direction, never zero
    pub direction: Direction,
    /// Seconds accumulated toward the next step
    pub move_timer: f32,
}

impl ActorData {
    /// One-segment body at `start`, heading right
    pub fn new(start: Vec2) -> Self {
        Self {
            body: BodyBuffer::new(start),
            direction: Direction::Right,
            move_timer: 0.0,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Accumulate `dt` and step once the timer reaches `interval`
    ///
    /// Returns true when a step happened. The timer restarts from zero.
    pub fn advance(&mut self, dt: f32, interval: f32, cell_size: f32, bounds: Vec2) -> bool {
        self.move_timer += dt;
        if self.move_timer < interval {
            return false;
        }
        self.body.step(self.direction, cell_size, bounds);
        self.move_timer = 0.0;
        true
    }

    /// Grow by one segment trailing the current tail
    pub fn grow(&mut self) {
        let tail = self.body.tail();
        self.body.append(tail);
    }
}

/// Point value of a pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupData {
    pub value: i32,
}

/// Patrol parameters of an enemy (reserved, enemies do not move yet)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyData {
    pub direction: Direction,
    pub speed: f32,
    pub move_timer: f32,
}

impl EnemyData {
    pub fn new(direction: Direction, speed: f32) -> Self {
        Self {
            direction,
            speed,
            move_timer: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Actor(ActorData),
    Pickup(PickupData),
    Enemy(EnemyData),
}

impl Payload {
    pub fn name(&self) -> &'static str {
        match self {
            Payload::Actor(_) => "actor",
            Payload::Pickup(_) => "pickup",
            Payload::Enemy(_) => "enemy",
        }
    }

    /// Check that an entity of `kind` may own this payload
    pub fn check_kind(&self, kind: EntityKind) -> Result<(), PayloadError> {
        let ok = match self {
            Payload::Actor(_) => kind == EntityKind::Actor,
            Payload::Pickup(_) => kind.is_pickup(),
            Payload::Enemy(_) => kind == EntityKind::Enemy,
        };
        if ok {
            Ok(())
        } else {
            Err(PayloadError::KindMismatch {
                kind,
                payload: self.name(),
            })
        }
    }

    pub fn as_actor(&self) -> Option<&ActorData> {
        match self {
            Payload::Actor(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut ActorData> {
        match self {
            Payload::Actor(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_pickup(&self) -> Option<&PickupData> {
        match self {
            Payload::Pickup(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_enemy(&self) -> Option<&EnemyData> {
        match self {
            Payload::Enemy(data) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_defaults() {
        let actor = ActorData::new(Vec2::new(20.0, 40.0));
        assert_eq!(actor.body.count(), 1);
        assert_eq!(actor.body.head(), Vec2::new(20.0, 40.0));
        assert_eq!(actor.direction, Direction::Right);
        assert_eq!(actor.move_timer, 0.0);
    }

    #[test]
    fn test_advance_waits_for_interval() {
        let bounds = Vec2::new(800.0, 600.0);
        let mut actor = ActorData::new(Vec2::ZERO);

        assert!(!actor.advance(0.1, 0.15, 20.0, bounds));
        assert_eq!(actor.body.head(), Vec2::ZERO);

        assert!(actor.advance(0.1, 0.15, 20.0, bounds));
        assert_eq!(actor.body.head(), Vec2::new(20.0, 0.0));
        assert_eq!(actor.move_timer, 0.0);
    }

    #[test]
    fn test_grow_trails_tail() {
        let mut actor = ActorData::new(Vec2::new(40.0, 0.0));
        actor.body.append(Vec2::new(20.0, 0.0));
        actor.grow();

        assert_eq!(actor.body.count(), 3);
        assert_eq!(actor.body.tail(), Vec2::new(20.0, 0.0));
        assert_eq!(actor.body.head(), Vec2::new(40.0, 0.0));
    }

    #[test]
    fn test_capability_accessors() {
        let pickup = Payload::Pickup(PickupData { value: 25 });
        assert_eq!(pickup.as_pickup().map(|p| p.value), Some(25));
        assert!(pickup.as_actor().is_none());
        assert!(pickup.as_enemy().is_none());

        let mut actor = Payload::Actor(ActorData::new(Vec2::ZERO));
        assert!(actor.as_actor_mut().is_some());
        assert!(actor.as_pickup().is_none());
    }

    #[test]
    fn test_kind_check() {
        let pickup = Payload::Pickup(PickupData { value: 10 });
        assert!(pickup.check_kind(EntityKind::PickupConsumable).is_ok());
        assert!(pickup.check_kind(EntityKind::PickupCurrency).is_ok());
        assert!(pickup.check_kind(EntityKind::Wall).is_err());

        let enemy = Payload::Enemy(EnemyData::new(Direction::Up, 1.5));
        assert!(enemy.check_kind(EntityKind::Enemy).is_ok());
        assert_eq!(
            enemy.check_kind(EntityKind::None),
            Err(PayloadError::KindMismatch {
                kind: EntityKind::None,
                payload: "enemy"
            })
        );
    }
}
