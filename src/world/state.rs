//! Authoritative world state mutated once per tick

use crate::core::config::EngineConfig;
use crate::core::types::{EntityIndex, EntityKind, Tick};
use crate::entity::payload::ActorData;
use crate::entity::registry::{Entity, EntityRegistry};
use crate::events::queue::EventQueue;
use glam::Vec2;

/// Everything the simulation owns between ticks
///
/// Renderers read it after a tick completes: active entities, the actor's
/// body, score, level index/target and the game-over flag.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub entities: EntityRegistry,
    pub events: EventQueue,
    pub score: i32,
    pub game_over: bool,
    /// 1-based index of the loaded level
    pub current_level: u32,
    pub level_target_score: i32,
    /// Seconds between actor steps
    pub level_base_speed: f32,
    /// False until a level file has been read successfully
    pub level_loaded: bool,
    pub current_tick: Tick,
    config: EngineConfig,
}

impl WorldState {
    /// Expects a config that passed [`EngineConfig::validate`]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            entities: EntityRegistry::new(config.max_entities),
            events: EventQueue::new(config.max_events),
            score: 0,
            game_over: false,
            current_level: 1,
            level_target_score: config.default_target_score,
            level_base_speed: config.default_base_speed,
            level_loaded: false,
            current_tick: 0,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Play area size
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.config.play_width, self.config.play_height)
    }

    /// Restore the built-in target score and step interval
    pub fn reset_level_metadata(&mut self) {
        self.level_target_score = self.config.default_target_score;
        self.level_base_speed = self.config.default_base_speed;
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn active_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter_active().map(|(_, e)| e)
    }

    /// First active actor
    pub fn actor_index(&self) -> Option<EntityIndex> {
        self.entities
            .iter_active()
            .find(|(_, e)| e.kind == EntityKind::Actor && e.as_actor().is_some())
            .map(|(index, _)| index)
    }

    pub fn actor(&self) -> Option<&ActorData> {
        self.actor_index()
            .and_then(|index| self.entities.get(index))
            .and_then(Entity::as_actor)
    }

    /// Body segments of the first active actor, head first
    pub fn actor_body(&self) -> Option<&[Vec2]> {
        self.actor().map(|actor| actor.body.segments())
    }

    pub fn target_reached(&self) -> bool {
        self.score >= self.level_target_score
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::payload::Payload;

    #[test]
    fn test_new_world_uses_config_defaults() {
        let config = EngineConfig {
            max_entities: 5,
            max_events: 7,
            default_target_score: 50,
            ..EngineConfig::default()
        };
        let world = WorldState::new(config);

        assert_eq!(world.entities.capacity(), 5);
        assert_eq!(world.events.capacity(), 7);
        assert_eq!(world.level_target_score, 50);
        assert_eq!(world.current_level, 1);
        assert!(!world.game_over);
        assert!(world.actor().is_none());
        assert!(world.actor_body().is_none());
    }

    #[test]
    fn test_actor_lookup_skips_inactive() {
        let mut world = WorldState::default();
        let size = Vec2::splat(20.0);

        let first = world
            .entities
            .spawn(EntityKind::Actor, Vec2::ZERO, size)
            .unwrap();
        let second = world
            .entities
            .spawn(EntityKind::Actor, Vec2::new(100.0, 0.0), size)
            .unwrap();
        for (index, start) in [(first, Vec2::ZERO), (second, Vec2::new(100.0, 0.0))] {
            world
                .entities
                .get_mut(index)
                .unwrap()
                .attach_payload(Payload::Actor(ActorData::new(start)))
                .unwrap();
        }

        assert_eq!(world.actor_index(), Some(first));
        world.entities.deactivate(first);
        assert_eq!(world.actor_index(), Some(second));
        assert_eq!(world.actor_body(), Some(&[Vec2::new(100.0, 0.0)][..]));
        assert_eq!(world.active_entities().count(), 1);
    }
}
