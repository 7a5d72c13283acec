//! Fixed-capacity entity registry
//!
//! Entities are appended into slots and never removed; deactivation is a
//! soft delete and consumers filter on `active`. Slot indices stay valid
//! until the registry is cleared by a level load.

use crate::core::error::{CapacityError, PayloadError};
use crate::core::types::{Aabb, EntityId, EntityIndex, EntityKind};
use crate::entity::payload::{ActorData, EnemyData, Payload, PickupData};
use glam::Vec2;

/// A world object
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub active: bool,
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: Vec2,
    /// Authoring slots copied verbatim from the level file
    pub property_value: i32,
    pub property_subtype: i32,
    pub property_speed: f32,
    payload: Option<Payload>,
}

impl Entity {
    fn new(id: EntityId, kind: EntityKind, position: Vec2, size: Vec2) -> Self {
        Self {
            id,
            active: true,
            kind,
            position,
            size,
            property_value: 0,
            property_subtype: 0,
            property_speed: 0.0,
            payload: None,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Give the entity its payload, replacing any previous one
    ///
    /// Rejects payloads the entity's kind cannot own, so walls and inert
    /// placeholders never carry data.
    pub fn attach_payload(&mut self, payload: Payload) -> Result<(), PayloadError> {
        payload.check_kind(self.kind)?;
        self.payload = Some(payload);
        Ok(())
    }

    pub fn as_actor(&self) -> Option<&ActorData> {
        self.payload.as_ref().and_then(Payload::as_actor)
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut ActorData> {
        self.payload.as_mut().and_then(Payload::as_actor_mut)
    }

    pub fn as_pickup(&self) -> Option<&PickupData> {
        self.payload.as_ref().and_then(Payload::as_pickup)
    }

    pub fn as_enemy(&self) -> Option<&EnemyData> {
        self.payload.as_ref().and_then(Payload::as_enemy)
    }
}

/// Owner of every entity and, through them, every payload
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    capacity: usize,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// Append a new active entity with zeroed authoring slots and no payload
    ///
    /// Fails without side effects when every slot is taken.
    pub fn spawn(
        &mut self,
        kind: EntityKind,
        position: Vec2,
        size: Vec2,
    ) -> Result<EntityIndex, CapacityError> {
        if self.entities.len() >= self.capacity {
            return Err(CapacityError::RegistryFull {
                capacity: self.capacity,
            });
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;

        let index = EntityIndex(self.entities.len());
        self.entities.push(Entity::new(id, kind, position, size));
        Ok(index)
    }

    /// Mark an entity inactive; returns whether it was active before
    ///
    /// The payload is kept and the slot is not reused.
    pub fn deactivate(&mut self, index: EntityIndex) -> bool {
        match self.entities.get_mut(index.0) {
            Some(entity) if entity.active => {
                entity.active = false;
                true
            }
            _ => false,
        }
    }

    /// Drop every entity together with its payload
    ///
    /// Identities keep counting up from where they were.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn get(&self, index: EntityIndex) -> Option<&Entity> {
        self.entities.get(index.0)
    }

    pub fn get_mut(&mut self, index: EntityIndex) -> Option<&mut Entity> {
        self.entities.get_mut(index.0)
    }

    /// Active entity at `index`, if any
    pub fn get_active(&self, index: EntityIndex) -> Option<&Entity> {
        self.get(index).filter(|e| e.active)
    }

    /// Number of occupied slots, active or not
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entities.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityIndex, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityIndex(i), e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityIndex, &mut Entity)> {
        self.entities
            .iter_mut()
            .enumerate()
            .map(|(i, e)| (EntityIndex(i), e))
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (EntityIndex, &Entity)> {
        self.iter().filter(|(_, e)| e.active)
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new(1000)
    }
}
