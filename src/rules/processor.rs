//! Game rules applied to drained events
//!
//! Collisions are classified by which side is the actor; the rule is then
//! picked by the other participant's kind:
//! - pickups: deactivate the pickup, grow the actor by one tail segment and
//!   award the pickup's points
//! - walls and enemies: end the run
//!
//! Rules only fire while both participants are active, which makes repeated
//! events for the same pair (one per shared grid cell) harmless.

use crate::core::types::{EntityIndex, EntityKind};
use crate::entity::registry::Entity;
use crate::events::queue::{Event, EventKind};
use crate::world::state::WorldState;

/// What the rules did during one drain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    pub events_processed: usize,
    pub pickups_consumed: usize,
    pub points_awarded: i32,
    pub game_over_triggered: bool,
}

/// Drain the event queue completely, applying each event in arrival order
pub fn process_events(world: &mut WorldState) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    while let Some(event) = world.events.pop() {
        outcome.events_processed += 1;
        match event.kind {
            EventKind::Collision => apply_collision(world, &event, &mut outcome),
            EventKind::GameOver => trigger_game_over(world, &mut outcome),
            EventKind::None => {}
        }
    }

    outcome
}

/// Split a collision into (actor, other); `None` when neither side is an actor
fn classify(world: &WorldState, event: &Event) -> Option<(EntityIndex, EntityIndex)> {
    let sender = world.entities.get(event.sender)?;
    let receiver = world.entities.get(event.receiver)?;

    if sender.kind == EntityKind::Actor {
        Some((event.sender, event.receiver))
    } else if receiver.kind == EntityKind::Actor {
        Some((event.receiver, event.sender))
    } else {
        None
    }
}

fn apply_collision(world: &mut WorldState, event: &Event, outcome: &mut RuleOutcome) {
    let Some((actor, other)) = classify(world, event) else {
        return;
    };
    if world.entities.get_active(actor).is_none() {
        return;
    }
    let Some(other_entity) = world.entities.get_active(other) else {
        return;
    };

    let kind = other_entity.kind;
    if kind.is_pickup() {
        let points = other_entity
            .as_pickup()
            .map(|p| p.value)
            .unwrap_or(world.config().default_pickup_value);

        world.entities.deactivate(other);
        if let Some(data) = world.entities.get_mut(actor).and_then(Entity::as_actor_mut) {
            data.grow();
        }
        world.score = world.score.saturating_add(points);

        outcome.pickups_consumed += 1;
        outcome.points_awarded = outcome.points_awarded.saturating_add(points);
        tracing::debug!("Pickup {:?} consumed for {} points", other, points);
    } else if kind.is_lethal() {
        trigger_game_over(world, outcome);
    }
}

fn trigger_game_over(world: &mut WorldState, outcome: &mut RuleOutcome) {
    if !world.game_over {
        tracing::info!("Game over at tick {} with score {}", world.current_tick, world.score);
        outcome.game_over_triggered = true;
    }
    world.game_over = true;
}
